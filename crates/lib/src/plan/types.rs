//! Build plan types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::eligibility::Verdict;
use crate::item::{ItemId, ItemKind};
use crate::util::hash::Hashable;

/// Everything artifact writers need to know about one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
  pub id: ItemId,
  pub kind: ItemKind,
  pub name: String,
  /// Direct internal dependencies, in declaration order.
  pub deps: Vec<ItemId>,
  /// Transitive internal dependencies, sorted.
  pub internal_closure: BTreeSet<ItemId>,
  /// Transitive external packages, sorted.
  pub external_closure: BTreeSet<String>,
  /// Transitive internal dependencies, dependency-first.
  pub link_order: Vec<ItemId>,
  pub eligibility: Verdict,
}

impl PlanEntry {
  pub fn is_eligible(&self) -> bool {
    self.eligibility.is_eligible()
  }
}

/// The derived build plan for a project.
///
/// All orderings are dependency-first. The plan is a pure function of the
/// registry and the installed packages, and serializes deterministically.
///
/// # Example
///
/// ```json
/// {
///   "items": [
///     { "id": "lib:core", "kind": "library", "name": "core", "deps": [], ... },
///     { "id": "lib:io", "kind": "library", "name": "io", "deps": ["lib:core"], ... }
///   ],
///   "order": ["lib:core", "lib:io"],
///   "eligible_order": ["lib:core"],
///   "waves": [["lib:core"], ["lib:io"]]
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
  /// One entry per item, in `order`.
  pub items: Vec<PlanEntry>,
  /// Every item.
  pub order: Vec<ItemId>,
  /// Only the items that should be built.
  pub eligible_order: Vec<ItemId>,
  /// Parallel build waves over every item.
  pub waves: Vec<Vec<ItemId>>,
}

impl Hashable for BuildPlan {}

impl BuildPlan {
  pub fn entry(&self, id: &ItemId) -> Option<&PlanEntry> {
    self.items.iter().find(|entry| &entry.id == id)
  }

  pub fn is_eligible(&self, id: &ItemId) -> bool {
    self.entry(id).is_some_and(PlanEntry::is_eligible)
  }

  pub fn eligible_entries(&self) -> impl Iterator<Item = &PlanEntry> {
    self.items.iter().filter(|entry| entry.is_eligible())
  }

  pub fn skipped_entries(&self) -> impl Iterator<Item = &PlanEntry> {
    self.items.iter().filter(|entry| !entry.is_eligible())
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}
