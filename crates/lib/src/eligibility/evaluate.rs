//! The should-build evaluator.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::closure::{ClosureError, DependencyWalk};
use crate::item::{BuildCondition, Item, ItemId};
use crate::registry::Registry;

use super::oracle::PackageOracle;

/// Outcome of evaluating one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
  Eligible,
  Ineligible {
    /// The item's own packages that are not installed.
    missing_packages: BTreeSet<String>,
    /// Direct dependencies that are themselves ineligible.
    blocked_by: BTreeSet<ItemId>,
  },
}

impl Verdict {
  pub fn is_eligible(&self) -> bool {
    matches!(self, Verdict::Eligible)
  }
}

/// One evaluation pass against a fixed registry and oracle.
///
/// Verdicts and package answers are memoized for the lifetime of the pass.
/// Create a new pass whenever package availability may have changed.
pub struct EligibilityPass<'a> {
  registry: &'a Registry,
  oracle: &'a dyn PackageOracle,
  walk: DependencyWalk<'a>,
  verdicts: HashMap<ItemId, Verdict>,
  packages: HashMap<String, bool>,
}

impl<'a> EligibilityPass<'a> {
  pub fn new(registry: &'a Registry, oracle: &'a dyn PackageOracle) -> Self {
    Self {
      registry,
      oracle,
      walk: DependencyWalk::new(registry),
      verdicts: HashMap::new(),
      packages: HashMap::new(),
    }
  }

  /// Evaluate an item and, recursively, everything it depends on.
  ///
  /// # Errors
  ///
  /// Fails with [`ClosureError::LikelyCycle`] on cyclic dependencies and with
  /// an unknown-item error for dangling references.
  pub fn verdict(&mut self, id: &ItemId) -> Result<Verdict, ClosureError> {
    if let Some(verdict) = self.verdicts.get(id) {
      return Ok(verdict.clone());
    }

    let oracle = self.oracle;
    let verdicts = &mut self.verdicts;
    let packages = &mut self.packages;

    self.walk.walk(id, &mut |item: &Item| {
      let verdict = evaluate_item(item, verdicts, |package| {
        *packages
          .entry(package.to_string())
          .or_insert_with(|| oracle.is_installed(package))
      });
      verdicts.insert(item.id(), verdict);
    })?;

    Ok(self.verdicts[id].clone())
  }

  pub fn should_build(&mut self, id: &ItemId) -> Result<bool, ClosureError> {
    Ok(self.verdict(id)?.is_eligible())
  }

  /// Eligible items in registry declaration order.
  pub fn eligible_items(&mut self) -> Result<Vec<ItemId>, ClosureError> {
    let mut eligible = Vec::new();
    for id in self.registry.ids() {
      if self.should_build(&id)? {
        eligible.push(id);
      }
    }
    Ok(eligible)
  }
}

/// Evaluate one item whose dependencies already have verdicts.
fn evaluate_item<F>(item: &Item, verdicts: &HashMap<ItemId, Verdict>, mut is_installed: F) -> Verdict
where
  F: FnMut(&str) -> bool,
{
  let mut missing_packages = BTreeSet::new();
  for condition in &item.conditions {
    match condition {
      BuildCondition::PackagesInstalled => {
        for package in &item.external_deps {
          if !is_installed(package) {
            missing_packages.insert(package.clone());
          }
        }
      }
    }
  }

  let blocked_by: BTreeSet<ItemId> = item
    .internal_deps
    .iter()
    .filter(|dep| verdicts.get(*dep).is_some_and(|verdict| !verdict.is_eligible()))
    .cloned()
    .collect();

  if missing_packages.is_empty() && blocked_by.is_empty() {
    Verdict::Eligible
  } else {
    debug!(
      item = %item.id(),
      missing = ?missing_packages,
      blocked_by = ?blocked_by,
      "item is not eligible"
    );
    Verdict::Ineligible {
      missing_packages,
      blocked_by,
    }
  }
}

/// Whether `id` should be built given the packages `oracle` reports.
///
/// True iff every build condition of the item holds and every internal
/// dependency should be built as well.
pub fn should_build(registry: &Registry, oracle: &dyn PackageOracle, id: &ItemId) -> Result<bool, ClosureError> {
  EligibilityPass::new(registry, oracle).should_build(id)
}
