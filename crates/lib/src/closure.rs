//! Transitive dependency queries.
//!
//! Both closures are pure functions of `(registry, item)` and return
//! [`BTreeSet`]s, so repeated calls give identical, canonically ordered
//! results and callers may cache them freely.
//!
//! The walk does not rely on [`DependencyGraph`](crate::graph::DependencyGraph)
//! having validated the registry first. It tracks the current dependency path
//! and stops with [`ClosureError::LikelyCycle`] when an item reappears on its
//! own path or the path grows past [`MAX_CLOSURE_DEPTH`].

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;
use tracing::trace;

use crate::consts::MAX_CLOSURE_DEPTH;
use crate::graph::join_ids;
use crate::item::{Item, ItemId};
use crate::registry::{Registry, RegistryError};

/// Errors raised by closure and eligibility walks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClosureError {
  /// The walk revisited an item on its own path or exceeded the depth bound.
  #[error("likely dependency cycle at {item} (path: {})", join_path(.path))]
  LikelyCycle { item: ItemId, path: Vec<ItemId> },

  #[error(transparent)]
  Registry(#[from] RegistryError),
}

fn join_path(path: &[ItemId]) -> String {
  join_ids(path).replace(", ", " -> ")
}

/// Depth-first, post-order walk over internal dependencies.
///
/// Each reachable item is reported once, after all of its dependencies.
pub(crate) struct DependencyWalk<'a> {
  registry: &'a Registry,
  path: Vec<ItemId>,
  done: HashSet<ItemId>,
}

impl<'a> DependencyWalk<'a> {
  pub(crate) fn new(registry: &'a Registry) -> Self {
    Self {
      registry,
      path: Vec::new(),
      done: HashSet::new(),
    }
  }

  /// Walk from `root`, calling `visit` for every reachable item (root
  /// included) in dependency-first order. Items finished by an earlier call
  /// on the same walk are skipped.
  pub(crate) fn walk<F>(&mut self, root: &ItemId, visit: &mut F) -> Result<(), ClosureError>
  where
    F: FnMut(&'a Item),
  {
    if self.path.contains(root) || self.path.len() >= MAX_CLOSURE_DEPTH {
      let mut path = self.path.clone();
      path.push(root.clone());
      return Err(ClosureError::LikelyCycle {
        item: root.clone(),
        path,
      });
    }

    if self.done.contains(root) {
      return Ok(());
    }

    let registry = self.registry;
    let item = registry.get(root)?;

    self.path.push(root.clone());
    let result = item.internal_deps.iter().try_for_each(|dep| self.walk(dep, visit));
    self.path.pop();
    result?;

    trace!(item = %root, "closure visit");
    self.done.insert(root.clone());
    visit(item);
    Ok(())
  }
}

/// Every item reachable from `id` through internal dependencies, excluding
/// `id` itself.
pub fn internal_deps_transitive(registry: &Registry, id: &ItemId) -> Result<BTreeSet<ItemId>, ClosureError> {
  let mut closure = BTreeSet::new();
  DependencyWalk::new(registry).walk(id, &mut |item: &Item| {
    closure.insert(item.id());
  })?;
  closure.remove(id);
  Ok(closure)
}

/// Every external package needed by `id`, directly or through its internal
/// dependencies.
pub fn external_deps_transitive(registry: &Registry, id: &ItemId) -> Result<BTreeSet<String>, ClosureError> {
  let mut closure = BTreeSet::new();
  DependencyWalk::new(registry).walk(id, &mut |item: &Item| {
    closure.extend(item.external_deps.iter().cloned());
  })?;
  Ok(closure)
}
