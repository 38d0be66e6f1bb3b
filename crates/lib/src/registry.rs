//! The item registry.
//!
//! A [`Registry`] is the flat, ordered collection of every declared item. It
//! owns the items; everything else (the dependency graph, closures,
//! eligibility) borrows from it. Identities are unique: constructing a
//! registry with two items of the same kind and name fails.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::item::{Item, ItemId, ItemKind};

/// Errors raised while building or querying a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
  /// Two items share the same (kind, name) identity.
  #[error(
    "multiple libraries or apps have an identical name: {id} is declared at positions {first} and {second}"
  )]
  DuplicateIdentity { id: ItemId, first: usize, second: usize },

  /// A lookup found no item with the requested identity.
  #[error("unknown {kind} '{name}'")]
  UnknownItem { kind: ItemKind, name: String },
}

impl RegistryError {
  pub fn unknown(id: &ItemId) -> Self {
    RegistryError::UnknownItem {
      kind: id.kind,
      name: id.name.clone(),
    }
  }
}

/// An ordered set of items with unique identities.
#[derive(Debug, Clone, Default)]
pub struct Registry {
  items: Vec<Item>,
  index: HashMap<ItemId, usize>,
}

impl Registry {
  /// Build a registry from items in declaration order.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::DuplicateIdentity`] if two items share a kind
  /// and name. Dependencies are not resolved here; dangling references are
  /// reported by the graph and the closure engine.
  pub fn new(items: Vec<Item>) -> Result<Self, RegistryError> {
    let mut index = HashMap::with_capacity(items.len());

    for (position, item) in items.iter().enumerate() {
      if let Some(first) = index.insert(item.id(), position) {
        return Err(RegistryError::DuplicateIdentity {
          id: item.id(),
          first,
          second: position,
        });
      }
    }

    debug!(items = items.len(), "registry constructed");
    Ok(Self { items, index })
  }

  /// Look up an item by identity.
  pub fn get(&self, id: &ItemId) -> Result<&Item, RegistryError> {
    self
      .index
      .get(id)
      .map(|&position| &self.items[position])
      .ok_or_else(|| RegistryError::unknown(id))
  }

  pub fn contains(&self, id: &ItemId) -> bool {
    self.index.contains_key(id)
  }

  /// Declaration position of an item, if registered.
  pub fn position(&self, id: &ItemId) -> Option<usize> {
    self.index.get(id).copied()
  }

  /// All items in declaration order.
  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
    self.items.iter().map(Item::id)
  }

  pub fn libraries(&self) -> impl Iterator<Item = &Item> {
    self.items.iter().filter(|item| item.is_library())
  }

  pub fn applications(&self) -> impl Iterator<Item = &Item> {
    self.items.iter().filter(|item| item.is_application())
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}
