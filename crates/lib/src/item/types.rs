//! Item types.
//!
//! An [`Item`] is the atomic declaration of the project: a named library or
//! application together with the items it depends on, the external packages it
//! needs, and the conditions under which it is built at all.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether an item is a library or an application.
///
/// The two kinds share every field and operation; they differ only in how
/// artifact writers treat them (libraries are linked and packaged,
/// applications are installed as executables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
  Library,
  Application,
}

impl ItemKind {
  /// Short prefix used in the `kind:name` form.
  pub fn prefix(self) -> &'static str {
    match self {
      ItemKind::Library => "lib",
      ItemKind::Application => "app",
    }
  }

  /// Human-readable name, used in error messages.
  pub fn as_str(self) -> &'static str {
    match self {
      ItemKind::Library => "library",
      ItemKind::Application => "application",
    }
  }

  fn from_prefix(prefix: &str) -> Option<Self> {
    match prefix {
      "lib" | "library" => Some(ItemKind::Library),
      "app" | "application" => Some(ItemKind::Application),
      _ => None,
    }
  }
}

impl fmt::Display for ItemKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The identity of an item: its kind and name.
///
/// Orders by kind first (libraries before applications), then by name. This
/// ordering is the canonical order of every closure result.
///
/// The textual form is `lib:name` or `app:name`; a bare `name` parses as a
/// library.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId {
  pub kind: ItemKind,
  pub name: String,
}

impl ItemId {
  pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
    Self {
      kind,
      name: name.into(),
    }
  }

  pub fn library(name: impl Into<String>) -> Self {
    Self::new(ItemKind::Library, name)
  }

  pub fn application(name: impl Into<String>) -> Self {
    Self::new(ItemKind::Application, name)
  }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.kind.prefix(), self.name)
  }
}

/// Error parsing the `kind:name` form of an [`ItemId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseItemIdError {
  #[error("item name cannot be empty")]
  EmptyName,

  #[error("unknown item kind '{0}' (expected 'lib' or 'app')")]
  UnknownKind(String),
}

impl FromStr for ItemId {
  type Err = ParseItemIdError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (kind, name) = match s.split_once(':') {
      Some((prefix, name)) => {
        let kind = ItemKind::from_prefix(prefix).ok_or_else(|| ParseItemIdError::UnknownKind(prefix.to_string()))?;
        (kind, name)
      }
      None => (ItemKind::Library, s),
    };

    if name.is_empty() {
      return Err(ParseItemIdError::EmptyName);
    }

    Ok(ItemId::new(kind, name))
  }
}

impl TryFrom<String> for ItemId {
  type Error = ParseItemIdError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<ItemId> for String {
  fn from(id: ItemId) -> Self {
    id.to_string()
  }
}

/// A condition that must hold for an item to be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildCondition {
  /// Every package in the item's `external_deps` is installed.
  PackagesInstalled,
}

impl BuildCondition {
  pub fn as_str(self) -> &'static str {
    match self {
      BuildCondition::PackagesInstalled => "packages_installed",
    }
  }
}

impl FromStr for BuildCondition {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "packages_installed" => Ok(BuildCondition::PackagesInstalled),
      other => Err(format!(
        "unknown build condition '{}' (expected 'packages_installed')",
        other
      )),
    }
  }
}

/// A declared buildable unit.
///
/// Items reference their internal dependencies by [`ItemId`]; the
/// [`Registry`](crate::registry::Registry) that holds them owns every item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub kind: ItemKind,
  pub name: String,
  /// Internal dependencies, in declaration order.
  #[serde(default)]
  pub internal_deps: Vec<ItemId>,
  /// External packages, resolved by an outside package system.
  #[serde(default)]
  pub external_deps: BTreeSet<String>,
  #[serde(default)]
  pub conditions: BTreeSet<BuildCondition>,
}

impl Item {
  pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
    Self {
      kind,
      name: name.into(),
      internal_deps: Vec::new(),
      external_deps: BTreeSet::new(),
      conditions: BTreeSet::new(),
    }
  }

  pub fn library(name: impl Into<String>) -> Self {
    Self::new(ItemKind::Library, name)
  }

  pub fn application(name: impl Into<String>) -> Self {
    Self::new(ItemKind::Application, name)
  }

  /// Append internal dependencies. Duplicates are kept once.
  pub fn with_deps<I>(mut self, deps: I) -> Self
  where
    I: IntoIterator<Item = ItemId>,
  {
    for dep in deps {
      if !self.internal_deps.contains(&dep) {
        self.internal_deps.push(dep);
      }
    }
    self
  }

  /// Add external packages and the [`BuildCondition::PackagesInstalled`]
  /// condition that checks them.
  pub fn with_packages<I, S>(mut self, packages: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.external_deps.extend(packages.into_iter().map(Into::into));
    if !self.external_deps.is_empty() {
      self.conditions.insert(BuildCondition::PackagesInstalled);
    }
    self
  }

  pub fn with_condition(mut self, condition: BuildCondition) -> Self {
    self.conditions.insert(condition);
    self
  }

  pub fn id(&self) -> ItemId {
    ItemId::new(self.kind, self.name.clone())
  }

  pub fn is_library(&self) -> bool {
    self.kind == ItemKind::Library
  }

  pub fn is_application(&self) -> bool {
    self.kind == ItemKind::Application
  }
}
