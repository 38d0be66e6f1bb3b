//! Package availability oracles.
//!
//! The evaluator asks an oracle whether each external package is installed.
//! Oracles answer for the current process only; availability can change
//! between invocations, so nothing here persists answers.

use std::collections::BTreeSet;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::consts::{INSTALLED_ENV, QUERY_CMD_ENV};

/// Answers whether an external package is currently available.
pub trait PackageOracle {
  fn is_installed(&self, package: &str) -> bool;
}

impl<T: PackageOracle + ?Sized> PackageOracle for &T {
  fn is_installed(&self, package: &str) -> bool {
    (**self).is_installed(package)
  }
}

impl<T: PackageOracle + ?Sized> PackageOracle for Box<T> {
  fn is_installed(&self, package: &str) -> bool {
    (**self).is_installed(package)
  }
}

/// An explicit set of installed packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledPackages {
  packages: BTreeSet<String>,
}

impl InstalledPackages {
  pub fn new<I, S>(packages: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      packages: packages.into_iter().map(Into::into).collect(),
    }
  }

  /// Parse a comma-separated list, ignoring blanks and surrounding whitespace.
  pub fn parse_list(list: &str) -> Self {
    Self::new(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
  }

  /// Read the comma-separated list in `BLUEPRINT_INSTALLED`.
  ///
  /// An unset variable yields an empty set.
  pub fn from_env() -> Self {
    match std::env::var(INSTALLED_ENV) {
      Ok(list) => Self::parse_list(&list),
      Err(_) => Self::default(),
    }
  }

  pub fn insert(&mut self, package: impl Into<String>) {
    self.packages.insert(package.into());
  }

  pub fn contains(&self, package: &str) -> bool {
    self.packages.contains(package)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.packages.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.packages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.packages.is_empty()
  }
}

impl Extend<String> for InstalledPackages {
  fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
    self.packages.extend(iter);
  }
}

impl PackageOracle for InstalledPackages {
  fn is_installed(&self, package: &str) -> bool {
    self.packages.contains(package)
  }
}

/// Queries an external tool, e.g. `ocamlfind query`.
///
/// The package name is appended as the final argument; a zero exit status
/// means the package is installed. Output is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOracle {
  program: String,
  args: Vec<String>,
}

impl CommandOracle {
  pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
    }
  }

  /// Split a whitespace-separated command line. Returns `None` when empty.
  pub fn from_command_line(line: &str) -> Option<Self> {
    let mut words = line.split_whitespace();
    let program = words.next()?;
    Some(Self::new(program, words))
  }

  /// Read the command line in `BLUEPRINT_QUERY_CMD`, if set and non-empty.
  pub fn from_env() -> Option<Self> {
    std::env::var(QUERY_CMD_ENV)
      .ok()
      .and_then(|line| Self::from_command_line(&line))
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn args(&self) -> &[String] {
    &self.args
  }
}

impl PackageOracle for CommandOracle {
  fn is_installed(&self, package: &str) -> bool {
    let status = Command::new(&self.program)
      .args(&self.args)
      .arg(package)
      .stdin(Stdio::null())
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .status();

    match status {
      Ok(status) => {
        debug!(package, program = %self.program, installed = status.success(), "queried package");
        status.success()
      }
      Err(e) => {
        warn!(package, program = %self.program, error = %e, "package query failed to run");
        false
      }
    }
  }
}

/// Several oracles combined: a package is installed if any oracle says so.
#[derive(Default)]
pub struct OracleChain {
  oracles: Vec<Box<dyn PackageOracle>>,
}

impl OracleChain {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, oracle: impl PackageOracle + 'static) {
    self.oracles.push(Box::new(oracle));
  }

  pub fn with(mut self, oracle: impl PackageOracle + 'static) -> Self {
    self.push(oracle);
    self
  }

  pub fn len(&self) -> usize {
    self.oracles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.oracles.is_empty()
  }
}

impl PackageOracle for OracleChain {
  fn is_installed(&self, package: &str) -> bool {
    self.oracles.iter().any(|oracle| oracle.is_installed(package))
  }
}
