mod check;
mod deps;
mod info;
mod order;
mod plan;

pub use check::cmd_check;
pub use deps::cmd_deps;
pub use info::cmd_info;
pub use order::cmd_order;
pub use plan::cmd_plan;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use blueprint_lib::Registry;
use blueprint_lib::eligibility::{CommandOracle, InstalledPackages, OracleChain};
use blueprint_lib::eval::evaluate_project;

/// Where package availability comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct OracleArgs {
  /// Installed packages (repeatable, comma-separated); adds to BLUEPRINT_INSTALLED
  #[arg(long, value_name = "PKG", value_delimiter = ',')]
  pub installed: Vec<String>,

  /// Command that exits 0 when the package appended as its last argument is
  /// installed, e.g. "ocamlfind query"; overrides BLUEPRINT_QUERY_CMD
  #[arg(long, value_name = "CMD")]
  pub query_cmd: Option<String>,
}

impl OracleArgs {
  /// Combine the flags with the environment into one oracle.
  pub fn oracle(&self) -> OracleChain {
    let mut installed = InstalledPackages::from_env();
    installed.extend(
      self
        .installed
        .iter()
        .map(|package| package.trim())
        .filter(|package| !package.is_empty())
        .map(str::to_string),
    );
    debug!(count = installed.len(), "installed packages");

    let mut chain = OracleChain::new().with(installed);

    let query = match &self.query_cmd {
      Some(line) => CommandOracle::from_command_line(line),
      None => CommandOracle::from_env(),
    };
    if let Some(query) = query {
      debug!(program = query.program(), "querying packages with command");
      chain.push(query);
    }

    chain
  }
}

pub(crate) fn load_registry(file: &Path) -> Result<Registry> {
  evaluate_project(file).with_context(|| format!("Failed to evaluate project: {}", file.display()))
}
