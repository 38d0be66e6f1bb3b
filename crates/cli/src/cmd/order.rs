//! Implementation of the `bp order` command.
//!
//! Output is one `kind:name` per line with nothing else on stdout, so it can
//! be piped into other tools.

use std::path::Path;

use anyhow::{Context, Result};

use blueprint_lib::{DependencyGraph, EligibilityPass};

use super::{OracleArgs, load_registry};

pub fn cmd_order(file: &Path, eligible: bool, oracle: &OracleArgs) -> Result<()> {
  let registry = load_registry(file)?;
  let graph = DependencyGraph::build(&registry).context("Invalid dependency graph")?;

  let oracle = oracle.oracle();
  let mut pass = EligibilityPass::new(&registry, &oracle);

  for id in graph.topological_order() {
    if eligible && !pass.should_build(&id).context("Failed to evaluate eligibility")? {
      continue;
    }
    println!("{}", id);
  }

  Ok(())
}
