//! Implementation of the `bp check` command.

use std::path::Path;

use anyhow::{Context, Result};

use blueprint_lib::DependencyGraph;

use super::load_registry;
use crate::output::{print_stat, print_success, symbols};

pub fn cmd_check(file: &Path, verbose: bool) -> Result<()> {
  let registry = load_registry(file)?;
  let graph = DependencyGraph::build(&registry).context("Invalid dependency graph")?;

  print_success(&format!("{} is valid", file.display()));
  print_stat("Items", &registry.len().to_string());
  print_stat("Libraries", &registry.libraries().count().to_string());
  print_stat("Applications", &registry.applications().count().to_string());
  print_stat("Dependencies", &graph.edge_count().to_string());

  let order = graph.topological_order();
  if verbose {
    println!();
    println!("Build order:");
    for id in &order {
      println!("  {} {}", symbols::ARROW, id);
    }
  } else {
    let listed: Vec<_> = order.iter().map(ToString::to_string).collect();
    print_stat("Order", &listed.join(" "));
  }

  Ok(())
}
