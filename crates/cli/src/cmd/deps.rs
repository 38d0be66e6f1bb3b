//! Implementation of the `bp deps` command.

use std::path::Path;

use anyhow::{Context, Result};

use blueprint_lib::{DependencyGraph, ItemId, external_deps_transitive, internal_deps_transitive};

use super::load_registry;
use crate::output::{join_or_none, print_json, print_stat, print_success};

pub fn cmd_deps(item: &str, file: &Path, reverse: bool, json: bool) -> Result<()> {
  let id: ItemId = item.parse().with_context(|| format!("Invalid item: {}", item))?;

  let registry = load_registry(file)?;
  let graph = DependencyGraph::build(&registry).context("Invalid dependency graph")?;

  if reverse {
    let dependents = graph.dependents(&id)?;
    if json {
      return print_json(&serde_json::json!({ "id": id, "dependents": dependents }));
    }
    print_success(&format!("Items depending on {}", id));
    print_stat("Dependents", &join_or_none(&dependents));
    return Ok(());
  }

  let direct = graph.dependencies(&id)?;
  let internal = internal_deps_transitive(&registry, &id)?;
  let external = external_deps_transitive(&registry, &id)?;
  let link_order = graph.link_order(&id)?;

  if json {
    return print_json(&serde_json::json!({
      "id": id,
      "deps": direct,
      "internal_closure": internal,
      "external_closure": external,
      "link_order": link_order,
    }));
  }

  print_success(&format!("Dependencies of {}", id));
  print_stat("Direct", &join_or_none(&direct));
  print_stat("Transitive", &join_or_none(&internal));
  print_stat("Packages", &join_or_none(&external));
  print_stat("Link order", &join_or_none(&link_order));

  Ok(())
}
