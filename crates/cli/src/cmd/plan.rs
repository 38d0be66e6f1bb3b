//! Implementation of the `bp plan` command.
//!
//! Evaluates the project, computes the build plan against the configured
//! package oracle and prints it, either as a per-item summary or as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use blueprint_lib::util::hash::Hashable;
use blueprint_lib::{BuildPlan, PlanEntry, Verdict};

use super::{OracleArgs, load_registry};
use crate::output::{join_or_none, print_info, print_json, print_stat, print_warning, symbols, truncate_hash};

pub fn cmd_plan(file: &Path, oracle: &OracleArgs, verbose: bool, json: bool) -> Result<()> {
  let registry = load_registry(file)?;
  let oracle = oracle.oracle();
  let plan = BuildPlan::compute(&registry, &oracle).context("Failed to compute build plan")?;
  let hash = plan.compute_hash().context("Failed to compute plan hash")?;

  if json {
    return print_json(&serde_json::json!({ "hash": hash, "plan": plan }));
  }

  if plan.is_empty() {
    print_info("Project declares no items.");
    return Ok(());
  }

  println!("Plan: {}", truncate_hash(&hash.0));
  for entry in &plan.items {
    print_entry(entry, verbose);
  }

  println!();
  print_stat("Items", &plan.len().to_string());
  print_stat("To build", &plan.eligible_order.len().to_string());
  print_stat("Skipped", &plan.skipped_entries().count().to_string());
  print_stat("Waves", &plan.waves.len().to_string());

  if plan.skipped_entries().next().is_some() {
    print_warning("Some items will not be built; install the missing packages to include them.");
  }

  Ok(())
}

fn print_entry(entry: &PlanEntry, verbose: bool) {
  match &entry.eligibility {
    Verdict::Eligible => {
      println!(
        "  {} {}",
        symbols::BUILD.if_supports_color(Stream::Stdout, |s| s.green()),
        entry.id
      );
    }
    Verdict::Ineligible {
      missing_packages,
      blocked_by,
    } => {
      let mut reasons = Vec::new();
      if !missing_packages.is_empty() {
        reasons.push(format!("missing {}", join_or_none(missing_packages)));
      }
      if !blocked_by.is_empty() {
        reasons.push(format!("blocked by {}", join_or_none(blocked_by)));
      }
      println!(
        "  {} {} {}",
        symbols::SKIP.if_supports_color(Stream::Stdout, |s| s.red()),
        entry.id,
        format!("({})", reasons.join("; ")).if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
    }
  }

  if verbose {
    println!("      deps:     {}", join_or_none(&entry.deps));
    println!("      link:     {}", join_or_none(&entry.link_order));
    println!("      packages: {}", join_or_none(&entry.external_closure));
  }
}
