//! Build plan computation.
//!
//! The plan bundles every query result the artifact writers consume: the
//! dependency-first order, build waves, per-item closures and link order,
//! and eligibility verdicts.
//!
//! Computation order matters: the graph is built (and checked for cycles)
//! before any closure or eligibility query runs.

mod types;

pub use types::*;

use thiserror::Error;
use tracing::info;

use crate::closure::{ClosureError, external_deps_transitive, internal_deps_transitive};
use crate::eligibility::{EligibilityPass, PackageOracle};
use crate::graph::{DependencyGraph, GraphError};
use crate::registry::{Registry, RegistryError};

/// Errors that can occur while computing a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
  #[error(transparent)]
  Graph(#[from] GraphError),

  #[error(transparent)]
  Closure(#[from] ClosureError),

  #[error(transparent)]
  Registry(#[from] RegistryError),
}

impl BuildPlan {
  /// Compute the plan for a registry given the packages `oracle` reports.
  ///
  /// # Errors
  ///
  /// Fails on cycles, unknown dependencies, or anything else that makes the
  /// registry unusable. No partial plan is returned.
  pub fn compute(registry: &Registry, oracle: &dyn PackageOracle) -> Result<Self, PlanError> {
    let graph = DependencyGraph::build(registry)?;
    let mut pass = EligibilityPass::new(registry, oracle);

    let order = graph.topological_order();
    let mut items = Vec::with_capacity(order.len());
    let mut eligible_order = Vec::new();

    for id in &order {
      let item = registry.get(id)?;
      let eligibility = pass.verdict(id)?;
      if eligibility.is_eligible() {
        eligible_order.push(id.clone());
      }

      items.push(PlanEntry {
        id: id.clone(),
        kind: item.kind,
        name: item.name.clone(),
        deps: item.internal_deps.clone(),
        internal_closure: internal_deps_transitive(registry, id)?,
        external_closure: external_deps_transitive(registry, id)?,
        link_order: graph.link_order(id)?,
        eligibility,
      });
    }

    info!(
      items = items.len(),
      eligible = eligible_order.len(),
      "build plan computed"
    );

    Ok(Self {
      items,
      order,
      eligible_order,
      waves: graph.build_waves(),
    })
  }
}
