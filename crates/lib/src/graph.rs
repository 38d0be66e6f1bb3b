//! Dependency graph over registered items.
//!
//! The graph is derived from a [`Registry`] snapshot and never mutated
//! afterwards. Construction checks for cycles eagerly: a graph value that
//! exists is acyclic, so every query on it is well-defined.
//!
//! # Order convention
//!
//! Edges point from a dependency to its dependent. Every ordering this module
//! produces is therefore **dependency-first**: an item always appears after
//! every item it depends on. Load scripts, link lines and the build plan all
//! consume this one convention.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};
use thiserror::Error;
use tracing::{debug, trace};

use crate::item::ItemId;
use crate::registry::{Registry, RegistryError};

/// Errors raised while building the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  /// The internal dependencies form a cycle.
  #[error("dependency cycle detected among: {}", join_ids(.members))]
  CyclicDependency { members: Vec<ItemId> },

  #[error(transparent)]
  Registry(#[from] RegistryError),
}

pub(crate) fn join_ids(ids: &[ItemId]) -> String {
  ids.iter().map(ItemId::to_string).collect::<Vec<_>>().join(", ")
}

/// A validated, acyclic graph of internal dependencies.
#[derive(Debug)]
pub struct DependencyGraph {
  graph: DiGraph<ItemId, ()>,
  nodes: HashMap<ItemId, NodeIndex>,
  /// Topological order computed during validation.
  order: Vec<NodeIndex>,
}

impl DependencyGraph {
  /// Build the graph for every item in the registry.
  ///
  /// Every item gets a vertex, including items nothing depends on and items
  /// that depend on nothing.
  ///
  /// # Errors
  ///
  /// - [`RegistryError::UnknownItem`] if a dependency names an unregistered item.
  /// - [`GraphError::CyclicDependency`] if the dependencies contain a cycle.
  pub fn build(registry: &Registry) -> Result<Self, GraphError> {
    let mut graph = DiGraph::with_capacity(registry.len(), 0);
    let mut nodes = HashMap::with_capacity(registry.len());

    // First pass: one node per item
    for item in registry.items() {
      let id = item.id();
      let idx = graph.add_node(id.clone());
      nodes.insert(id, idx);
    }

    // Second pass: edge from each dependency to its dependent
    for item in registry.items() {
      let dependent_idx = nodes[&item.id()];
      for dep in &item.internal_deps {
        let dep_idx = *nodes.get(dep).ok_or_else(|| RegistryError::unknown(dep))?;
        trace!(from = %dep, to = %item.id(), "adding dependency edge");
        graph.add_edge(dep_idx, dependent_idx, ());
      }
    }

    let order = match toposort(&graph, None) {
      Ok(order) => order,
      Err(cycle) => {
        let members = cycle_members(&graph, cycle.node_id());
        debug!(members = %join_ids(&members), "dependency cycle detected");
        return Err(GraphError::CyclicDependency { members });
      }
    };

    debug!(
      items = graph.node_count(),
      edges = graph.edge_count(),
      "dependency graph built"
    );

    Ok(Self { graph, nodes, order })
  }

  fn index(&self, id: &ItemId) -> Result<NodeIndex, RegistryError> {
    self.nodes.get(id).copied().ok_or_else(|| RegistryError::unknown(id))
  }

  fn sorted_ids(&self, indices: impl Iterator<Item = NodeIndex>) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = indices.map(|idx| self.graph[idx].clone()).collect();
    ids.sort();
    ids.dedup();
    ids
  }

  /// All items, dependency-first.
  pub fn topological_order(&self) -> Vec<ItemId> {
    self.order.iter().map(|&idx| self.graph[idx].clone()).collect()
  }

  /// Items organized into build waves.
  ///
  /// Every item in a wave depends only on items in earlier waves, so the
  /// items of one wave can be built in parallel. Each wave is sorted by
  /// identity.
  pub fn build_waves(&self) -> Vec<Vec<ItemId>> {
    let mut level: HashMap<NodeIndex, usize> = HashMap::with_capacity(self.order.len());

    // Dependencies precede dependents in `order`, so each node's level is
    // final by the time it is visited.
    for &idx in &self.order {
      let node_level = self
        .graph
        .neighbors_directed(idx, Direction::Incoming)
        .map(|dep| level[&dep] + 1)
        .max()
        .unwrap_or(0);
      level.insert(idx, node_level);
    }

    let wave_count = level.values().copied().max().map_or(0, |max| max + 1);
    let mut waves: Vec<Vec<ItemId>> = vec![Vec::new(); wave_count];
    for (&idx, &node_level) in &level {
      waves[node_level].push(self.graph[idx].clone());
    }
    for wave in &mut waves {
      wave.sort();
    }

    waves
  }

  /// Direct dependencies of an item, sorted by identity.
  pub fn dependencies(&self, id: &ItemId) -> Result<Vec<ItemId>, RegistryError> {
    let idx = self.index(id)?;
    Ok(self.sorted_ids(self.graph.neighbors_directed(idx, Direction::Incoming)))
  }

  /// Items that depend directly on an item, sorted by identity.
  pub fn dependents(&self, id: &ItemId) -> Result<Vec<ItemId>, RegistryError> {
    let idx = self.index(id)?;
    Ok(self.sorted_ids(self.graph.neighbors_directed(idx, Direction::Outgoing)))
  }

  /// The transitive internal dependencies of an item, dependency-first.
  ///
  /// This is the order in which the item's libraries must be linked or
  /// loaded. The item itself is not included.
  pub fn link_order(&self, id: &ItemId) -> Result<Vec<ItemId>, RegistryError> {
    let start = self.index(id)?;

    let mut reachable = HashSet::new();
    let reversed = Reversed(&self.graph);
    let mut dfs = Dfs::new(reversed, start);
    while let Some(idx) = dfs.next(reversed) {
      if idx != start {
        reachable.insert(idx);
      }
    }

    Ok(
      self
        .order
        .iter()
        .filter(|idx| reachable.contains(idx))
        .map(|&idx| self.graph[idx].clone())
        .collect(),
    )
  }

  pub fn has_dependencies(&self, id: &ItemId) -> bool {
    self
      .nodes
      .get(id)
      .is_some_and(|&idx| self.graph.neighbors_directed(idx, Direction::Incoming).next().is_some())
  }

  pub fn contains(&self, id: &ItemId) -> bool {
    self.nodes.contains_key(id)
  }

  pub fn item_count(&self) -> usize {
    self.graph.node_count()
  }

  pub fn edge_count(&self) -> usize {
    self.graph.edge_count()
  }
}

/// Members of the cycle reported at `node`, sorted.
///
/// Prefers the strongly connected component containing `node`; a
/// self-dependency forms a cyclic component of one.
fn cycle_members(graph: &DiGraph<ItemId, ()>, node: NodeIndex) -> Vec<ItemId> {
  let is_cyclic =
    |component: &Vec<NodeIndex>| component.len() > 1 || graph.contains_edge(component[0], component[0]);

  let components: Vec<Vec<NodeIndex>> = tarjan_scc(graph).into_iter().filter(is_cyclic).collect();

  let mut members: Vec<ItemId> = components
    .iter()
    .find(|component| component.contains(&node))
    .or_else(|| components.first())
    .map(|component| component.iter().map(|&idx| graph[idx].clone()).collect())
    .unwrap_or_else(|| vec![graph[node].clone()]);
  members.sort();
  members
}
