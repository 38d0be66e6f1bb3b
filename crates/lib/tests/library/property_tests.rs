//! Property tests over randomly generated acyclic projects.

use std::collections::BTreeSet;

use blueprint_lib::{
  BuildPlan, DependencyGraph, InstalledPackages, Item, ItemId, Registry, external_deps_transitive,
  internal_deps_transitive, should_build,
};
use proptest::prelude::*;

use super::common::position;

const PACKAGES: &[&str] = &["ssl", "unix", "zlib", "gmp"];

/// Items `n0..nk`; each may depend only on lower-numbered items, so the
/// result is always acyclic.
fn acyclic_registry() -> impl Strategy<Value = Registry> {
  (1usize..12)
    .prop_flat_map(|count| {
      (
        proptest::collection::vec(proptest::collection::vec(any::<bool>(), count), count),
        proptest::collection::vec(proptest::collection::vec(any::<bool>(), PACKAGES.len()), count),
      )
    })
    .prop_map(|(edges, packages)| {
      let items = edges
        .iter()
        .enumerate()
        .map(|(i, row)| {
          let deps = (0..i).filter(|&j| row[j]).map(|j| ItemId::library(format!("n{}", j)));
          let pkgs = PACKAGES
            .iter()
            .zip(&packages[i])
            .filter(|(_, wanted)| **wanted)
            .map(|(name, _)| *name);
          Item::library(format!("n{}", i)).with_deps(deps).with_packages(pkgs)
        })
        .collect();
      Registry::new(items).unwrap()
    })
}

fn installed_subset() -> impl Strategy<Value = InstalledPackages> {
  proptest::collection::vec(any::<bool>(), PACKAGES.len()).prop_map(|mask| {
    InstalledPackages::new(
      PACKAGES
        .iter()
        .zip(mask)
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name),
    )
  })
}

proptest! {
  #[test]
  fn topological_order_respects_every_edge(registry in acyclic_registry()) {
    let graph = DependencyGraph::build(&registry).unwrap();
    let order = graph.topological_order();
    prop_assert_eq!(order.len(), registry.len());

    for item in registry.items() {
      for dep in &item.internal_deps {
        prop_assert!(position(&order, dep) < position(&order, &item.id()));
      }
    }
  }

  #[test]
  fn waves_respect_every_edge(registry in acyclic_registry()) {
    let graph = DependencyGraph::build(&registry).unwrap();
    let waves = graph.build_waves();
    let wave_of = |id: &ItemId| waves.iter().position(|wave| wave.contains(id)).unwrap();

    for item in registry.items() {
      for dep in &item.internal_deps {
        prop_assert!(wave_of(dep) < wave_of(&item.id()));
      }
    }
  }

  #[test]
  fn closures_are_idempotent_and_monotone(registry in acyclic_registry()) {
    for item in registry.items() {
      let id = item.id();
      let internal = internal_deps_transitive(&registry, &id).unwrap();
      let external = external_deps_transitive(&registry, &id).unwrap();
      prop_assert_eq!(&internal, &internal_deps_transitive(&registry, &id).unwrap());
      prop_assert_eq!(&external, &external_deps_transitive(&registry, &id).unwrap());
      prop_assert!(!internal.contains(&id));

      for dep in &item.internal_deps {
        prop_assert!(internal.contains(dep));
        prop_assert!(external.is_superset(&external_deps_transitive(&registry, dep).unwrap()));
        prop_assert!(internal.is_superset(&internal_deps_transitive(&registry, dep).unwrap()));
      }
    }
  }

  #[test]
  fn eligibility_matches_its_definition(registry in acyclic_registry(), installed in installed_subset()) {
    for item in registry.items() {
      let own_ok = item.external_deps.iter().all(|p| installed.contains(p));
      let deps_ok = item
        .internal_deps
        .iter()
        .all(|dep| should_build(&registry, &installed, dep).unwrap());
      prop_assert_eq!(should_build(&registry, &installed, &item.id()).unwrap(), own_ok && deps_ok);
    }
  }

  #[test]
  fn eligible_items_have_all_closure_packages(registry in acyclic_registry(), installed in installed_subset()) {
    let plan = BuildPlan::compute(&registry, &installed).unwrap();
    for entry in plan.eligible_entries() {
      let missing: BTreeSet<_> = entry
        .external_closure
        .iter()
        .filter(|p| !installed.contains(p))
        .collect();
      prop_assert!(missing.is_empty(), "{} is eligible but misses {:?}", entry.id, missing);
    }
  }
}
