//! blueprint-lib: build descriptions for compiled-language projects
//!
//! A project declares libraries and applications, their internal and
//! external dependencies, and when each should be built. This crate turns
//! that declaration into the query results artifact writers consume:
//! - `Registry`: the declared items, unique by kind and name
//! - `DependencyGraph`: cycle-checked graph with dependency-first ordering
//! - `closure`: transitive internal and external dependencies
//! - `eligibility`: should-build evaluation against installed packages
//! - `BuildPlan`: all of the above bundled per item

pub mod closure;
pub mod consts;
pub mod eligibility;
pub mod eval;
pub mod graph;
pub mod item;
pub mod lua;
pub mod plan;
pub mod registry;
pub mod util;

pub use closure::{ClosureError, external_deps_transitive, internal_deps_transitive};
pub use eligibility::{EligibilityPass, InstalledPackages, PackageOracle, Verdict, should_build};
pub use graph::{DependencyGraph, GraphError};
pub use item::{BuildCondition, Item, ItemId, ItemKind};
pub use plan::{BuildPlan, PlanEntry, PlanError};
pub use registry::{Registry, RegistryError};
