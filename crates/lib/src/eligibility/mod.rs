//! Build eligibility.
//!
//! An item should be built when its own build conditions hold and every
//! internal dependency should be built too. Package availability comes from
//! an injected [`PackageOracle`], never from process-global state.
//!
//! # Submodules
//!
//! - [`oracle`] - the package oracle trait and its implementations
//! - [`evaluate`] - the recursive should-build evaluator

pub mod evaluate;
pub mod oracle;

pub use evaluate::{EligibilityPass, Verdict, should_build};
pub use oracle::{CommandOracle, InstalledPackages, OracleChain, PackageOracle};
