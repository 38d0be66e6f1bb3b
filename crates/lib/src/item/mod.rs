//! Item declarations.
//!
//! Items are the buildable units of a project: libraries and applications.
//! Each is identified by its kind and name and carries its internal
//! dependencies, external packages and build conditions.
//!
//! # Submodules
//!
//! - [`lua`] - `project.library{}` and `project.application{}` for project files

pub mod lua;
mod types;

pub use types::*;
