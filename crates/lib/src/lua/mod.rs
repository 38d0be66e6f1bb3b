//! Lua runtime for project files.
//!
//! # Submodules
//!
//! - [`globals`] - the `project` global table
//! - [`runtime`] - Lua VM creation and file loading

pub mod globals;
pub mod runtime;
