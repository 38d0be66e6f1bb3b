//! Project file evaluation.
//!
//! `evaluate_project` runs a Lua project file and turns the items it
//! declares into a [`Registry`].

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use mlua::prelude::*;
use tracing::{debug, info};

use crate::item::Item;
use crate::lua::runtime;
use crate::registry::{Registry, RegistryError};

/// Errors that can occur during project evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  /// The project file does not exist.
  #[error("project file not found: {}", .0.display())]
  NotFound(PathBuf),

  /// Lua evaluation error.
  #[error("lua error: {0}")]
  Lua(#[from] LuaError),

  /// The declared items do not form a valid registry.
  #[error(transparent)]
  Registry(#[from] RegistryError),
}

/// Evaluate a project file and return the registry of declared items.
///
/// Items keep the order in which the file declared them.
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use blueprint_lib::eval::evaluate_project;
///
/// let registry = evaluate_project(Path::new("blueprint.lua"))?;
/// println!("Items: {}", registry.len());
/// ```
pub fn evaluate_project(path: &Path) -> Result<Registry, EvalError> {
  if !path.is_file() {
    return Err(EvalError::NotFound(path.to_path_buf()));
  }

  info!(path = %path.display(), "evaluating project file");

  let items = Rc::new(RefCell::new(Vec::new()));
  {
    let lua = runtime::create_runtime(items.clone())?;
    runtime::load_file(&lua, path)?;
  }

  finish(items)
}

/// Evaluate project source held in memory.
///
/// `chunk_name` appears in Lua error messages.
pub fn evaluate_source(source: &str, chunk_name: &str) -> Result<Registry, EvalError> {
  let items = Rc::new(RefCell::new(Vec::new()));
  {
    let lua = runtime::create_runtime(items.clone())?;
    lua.load(source).set_name(chunk_name).exec()?;
  }

  finish(items)
}

fn finish(items: Rc<RefCell<Vec<Item>>>) -> Result<Registry, EvalError> {
  let items = std::mem::take(&mut *items.borrow_mut());
  debug!(count = items.len(), "project declared items");
  Ok(Registry::new(items)?)
}
