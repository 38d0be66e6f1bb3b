//! Lua VM setup and project file loading.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use mlua::prelude::*;
use tracing::trace;

use crate::item::Item;
use crate::lua::globals;

/// Create a Lua runtime with the `project` global registered.
///
/// Items declared by evaluated chunks are appended to `items`.
pub fn create_runtime(items: Rc<RefCell<Vec<Item>>>) -> LuaResult<Lua> {
  let lua = Lua::new();
  globals::register_globals(&lua, items)?;
  Ok(lua)
}

/// Prepend `dir` to `package.path` so a project file can `require` helper
/// modules kept next to it (`dir/name.lua` or `dir/name/init.lua`).
fn add_module_dir(lua: &Lua, dir: &Path) -> LuaResult<()> {
  let package = lua.globals().get::<LuaTable>("package")?;
  let current: String = package.get("path")?;
  let dir = dir.to_string_lossy();
  let search = format!("{dir}/?.lua;{dir}/?/init.lua;{current}");
  trace!(path = %search, "lua module search path");
  package.set("path", search)
}

/// Load and execute a project file.
///
/// `project.dir` is set to the file's directory before the chunk runs, and
/// the same directory is searched first by `require`.
pub fn load_file(lua: &Lua, path: &Path) -> LuaResult<()> {
  let file = path
    .canonicalize()
    .map_err(|e| LuaError::external(format!("cannot canonicalize '{}': {}", path.display(), e)))?;
  let source = std::fs::read_to_string(&file)
    .map_err(|e| LuaError::external(format!("cannot read '{}': {}", file.display(), e)))?;
  let dir = file.parent().unwrap_or(Path::new(""));

  lua
    .globals()
    .get::<LuaTable>("project")?
    .set("dir", dir.to_string_lossy().to_string())?;
  add_module_dir(lua, dir)?;

  lua.load(&source).set_name(format!("@{}", file.display())).exec()
}
