//! The `project` global table.
//!
//! Project files see a single global, `project`, with:
//! - `project.os` - host operating system (e.g., "linux", "macos", "windows")
//! - `project.arch` - host CPU architecture (e.g., "x86_64", "aarch64")
//! - `project.dir` - directory of the project file being evaluated
//! - `project.library{}` - declare a library
//! - `project.application{}` - declare an application

use std::cell::RefCell;
use std::rc::Rc;

use mlua::prelude::*;

use crate::item::Item;
use crate::item::lua::register_project_items;

/// Register the `project` global table in the Lua runtime.
pub fn register_globals(lua: &Lua, items: Rc<RefCell<Vec<Item>>>) -> LuaResult<()> {
  let project = lua.create_table()?;

  project.set("os", std::env::consts::OS)?;
  project.set("arch", std::env::consts::ARCH)?;

  register_project_items(lua, &project, items)?;

  lua.globals().set("project", project)?;

  Ok(())
}
