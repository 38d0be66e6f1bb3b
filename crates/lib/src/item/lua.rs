//! Lua bindings for `project.library{}` and `project.application{}`.
//!
//! Both functions take a declaration table:
//!
//! ```lua
//! local core = project.library { name = "core" }
//! project.library {
//!   name = "io",
//!   deps = { core },          -- a reference returned by project.library{}
//!   packages = { "zlib" },
//! }
//! project.application { name = "tool", deps = { "io", "lib:core" } }
//! ```
//!
//! and return an item reference: a table with `kind`, `name` and `id` fields
//! whose metatable carries `__type = "ItemRef"`. References may be passed in
//! another item's `deps`; so may strings in `kind:name` form (a bare name
//! means a library).

use std::cell::RefCell;
use std::rc::Rc;

use mlua::prelude::*;
use tracing::debug;

use crate::consts::ITEM_REF_TYPE;

use super::{BuildCondition, Item, ItemId, ItemKind};

const DECL_FIELDS: &[&str] = &["name", "deps", "packages", "conditions"];

/// Parse a Lua dependency entry into an [`ItemId`].
pub fn lua_value_to_item_id(value: LuaValue) -> LuaResult<ItemId> {
  match value {
    LuaValue::String(s) => {
      let text = s.to_str()?.to_string();
      text
        .parse::<ItemId>()
        .map_err(|e| LuaError::external(format!("invalid dependency '{}': {}", text, e)))
    }
    LuaValue::Table(t) => {
      if let Some(mt) = t.metatable()
        && let Ok(type_name) = mt.get::<String>("__type")
        && type_name == ITEM_REF_TYPE
      {
        let id: String = t.get("id")?;
        return id
          .parse::<ItemId>()
          .map_err(|e| LuaError::external(format!("invalid item reference '{}': {}", id, e)));
      }
      Err(LuaError::external(
        "dependency tables must be references returned by project.library{} or project.application{}",
      ))
    }
    other => Err(LuaError::external(format!(
      "unsupported dependency type: {}",
      other.type_name()
    ))),
  }
}

/// Build the reference table returned to Lua for a declared item.
pub fn item_ref_to_lua(lua: &Lua, id: &ItemId) -> LuaResult<LuaTable> {
  let table = lua.create_table()?;
  table.set("kind", id.kind.prefix())?;
  table.set("name", id.name.as_str())?;
  table.set("id", id.to_string())?;

  let mt = lua.create_table()?;
  mt.set("__type", ITEM_REF_TYPE)?;
  table.set_metatable(Some(mt))?;

  Ok(table)
}

fn string_list(decl: &LuaTable, field: &str, context: &str) -> LuaResult<Vec<String>> {
  let Some(list) = decl.get::<Option<LuaTable>>(field)? else {
    return Ok(Vec::new());
  };

  list
    .sequence_values::<String>()
    .map(|value| value.map_err(|_| LuaError::external(format!("{} '{}' entries must be strings", context, field))))
    .collect()
}

/// Parse an item declaration table into an [`Item`] of the given kind.
pub fn parse_item_decl(kind: ItemKind, decl: &LuaTable) -> LuaResult<Item> {
  for pair in decl.pairs::<LuaValue, LuaValue>() {
    let (key, _) = pair?;
    let field = match &key {
      LuaValue::String(s) => s.to_str()?.to_string(),
      other => format!("<{}>", other.type_name()),
    };
    if !DECL_FIELDS.contains(&field.as_str()) {
      return Err(LuaError::external(format!(
        "{} declaration has unknown field '{}' (expected one of: {})",
        kind,
        field,
        DECL_FIELDS.join(", ")
      )));
    }
  }

  let name: String = decl
    .get::<Option<String>>("name")?
    .filter(|name| !name.is_empty())
    .ok_or_else(|| LuaError::external(format!("{} declaration requires a non-empty 'name' field", kind)))?;
  let context = format!("{} '{}'", kind, name);

  let mut deps = Vec::new();
  if let Some(list) = decl.get::<Option<LuaTable>>("deps")? {
    for value in list.sequence_values::<LuaValue>() {
      let id = lua_value_to_item_id(value?).map_err(|e| LuaError::external(format!("{}: {}", context, e)))?;
      deps.push(id);
    }
  }

  let packages = string_list(decl, "packages", &context)?;

  let mut item = Item::new(kind, name).with_deps(deps).with_packages(packages);

  for condition in string_list(decl, "conditions", &context)? {
    let condition = condition
      .parse::<BuildCondition>()
      .map_err(|e| LuaError::external(format!("{}: {}", context, e)))?;
    item = item.with_condition(condition);
  }

  Ok(item)
}

/// Register `project.library` and `project.application` on the project table.
///
/// Declared items are appended to `items` in call order. Identity clashes are
/// not rejected here; the registry built from `items` reports them.
pub fn register_project_items(lua: &Lua, project: &LuaTable, items: Rc<RefCell<Vec<Item>>>) -> LuaResult<()> {
  for (field, kind) in [("library", ItemKind::Library), ("application", ItemKind::Application)] {
    let items = items.clone();
    let declare = lua.create_function(move |lua, decl: LuaTable| {
      let item = parse_item_decl(kind, &decl)?;
      let id = item.id();
      debug!(item = %id, deps = item.internal_deps.len(), "declared item");
      items.borrow_mut().push(item);
      item_ref_to_lua(lua, &id)
    })?;
    project.set(field, declare)?;
  }

  Ok(())
}
