//! Lua plugin manifests.
//!
//! A `plugin.lua` is a chunk that returns the manifest as a table:
//!
//! ```lua
//! selected.log("loading shout")
//!
//! return {
//!   info = { name = "shout", version = "1.0.0" },
//!   actions = {
//!     {
//!       meta = { title = "Shout", identifier = "shout.say", icon = "symbol:megaphone" },
//!       runCommand = { command = "tr a-z A-Z | say" },
//!     },
//!   },
//! }
//! ```
//!
//! The table goes through the same serde path as `plugin.toml`, so action
//! validation is identical for both formats.

use mlua::{Lua, LuaSerdeExt, Result as LuaResult, Value};

use crate::error::PluginResult;
use crate::plugins::PluginManifest;

/// Install the `selected` global available to manifests.
///
/// - `selected.version` - engine version string
/// - `selected.log(msg)` - write to the host log
pub fn register_selected_api(lua: &Lua) -> LuaResult<()> {
    let selected = lua.create_table()?;

    selected.set("version", env!("CARGO_PKG_VERSION"))?;

    let log_fn = lua.create_function(|_lua, message: String| {
        tracing::info!(target: "selected::plugin", "{}", message);
        Ok(())
    })?;
    selected.set("log", log_fn)?;

    lua.globals().set("selected", selected)?;
    Ok(())
}

/// Evaluate a manifest chunk and convert the returned table.
///
/// `chunk_name` shows up in Lua error messages.
pub fn parse_manifest(source: &str, chunk_name: &str) -> PluginResult<PluginManifest> {
    let lua = Lua::new();
    register_selected_api(&lua)?;

    let value: Value = lua.load(source).set_name(chunk_name).eval()?;
    if !value.is_table() {
        return Err(mlua::Error::RuntimeError(format!(
            "{} must return a table, got {}",
            chunk_name,
            value.type_name()
        ))
        .into());
    }

    let manifest: PluginManifest = lua.from_value(value)?;
    Ok(manifest)
}
