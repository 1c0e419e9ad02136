//! Plugin Manager
//!
//! Stores installed plugins in load order and exposes them to the registry
//! through [`PluginSource`].
//!
//! Each plugin lives in its own directory with one manifest:
//!
//! ```text
//! plugins/
//! ├── search/plugin.toml
//! └── shout/plugin.lua
//! ```

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::descriptor::ActionDescriptor;
use crate::error::{PluginError, PluginResult};
use crate::lua::parse_manifest;
use crate::registry::BUILTIN_IDENTIFIERS;

/// TOML manifest file name.
pub const TOML_MANIFEST: &str = "plugin.toml";

/// Lua manifest file name.
pub const LUA_MANIFEST: &str = "plugin.lua";

/// Plugin metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin name.
    pub name: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub description: String,

    /// Disabled plugins stay installed but contribute no actions.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl PluginInfo {
    /// Create enabled plugin info.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: String::new(),
            version: String::new(),
            description: String::new(),
            enabled: true,
        }
    }
}

/// Manifest file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    pub info: PluginInfo,

    /// Declared actions, in presentation order.
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
}

/// An installed plugin.
#[derive(Debug, Clone)]
pub struct Plugin {
    pub info: PluginInfo,

    /// Declared actions, in presentation order.
    pub actions: Vec<ActionDescriptor>,

    /// Directory the plugin was loaded from, if any.
    pub path: Option<PathBuf>,
}

impl Plugin {
    /// Create an enabled plugin with no directory.
    pub fn new(name: impl Into<String>, actions: Vec<ActionDescriptor>) -> Self {
        Self {
            info: PluginInfo::new(name),
            actions,
            path: None,
        }
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.info.enabled = enabled;
        self
    }

    /// Load a plugin from its directory.
    ///
    /// `plugin.toml` takes precedence over `plugin.lua`.
    pub fn load(dir: &Path) -> PluginResult<Self> {
        let toml_path = dir.join(TOML_MANIFEST);
        let lua_path = dir.join(LUA_MANIFEST);

        let manifest = if toml_path.is_file() {
            let text = std::fs::read_to_string(&toml_path)?;
            toml::from_str::<PluginManifest>(&text).map_err(|e| PluginError::Manifest {
                path: toml_path.clone(),
                message: e.to_string(),
            })?
        } else if lua_path.is_file() {
            let source = std::fs::read_to_string(&lua_path)?;
            let chunk_name = lua_path.to_string_lossy();
            parse_manifest(&source, &chunk_name).map_err(|e| PluginError::Manifest {
                path: lua_path.clone(),
                message: e.to_string(),
            })?
        } else {
            return Err(PluginError::MissingManifest(dir.to_path_buf()));
        };

        Ok(Self {
            info: manifest.info,
            actions: manifest.actions,
            path: Some(dir.to_path_buf()),
        })
    }
}

impl From<PluginManifest> for Plugin {
    fn from(manifest: PluginManifest) -> Self {
        Self {
            info: manifest.info,
            actions: manifest.actions,
            path: None,
        }
    }
}

/// Anything that can list installed plugins.
pub trait PluginSource: Send + Sync {
    /// Installed plugins, enabled or not, in load order.
    fn plugins(&self) -> Vec<Plugin>;
}

/// The plugin manager stores installed plugins in load order.
///
/// Mutations (register, enable, disable) are visible to the next
/// `ActionRegistry::get_all_actions` call.
pub struct PluginManager {
    plugins: RwLock<Vec<Plugin>>,
}

impl PluginManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(Vec::new()),
        }
    }

    /// Load every plugin directory under `dir`, in directory-name order.
    ///
    /// A missing `dir` yields an empty manager. Plugins that fail to load
    /// are logged and skipped.
    pub fn load_dir(dir: &Path) -> PluginResult<Self> {
        let manager = Self::new();

        if !dir.is_dir() {
            tracing::info!("No plugins directory at {:?}", dir);
            return Ok(manager);
        }

        let mut plugin_dirs: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        plugin_dirs.sort();

        for path in plugin_dirs {
            match Plugin::load(&path) {
                Ok(plugin) => {
                    if let Err(e) = manager.register(plugin) {
                        tracing::warn!("Skipping plugin in {:?}: {}", path, e);
                    }
                }
                Err(e) => tracing::warn!("Failed to load plugin from {:?}: {}", path, e),
            }
        }

        tracing::info!("Loaded {} plugins from {:?}", manager.count(), dir);
        Ok(manager)
    }

    /// Register a plugin.
    ///
    /// Rejects a second plugin with the same name. Declaring a built-in
    /// identifier is allowed but logged.
    pub fn register(&self, plugin: Plugin) -> PluginResult<()> {
        let mut plugins = self.plugins.write();
        if plugins.iter().any(|p| p.info.name == plugin.info.name) {
            return Err(PluginError::PluginAlreadyRegistered(plugin.info.name));
        }

        for action in &plugin.actions {
            if BUILTIN_IDENTIFIERS.iter().any(|id| *id == action.identifier()) {
                tracing::warn!(
                    "Plugin '{}' declares built-in identifier '{}'; the built-in wins when filtering by condition",
                    plugin.info.name,
                    action.identifier()
                );
            }
        }

        tracing::info!(
            "Registered plugin: {} ({} actions, enabled: {})",
            plugin.info.name,
            plugin.actions.len(),
            plugin.info.enabled
        );
        plugins.push(plugin);
        Ok(())
    }

    /// Remove a plugin.
    pub fn unregister(&self, name: &str) -> PluginResult<Plugin> {
        let mut plugins = self.plugins.write();
        let pos = plugins
            .iter()
            .position(|p| p.info.name == name)
            .ok_or_else(|| PluginError::PluginNotFound(name.to_string()))?;
        tracing::info!("Unregistered plugin: {}", name);
        Ok(plugins.remove(pos))
    }

    /// Enable or disable a plugin.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> PluginResult<()> {
        let mut plugins = self.plugins.write();
        let plugin = plugins
            .iter_mut()
            .find(|p| p.info.name == name)
            .ok_or_else(|| PluginError::PluginNotFound(name.to_string()))?;
        plugin.info.enabled = enabled;
        tracing::debug!("Plugin '{}' enabled: {}", name, enabled);
        Ok(())
    }

    /// Disable every named plugin. Unknown names are ignored.
    pub fn apply_disabled(&self, names: &[String]) {
        for name in names {
            if self.set_enabled(name, false).is_err() {
                tracing::debug!("Disabled plugin '{}' is not installed", name);
            }
        }
    }

    /// Info for every installed plugin, in load order.
    pub fn list(&self) -> Vec<PluginInfo> {
        self.plugins.read().iter().map(|p| p.info.clone()).collect()
    }

    /// Number of installed plugins.
    pub fn count(&self) -> usize {
        self.plugins.read().len()
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginSource for PluginManager {
    fn plugins(&self) -> Vec<Plugin> {
        self.plugins.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ActionKindSpec;

    const SEARCH_TOML: &str = r#"
[info]
name = "search"
version = "1.0.0"
description = "Web search"

[[actions]]
meta = { title = "Google", icon = "symbol:magnifyingglass", identifier = "search.google" }
url = { url = "https://www.google.com/search?q={text}" }

[[actions]]
meta = { title = "Sticky", identifier = "search.sticky" }
service = { name = "Make Sticky" }
"#;

    const SHOUT_LUA: &str = r#"
return {
  info = { name = "shout", enabled = false },
  actions = {
    { meta = { title = "Shout", identifier = "shout.say" }, speak = {} },
  },
}
"#;

    fn write_plugin(root: &Path, dir: &str, file: &str, contents: &str) {
        let dir = root.join(dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(file), contents).unwrap();
    }

    #[test]
    fn test_load_toml_plugin() {
        let root = tempfile::tempdir().unwrap();
        write_plugin(root.path(), "search", TOML_MANIFEST, SEARCH_TOML);

        let plugin = Plugin::load(&root.path().join("search")).unwrap();
        assert_eq!(plugin.info.name, "search");
        assert_eq!(plugin.info.version, "1.0.0");
        assert!(plugin.info.enabled);
        assert_eq!(plugin.actions.len(), 2);
        assert!(matches!(plugin.actions[0].kind(), ActionKindSpec::Url(_)));
        assert!(matches!(plugin.actions[1].kind(), ActionKindSpec::Service(_)));
        assert_eq!(plugin.path.as_deref(), Some(root.path().join("search").as_path()));
    }

    #[test]
    fn test_load_dir_sorted_and_mixed_formats() {
        let root = tempfile::tempdir().unwrap();
        write_plugin(root.path(), "b-shout", LUA_MANIFEST, SHOUT_LUA);
        write_plugin(root.path(), "a-search", TOML_MANIFEST, SEARCH_TOML);

        let manager = PluginManager::load_dir(root.path()).unwrap();
        let names: Vec<_> = manager.list().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["search", "shout"]);

        let infos = manager.list();
        assert!(infos[0].enabled);
        assert!(!infos[1].enabled);
    }

    #[test]
    fn test_load_dir_skips_broken_plugins() {
        let root = tempfile::tempdir().unwrap();
        write_plugin(root.path(), "good", TOML_MANIFEST, SEARCH_TOML);
        write_plugin(
            root.path(),
            "bad",
            TOML_MANIFEST,
            r#"
[info]
name = "bad"

[[actions]]
meta = { title = "Nothing", identifier = "bad.nothing" }
"#,
        );
        std::fs::create_dir_all(root.path().join("empty")).unwrap();

        let manager = PluginManager::load_dir(root.path()).unwrap();
        assert_eq!(manager.count(), 1);
        assert_eq!(manager.list()[0].name, "search");
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let manager = PluginManager::load_dir(&root.path().join("nope")).unwrap();
        assert_eq!(manager.count(), 0);
    }

    #[test]
    fn test_missing_manifest() {
        let root = tempfile::tempdir().unwrap();
        let err = Plugin::load(root.path()).unwrap_err();
        assert!(matches!(err, PluginError::MissingManifest(_)));
    }

    #[test]
    fn test_duplicate_plugin_rejected() {
        let manager = PluginManager::new();
        manager.register(Plugin::new("search", Vec::new())).unwrap();
        let err = manager.register(Plugin::new("search", Vec::new())).unwrap_err();
        assert!(matches!(err, PluginError::PluginAlreadyRegistered(_)));
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_enable_disable() {
        let manager = PluginManager::new();
        manager.register(Plugin::new("search", Vec::new())).unwrap();
        manager.register(Plugin::new("shout", Vec::new())).unwrap();

        manager.set_enabled("search", false).unwrap();
        assert!(!manager.list()[0].enabled);

        manager.set_enabled("search", true).unwrap();
        assert!(manager.list()[0].enabled);

        assert!(matches!(
            manager.set_enabled("missing", false),
            Err(PluginError::PluginNotFound(_))
        ));

        manager.apply_disabled(&["shout".to_string(), "missing".to_string()]);
        assert!(!manager.list()[1].enabled);
    }

    #[test]
    fn test_unregister() {
        let manager = PluginManager::new();
        manager.register(Plugin::new("search", Vec::new())).unwrap();

        let removed = manager.unregister("search").unwrap();
        assert_eq!(removed.info.name, "search");
        assert_eq!(manager.count(), 0);
        assert!(manager.unregister("search").is_err());
    }
}
