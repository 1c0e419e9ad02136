//! Configuration types.
//!
//! User configuration lives in `~/.config/selected/config.toml`. Plugins live
//! next to it, one directory per plugin:
//!
//! ```text
//! ~/.config/selected/
//! ├── config.toml       # Conditions, browsers, disabled plugins
//! └── plugins/
//!     ├── search/plugin.toml
//!     └── shout/plugin.lua
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::condition::Condition;
use crate::error::ConfigError;

/// Bundle identifiers treated as web browsers when none are configured.
pub const DEFAULT_BROWSERS: &[&str] = &[
    "com.apple.Safari",
    "com.apple.SafariTechnologyPreview",
    "com.google.Chrome",
    "com.google.Chrome.canary",
    "org.chromium.Chromium",
    "org.mozilla.firefox",
    "org.mozilla.firefoxdeveloperedition",
    "com.microsoft.edgemac",
    "com.brave.Browser",
    "company.thebrowser.Browser",
    "com.operasoftware.Opera",
    "com.vivaldi.Vivaldi",
];

/// Runtime configuration read from config.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Per-application action allow-lists.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Browser bundle identifiers. Replaces the defaults when set.
    #[serde(default = "default_browsers")]
    pub browsers: Vec<String>,

    /// Installed plugins that should not contribute actions.
    #[serde(default)]
    pub disabled_plugins: Vec<String>,

    /// Settings for the external command runner.
    #[serde(default)]
    pub command: CommandConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            browsers: default_browsers(),
            disabled_plugins: Vec::new(),
            command: CommandConfig::default(),
        }
    }
}

fn default_browsers() -> Vec<String> {
    DEFAULT_BROWSERS.iter().map(|s| s.to_string()).collect()
}

/// External command runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Shell used to interpret commands.
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Milliseconds before a running command is killed.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("selected"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Get the plugins directory path.
pub fn plugins_dir() -> Option<PathBuf> {
    config_dir().map(|p| p.join("plugins"))
}

/// Ensure the config and plugins directories exist.
pub fn ensure_config_dir() -> Result<(), ConfigError> {
    let dir = plugins_dir().ok_or(ConfigError::NoConfigDir)?;
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::Io {
        path: dir,
        error: e.to_string(),
    })
}

/// Load config.toml from `path`.
///
/// A missing file is not an error: the defaults are returned.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::info!("No config found at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let config: AppConfig = toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!(
        "Loaded config from {:?}: {} conditions, {} browsers, {} disabled plugins",
        path,
        config.conditions.len(),
        config.browsers.len(),
        config.disabled_plugins.len()
    );

    Ok(config)
}
