//! Error types for the Plugin API.
//!
//! Loading returns `Result<T, PluginError>`. Dispatch never fails, so nothing
//! here is raised after plugins are loaded.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for plugin loading and management.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Plugin with the given name was not found.
    #[error("Plugin '{0}' not found")]
    PluginNotFound(String),

    /// A plugin with the same name is already registered.
    #[error("Plugin '{0}' already registered")]
    PluginAlreadyRegistered(String),

    /// Plugin directory has neither plugin.toml nor plugin.lua.
    #[error("No plugin manifest in {0:?}")]
    MissingManifest(PathBuf),

    /// Manifest could not be parsed (includes invalid action declarations).
    #[error("Invalid manifest {path:?}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// Lua runtime error while evaluating a manifest.
    #[error("Lua error: {0}")]
    Lua(#[from] mlua::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Plugin API operations.
pub type PluginResult<T> = Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PluginError::PluginNotFound("my-plugin".to_string());
        assert_eq!(err.to_string(), "Plugin 'my-plugin' not found");

        let err = PluginError::MissingManifest(PathBuf::from("/tmp/empty"));
        assert_eq!(err.to_string(), "No plugin manifest in \"/tmp/empty\"");
    }

    #[test]
    fn test_from_lua_error() {
        let err: PluginError = mlua::Error::RuntimeError("boom".to_string()).into();
        assert!(matches!(err, PluginError::Lua(_)));
        assert!(err.to_string().contains("boom"));
    }
}
