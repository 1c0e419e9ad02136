//! Error types for the Selected host.

use selected_core::ConfigError;
use selected_plugin_api::PluginError;
use thiserror::Error;

/// The main error type for host operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be located or loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Plugins could not be loaded.
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// No action with this identifier is offered for the selection.
    #[error("No action '{identifier}' offered for '{app_id}'")]
    ActionNotOffered { identifier: String, app_id: String },

    /// Output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for host operations.
pub type AppResult<T> = Result<T, AppError>;
