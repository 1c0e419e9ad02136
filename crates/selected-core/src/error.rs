//! Error types for the Selected engine.

use std::path::PathBuf;
use thiserror::Error;

/// Declaration errors - an action descriptor is malformed.
///
/// Raised while loading plugin or built-in declarations, never at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// No kind table was populated.
    #[error("Action '{identifier}' declares no kind")]
    MissingKind { identifier: String },

    /// More than one kind table was populated.
    #[error("Action '{identifier}' declares multiple kinds: {}", kinds.join(", "))]
    MultipleKinds {
        identifier: String,
        kinds: Vec<&'static str>,
    },

    /// The metadata has an empty identifier.
    #[error("Action '{title}' has an empty identifier")]
    MissingIdentifier { title: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("Failed to read {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// Parse error.
    #[error("Parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Failures reported by an external capability (clipboard, opener, ...).
///
/// Actions absorb these: they are logged and never reach the dispatcher.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The capability is not available on this platform or was not wired up.
    #[error("{0} is unavailable")]
    Unavailable(&'static str),

    /// The capability ran but failed.
    #[error("{0}")]
    Failed(String),

    /// IO error while talking to the OS.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_error_display() {
        let err = DescriptorError::MultipleKinds {
            identifier: "demo.both".to_string(),
            kinds: vec!["url", "service"],
        };
        assert_eq!(
            err.to_string(),
            "Action 'demo.both' declares multiple kinds: url, service"
        );

        let err = DescriptorError::MissingKind {
            identifier: "demo.none".to_string(),
        };
        assert_eq!(err.to_string(), "Action 'demo.none' declares no kind");
    }

    #[test]
    fn test_capability_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such tool");
        let err: CapabilityError = io.into();
        assert!(matches!(err, CapabilityError::Io(_)));
        assert!(err.to_string().contains("no such tool"));
    }
}
