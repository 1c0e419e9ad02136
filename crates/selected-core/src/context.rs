//! Selection context.

use serde::{Deserialize, Serialize};

/// A completed text-selection event.
///
/// Produced once per selection by the capture subsystem and handed by
/// reference to exactly one action invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionContext {
    /// The selected text.
    pub text: String,

    /// Bundle identifier of the application that owned the selection.
    pub app_id: String,
}

impl ActionContext {
    /// Create a new context.
    pub fn new(text: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            app_id: app_id.into(),
        }
    }
}
