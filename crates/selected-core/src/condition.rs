//! Per-application conditions.

use serde::{Deserialize, Serialize};

/// Ordered allow-list of action identifiers for one application.
///
/// An empty list means "no filtering".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Bundle identifier the condition applies to.
    pub app_id: String,

    /// Allowed action identifiers, in presentation order.
    #[serde(default)]
    pub actions: Vec<String>,
}

impl Condition {
    /// Create a condition.
    pub fn new<I, S>(app_id: impl Into<String>, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            app_id: app_id.into(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this condition leaves the action list unfiltered.
    pub fn is_permissive(&self) -> bool {
        self.actions.is_empty()
    }
}
