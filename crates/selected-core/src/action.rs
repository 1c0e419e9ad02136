//! Action-related types.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// What the host does with the result once an action has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AfterBehavior {
    #[default]
    #[serde(alias = "")]
    None,
    Paste,
    Copy,
}

/// Display metadata and identity of an action.
///
/// `identifier` is the stable key across built-ins and every plugin.
/// Equality and hashing look at nothing else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionMetadata {
    /// Display text in the action bar.
    pub title: String,

    /// Icon identifier (`symbol:<name>` or a short text badge).
    #[serde(default)]
    pub icon: String,

    /// Post-execution behavior.
    #[serde(default)]
    pub after: AfterBehavior,

    /// Unique identifier for the action.
    pub identifier: String,
}

impl ActionMetadata {
    /// Create metadata with no post-execution behavior.
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            after: AfterBehavior::None,
            identifier: identifier.into(),
        }
    }

    /// Set the post-execution behavior.
    pub fn with_after(mut self, after: AfterBehavior) -> Self {
        self.after = after;
        self
    }
}

impl PartialEq for ActionMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for ActionMetadata {}

impl Hash for ActionMetadata {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

/// Serializable summary of an offered action, for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInfo {
    /// Unique identifier for the action.
    pub identifier: String,

    /// Display text in action list.
    pub title: String,

    /// Icon identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,

    /// Post-execution behavior.
    pub after: AfterBehavior,
}

impl From<&ActionMetadata> for ActionInfo {
    fn from(meta: &ActionMetadata) -> Self {
        Self {
            identifier: meta.identifier.clone(),
            title: meta.title.clone(),
            icon: meta.icon.clone(),
            after: meta.after,
        }
    }
}
