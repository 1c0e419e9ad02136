//! Per-application conditions.
//!
//! Stores the allow-list for each application bundle id.

use parking_lot::RwLock;
use std::collections::HashMap;

use selected_core::{AppConfig, Condition};

/// Anything that can look up the condition for an application.
pub trait ConditionResolver: Send + Sync {
    /// Condition for the application, if one is configured.
    fn resolve(&self, app_id: &str) -> Option<Condition>;
}

/// The configuration manager stores conditions keyed by app id.
pub struct ConfigurationManager {
    conditions: RwLock<HashMap<String, Condition>>,
}

impl ConfigurationManager {
    /// Create a manager from a list of conditions.
    ///
    /// A later condition for the same app replaces an earlier one.
    pub fn new<I>(conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        let mut map = HashMap::new();
        for condition in conditions {
            if let Some(previous) = map.insert(condition.app_id.clone(), condition) {
                tracing::warn!(
                    "Condition for '{}' declared more than once; the last one wins",
                    previous.app_id
                );
            }
        }
        Self {
            conditions: RwLock::new(map),
        }
    }

    /// Create a manager from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.conditions.iter().cloned())
    }

    /// Set or replace the condition for an app.
    pub fn set_condition(&self, condition: Condition) {
        tracing::debug!(
            "Condition for '{}': {} actions",
            condition.app_id,
            condition.actions.len()
        );
        self.conditions
            .write()
            .insert(condition.app_id.clone(), condition);
    }

    /// Remove the condition for an app, returning it.
    pub fn remove_condition(&self, app_id: &str) -> Option<Condition> {
        self.conditions.write().remove(app_id)
    }

    /// Number of configured apps.
    pub fn count(&self) -> usize {
        self.conditions.read().len()
    }
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ConditionResolver for ConfigurationManager {
    fn resolve(&self, app_id: &str) -> Option<Condition> {
        self.conditions.read().get(app_id).cloned()
    }
}
