//! Action Registry
//!
//! Aggregates plugin actions and the built-in actions into one ordered list.
//! Plugin actions come first, in plugin load order and declaration order;
//! built-ins are always appended last.

use std::collections::HashMap;
use std::sync::Arc;

use selected_core::ActionMetadata;

use crate::capabilities::Capabilities;
use crate::descriptor::{ActionDescriptor, ActionKindSpec};
use crate::executable::ExecutableAction;
use crate::kinds::{CopyAction, SpeakAction, TranslationAction, UrlAction, TEXT_PLACEHOLDER};
use crate::plugins::PluginSource;

/// Identifiers of the built-in actions, in the order they are appended.
pub const BUILTIN_IDENTIFIERS: &[&str] = &[
    "selected.translation.cn",
    "selected.translation.en",
    "selected.openlinks",
    "selected.copy",
    "selected.speak",
];

/// Descriptors for the built-in actions, in the order they are appended.
pub fn builtin_descriptors() -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor::from_parts(
            ActionMetadata::new("selected.translation.cn", "2Chinese", "square 译中"),
            ActionKindSpec::Translate(TranslationAction::new("cn")),
        ),
        ActionDescriptor::from_parts(
            ActionMetadata::new("selected.translation.en", "2English", "circle 译英"),
            ActionKindSpec::Translate(TranslationAction::new("en")),
        ),
        ActionDescriptor::from_parts(
            ActionMetadata::new("selected.openlinks", "OpenLinks", "symbol:link"),
            ActionKindSpec::Url(UrlAction::new(TEXT_PLACEHOLDER)),
        ),
        ActionDescriptor::from_parts(
            ActionMetadata::new("selected.copy", "Copy", "symbol:doc.on.clipboard"),
            ActionKindSpec::Copy(CopyAction::default()),
        ),
        ActionDescriptor::from_parts(
            ActionMetadata::new("selected.speak", "Speak", "symbol:play.circle"),
            ActionKindSpec::Speak(SpeakAction::default()),
        ),
    ]
}

/// The action registry binds every declared action to the capabilities.
pub struct ActionRegistry {
    plugins: Arc<dyn PluginSource>,
    caps: Capabilities,
    builtins: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Create a registry over a plugin source.
    pub fn new(plugins: Arc<dyn PluginSource>, caps: Capabilities) -> Self {
        Self {
            plugins,
            caps,
            builtins: builtin_descriptors(),
        }
    }

    /// Every available action: enabled plugins' actions, then built-ins.
    ///
    /// Recomputed on each call so plugin changes show up immediately.
    /// Identifiers are not deduplicated.
    pub fn get_all_actions(&self) -> Vec<ExecutableAction> {
        let mut actions = Vec::new();

        for plugin in self.plugins.plugins() {
            if !plugin.info.enabled {
                tracing::debug!("Skipping disabled plugin '{}'", plugin.info.name);
                continue;
            }
            actions.extend(plugin.actions.iter().map(|d| d.generate(&self.caps)));
        }

        actions.extend(self.builtins.iter().map(|d| d.generate(&self.caps)));
        actions
    }

    /// Identifiers that appear more than once in [`get_all_actions`](Self::get_all_actions).
    ///
    /// Sorted for stable output.
    pub fn duplicate_identifiers(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for action in self.get_all_actions() {
            *counts.entry(action.identifier().to_string()).or_default() += 1;
        }

        let mut duplicates: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(identifier, _)| identifier)
            .collect();
        duplicates.sort();
        duplicates
    }

    /// The capabilities actions are bound to.
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::MockClipboard;
    use crate::kinds::ServiceAction;
    use crate::plugins::{Plugin, PluginManager};
    use selected_core::ActionContext;

    fn service(identifier: &str) -> ActionDescriptor {
        ActionDescriptor::new(
            ActionMetadata::new(identifier, identifier, ""),
            ActionKindSpec::Service(ServiceAction::new("Make Sticky")),
        )
        .unwrap()
    }

    fn identifiers(actions: &[ExecutableAction]) -> Vec<&str> {
        actions.iter().map(|a| a.identifier()).collect()
    }

    #[test]
    fn test_builtin_order() {
        let registry = ActionRegistry::new(
            Arc::new(PluginManager::new()),
            Capabilities::unavailable(),
        );
        let actions = registry.get_all_actions();
        insta::assert_snapshot!(
            identifiers(&actions).join(", "),
            @"selected.translation.cn, selected.translation.en, selected.openlinks, selected.copy, selected.speak"
        );
        assert_eq!(identifiers(&actions), BUILTIN_IDENTIFIERS);
    }

    #[test]
    fn test_builtin_metadata() {
        let titles: Vec<(String, String)> = builtin_descriptors()
            .iter()
            .map(|d| (d.meta().title.clone(), d.meta().icon.clone()))
            .collect();
        assert_eq!(
            titles,
            vec![
                ("2Chinese".to_string(), "square 译中".to_string()),
                ("2English".to_string(), "circle 译英".to_string()),
                ("OpenLinks".to_string(), "symbol:link".to_string()),
                ("Copy".to_string(), "symbol:doc.on.clipboard".to_string()),
                ("Speak".to_string(), "symbol:play.circle".to_string()),
            ]
        );
    }

    #[test]
    fn test_plugins_first_in_load_order() {
        let manager = PluginManager::new();
        manager
            .register(Plugin::new("one", vec![service("one.a"), service("one.b")]))
            .unwrap();
        manager.register(Plugin::new("empty", Vec::new())).unwrap();
        manager
            .register(Plugin::new("two", vec![service("two.a")]))
            .unwrap();

        let registry = ActionRegistry::new(Arc::new(manager), Capabilities::unavailable());
        let actions = registry.get_all_actions();
        assert_eq!(
            identifiers(&actions),
            vec![
                "one.a",
                "one.b",
                "two.a",
                "selected.translation.cn",
                "selected.translation.en",
                "selected.openlinks",
                "selected.copy",
                "selected.speak",
            ]
        );
    }

    #[test]
    fn test_disabled_plugin_contributes_nothing() {
        let manager = Arc::new(PluginManager::new());
        manager
            .register(Plugin::new("one", vec![service("one.a")]).with_enabled(false))
            .unwrap();
        manager
            .register(Plugin::new("two", vec![service("two.a")]))
            .unwrap();

        let registry = ActionRegistry::new(manager.clone(), Capabilities::unavailable());
        let ids: Vec<String> = registry
            .get_all_actions()
            .iter()
            .map(|a| a.identifier().to_string())
            .collect();
        assert!(!ids.contains(&"one.a".to_string()));
        assert_eq!(ids[0], "two.a");
        assert_eq!(ids.len(), 1 + BUILTIN_IDENTIFIERS.len());

        // Re-enabling shows up on the next call
        manager.set_enabled("one", true).unwrap();
        assert_eq!(registry.get_all_actions()[0].identifier(), "one.a");
    }

    #[test]
    fn test_duplicates_are_kept_and_reported() {
        let manager = PluginManager::new();
        manager
            .register(Plugin::new("shadow", vec![service("selected.copy")]))
            .unwrap();

        let registry = ActionRegistry::new(Arc::new(manager), Capabilities::unavailable());
        let actions = registry.get_all_actions();
        assert_eq!(
            actions.iter().filter(|a| a.identifier() == "selected.copy").count(),
            2
        );
        assert_eq!(registry.duplicate_identifiers(), vec!["selected.copy"]);
    }

    #[test]
    fn test_builtins_bound_to_capabilities() {
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_set_text()
            .withf(|text| text == "hello")
            .times(1)
            .returning(|_| Ok(()));

        let caps = Capabilities {
            clipboard: Arc::new(clipboard),
            ..Capabilities::unavailable()
        };
        let registry = ActionRegistry::new(Arc::new(PluginManager::new()), caps);

        let copy = registry
            .get_all_actions()
            .into_iter()
            .find(|a| a.identifier() == "selected.copy")
            .unwrap();
        copy.invoke(&ActionContext::new("hello", "com.apple.Notes"));
    }
}
