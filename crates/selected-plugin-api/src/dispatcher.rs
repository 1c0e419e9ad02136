//! Dispatcher
//!
//! Decides which actions to offer for a selection and runs the chosen one.

use std::collections::HashMap;
use std::sync::Arc;

use selected_core::ActionContext;

use crate::conditions::ConditionResolver;
use crate::executable::ExecutableAction;
use crate::registry::ActionRegistry;

/// Filters the registry's actions by the condition for the source app.
pub struct Dispatcher {
    registry: Arc<ActionRegistry>,
    conditions: Arc<dyn ConditionResolver>,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(registry: Arc<ActionRegistry>, conditions: Arc<dyn ConditionResolver>) -> Self {
        Self {
            registry,
            conditions,
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Arc<ActionRegistry> {
        &self.registry
    }

    /// Actions to offer for a selection.
    ///
    /// With no condition for `ctx.app_id`, or one with an empty list, every
    /// action is returned in registry order. Otherwise the result follows
    /// the condition's order and skips identifiers that match nothing.
    pub fn get_actions(&self, ctx: &ActionContext) -> Vec<ExecutableAction> {
        let condition = self.conditions.resolve(&ctx.app_id);
        let all = self.registry.get_all_actions();

        let condition = match condition {
            Some(condition) if !condition.is_permissive() => condition,
            _ => {
                tracing::debug!("No filtering for '{}': {} actions", ctx.app_id, all.len());
                return all;
            }
        };

        let mut by_identifier: HashMap<String, ExecutableAction> = HashMap::with_capacity(all.len());
        for action in all {
            let identifier = action.identifier().to_string();
            if by_identifier.insert(identifier.clone(), action).is_some() {
                tracing::warn!(
                    "Duplicate action identifier '{}'; the later action replaces the earlier one",
                    identifier
                );
            }
        }

        let mut offered = Vec::with_capacity(condition.actions.len());
        for identifier in &condition.actions {
            match by_identifier.get(identifier) {
                Some(action) => offered.push(action.clone()),
                None => tracing::debug!(
                    "Condition for '{}' names unknown action '{}'",
                    ctx.app_id,
                    identifier
                ),
            }
        }

        tracing::debug!(
            "Offering {} of {} configured actions for '{}'",
            offered.len(),
            condition.actions.len(),
            ctx.app_id
        );
        offered
    }

    /// Run an action against a selection.
    pub fn execute(&self, action: &ExecutableAction, ctx: &ActionContext) {
        tracing::info!(
            "Running '{}' for '{}' ({} chars)",
            action.identifier(),
            ctx.app_id,
            ctx.text.chars().count()
        );
        action.invoke(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{Capabilities, MockClipboard, MockServiceInvoker};
    use crate::conditions::ConfigurationManager;
    use crate::descriptor::{ActionDescriptor, ActionKindSpec};
    use crate::kinds::ServiceAction;
    use crate::plugins::{Plugin, PluginManager};
    use crate::registry::BUILTIN_IDENTIFIERS;
    use selected_core::{ActionMetadata, Condition};

    const NOTES: &str = "com.apple.Notes";

    fn service(identifier: &str, name: &str) -> ActionDescriptor {
        ActionDescriptor::new(
            ActionMetadata::new(identifier, identifier.to_uppercase(), ""),
            ActionKindSpec::Service(ServiceAction::new(name)),
        )
        .unwrap()
    }

    fn dispatcher_with(
        plugin_actions: Vec<ActionDescriptor>,
        conditions: Vec<Condition>,
        caps: Capabilities,
    ) -> Dispatcher {
        let manager = PluginManager::new();
        manager.register(Plugin::new("demo", plugin_actions)).unwrap();
        let registry = Arc::new(ActionRegistry::new(Arc::new(manager), caps));
        Dispatcher::new(registry, Arc::new(ConfigurationManager::new(conditions)))
    }

    fn abc() -> Vec<ActionDescriptor> {
        vec![service("a", "A"), service("b", "B"), service("c", "C")]
    }

    fn identifiers(actions: &[ExecutableAction]) -> Vec<&str> {
        actions.iter().map(|a| a.identifier()).collect()
    }

    fn full_list() -> Vec<&'static str> {
        let mut ids = vec!["a", "b", "c"];
        ids.extend_from_slice(BUILTIN_IDENTIFIERS);
        ids
    }

    #[test]
    fn test_no_condition_returns_everything() {
        let dispatcher = dispatcher_with(abc(), Vec::new(), Capabilities::unavailable());
        let actions = dispatcher.get_actions(&ActionContext::new("hi", NOTES));
        assert_eq!(identifiers(&actions), full_list());
    }

    #[test]
    fn test_empty_condition_returns_everything() {
        let dispatcher = dispatcher_with(
            abc(),
            vec![Condition::new(NOTES, Vec::<String>::new())],
            Capabilities::unavailable(),
        );
        let actions = dispatcher.get_actions(&ActionContext::new("hi", NOTES));
        assert_eq!(identifiers(&actions), full_list());
    }

    #[test]
    fn test_condition_filters_and_reorders() {
        let dispatcher = dispatcher_with(
            abc(),
            vec![Condition::new(NOTES, ["c", "a"])],
            Capabilities::unavailable(),
        );

        let actions = dispatcher.get_actions(&ActionContext::new("hi", NOTES));
        assert_eq!(identifiers(&actions), vec!["c", "a"]);

        // Other apps are unaffected
        let actions = dispatcher.get_actions(&ActionContext::new("hi", "com.apple.Terminal"));
        assert_eq!(identifiers(&actions), full_list());
    }

    #[test]
    fn test_unknown_identifiers_are_skipped() {
        let dispatcher = dispatcher_with(
            abc(),
            vec![Condition::new(NOTES, ["a", "z", "b"])],
            Capabilities::unavailable(),
        );
        let actions = dispatcher.get_actions(&ActionContext::new("hi", NOTES));
        assert_eq!(identifiers(&actions), vec!["a", "b"]);
    }

    #[test]
    fn test_condition_matching_nothing_is_empty() {
        let dispatcher = dispatcher_with(
            abc(),
            vec![Condition::new(NOTES, ["z"])],
            Capabilities::unavailable(),
        );
        assert!(dispatcher
            .get_actions(&ActionContext::new("hi", NOTES))
            .is_empty());
    }

    #[test]
    fn test_builtin_wins_identifier_collision() {
        // The plugin declares selected.copy as a service; the built-in copy
        // is appended later and replaces it in the index.
        let mut services = MockServiceInvoker::new();
        services.expect_invoke().times(0);

        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_set_text()
            .withf(|text| text == "hi")
            .times(1)
            .returning(|_| Ok(()));

        let caps = Capabilities {
            services: Arc::new(services),
            clipboard: Arc::new(clipboard),
            ..Capabilities::unavailable()
        };
        let dispatcher = dispatcher_with(
            vec![service("selected.copy", "Shadow")],
            vec![Condition::new(NOTES, ["selected.copy"])],
            caps,
        );

        let ctx = ActionContext::new("hi", NOTES);
        let actions = dispatcher.get_actions(&ctx);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].meta().title, "Copy");

        dispatcher.execute(&actions[0], &ctx);
    }

    #[test]
    fn test_execute_invokes_action() {
        let mut services = MockServiceInvoker::new();
        services
            .expect_invoke()
            .withf(|service, text| service == "B" && text == "selected words")
            .times(1)
            .returning(|_, _| Ok(()));

        let caps = Capabilities {
            services: Arc::new(services),
            ..Capabilities::unavailable()
        };
        let dispatcher = dispatcher_with(abc(), vec![Condition::new(NOTES, ["b"])], caps);

        let ctx = ActionContext::new("selected words", NOTES);
        let actions = dispatcher.get_actions(&ctx);
        dispatcher.execute(&actions[0], &ctx);
    }
}
