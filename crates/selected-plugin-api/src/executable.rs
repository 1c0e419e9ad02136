//! Executable actions - a descriptor bound to its invocation.

use std::hash::{Hash, Hasher};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use selected_core::{ActionContext, ActionInfo, ActionMetadata};
use uuid::Uuid;

/// The bound invocation closure.
pub type InvokeFn = Arc<dyn Fn(&ActionContext) + Send + Sync>;

/// An action ready to run against a selection.
///
/// Cloning is cheap: the invocation is shared. Equality and hashing use
/// `meta.identifier` only, so actions from different sources can be
/// deduplicated and looked up by name.
#[derive(Clone)]
pub struct ExecutableAction {
    meta: ActionMetadata,
    instance_id: Uuid,
    invoke: InvokeFn,
}

impl ExecutableAction {
    /// Bind metadata to an invocation.
    pub fn new<F>(meta: ActionMetadata, invoke: F) -> Self
    where
        F: Fn(&ActionContext) + Send + Sync + 'static,
    {
        Self {
            meta,
            instance_id: Uuid::new_v4(),
            invoke: Arc::new(invoke),
        }
    }

    /// Display metadata.
    pub fn meta(&self) -> &ActionMetadata {
        &self.meta
    }

    /// Stable identifier shared by every binding of the same declared action.
    pub fn identifier(&self) -> &str {
        &self.meta.identifier
    }

    /// Per-binding handle, unique even across bindings with the same identifier.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Presentation summary.
    pub fn info(&self) -> ActionInfo {
        ActionInfo::from(&self.meta)
    }

    /// Run the action against a selection.
    ///
    /// Fire-and-forget: nothing is returned, and a panic inside the bound
    /// closure is caught and logged.
    pub fn invoke(&self, ctx: &ActionContext) {
        let result = catch_unwind(AssertUnwindSafe(|| (self.invoke)(ctx)));
        if result.is_err() {
            tracing::error!("Action '{}' panicked during invocation", self.meta.identifier);
        }
    }
}

impl PartialEq for ExecutableAction {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta
    }
}

impl Eq for ExecutableAction {}

impl Hash for ExecutableAction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.meta.hash(state);
    }
}

impl std::fmt::Debug for ExecutableAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutableAction")
            .field("identifier", &self.meta.identifier)
            .field("title", &self.meta.title)
            .field("instance_id", &self.instance_id)
            .finish()
    }
}
