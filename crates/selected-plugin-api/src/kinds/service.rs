//! OS service actions.

use serde::{Deserialize, Serialize};

use selected_core::ActionMetadata;

use super::{report, ActionKind};
use crate::capabilities::Capabilities;
use crate::executable::ExecutableAction;

/// Invoke a named OS service with the selection as input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAction {
    /// Service name as it appears in the Services menu.
    pub name: String,
}

impl ServiceAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ActionKind for ServiceAction {
    fn kind_name(&self) -> &'static str {
        "service"
    }

    fn generate(&self, meta: ActionMetadata, caps: &Capabilities) -> ExecutableAction {
        let name = self.name.clone();
        let identifier = meta.identifier.clone();
        let services = caps.services.clone();

        ExecutableAction::new(meta, move |ctx| {
            report(&identifier, "service", services.invoke(&name, &ctx.text));
        })
    }
}
