//! Translation actions.

use serde::{Deserialize, Serialize};

use selected_core::ActionMetadata;

use super::{report, ActionKind};
use crate::capabilities::Capabilities;
use crate::executable::ExecutableAction;

/// Open a translation pane for the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationAction {
    /// Target language code, e.g. `en` or `cn`.
    pub target: String,
}

impl TranslationAction {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl ActionKind for TranslationAction {
    fn kind_name(&self) -> &'static str {
        "translation"
    }

    fn generate(&self, meta: ActionMetadata, caps: &Capabilities) -> ExecutableAction {
        let target = self.target.clone();
        let identifier = meta.identifier.clone();
        let windows = caps.windows.clone();

        ExecutableAction::new(meta, move |ctx| {
            report(
                &identifier,
                "translation window",
                windows.create_translation_window(&ctx.text, &target),
            );
        })
    }
}
