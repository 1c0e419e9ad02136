//! Clipboard copy actions.

use serde::{Deserialize, Serialize};

use selected_core::ActionMetadata;

use super::{report, ActionKind};
use crate::capabilities::Capabilities;
use crate::executable::ExecutableAction;

/// Copy the selection to the clipboard as plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyAction {}

impl ActionKind for CopyAction {
    fn kind_name(&self) -> &'static str {
        "copy"
    }

    fn generate(&self, meta: ActionMetadata, caps: &Capabilities) -> ExecutableAction {
        let identifier = meta.identifier.clone();
        let clipboard = caps.clipboard.clone();

        ExecutableAction::new(meta, move |ctx| {
            report(&identifier, "clipboard", clipboard.set_text(&ctx.text));
        })
    }
}
