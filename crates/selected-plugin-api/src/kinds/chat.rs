//! Chat actions.

use serde::{Deserialize, Serialize};

use selected_core::ActionMetadata;

use super::{report, ActionKind};
use crate::capabilities::Capabilities;
use crate::executable::ExecutableAction;

/// Open a chat pane with the selection and a prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAction {
    /// Prompt template handed to the chat backend.
    pub prompt: String,
}

impl ChatAction {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl ActionKind for ChatAction {
    fn kind_name(&self) -> &'static str {
        "gpt"
    }

    fn generate(&self, meta: ActionMetadata, caps: &Capabilities) -> ExecutableAction {
        let prompt = self.prompt.clone();
        let identifier = meta.identifier.clone();
        let windows = caps.windows.clone();

        ExecutableAction::new(meta, move |ctx| {
            report(
                &identifier,
                "chat window",
                windows.create_chat_window(&ctx.text, &prompt),
            );
        })
    }
}
