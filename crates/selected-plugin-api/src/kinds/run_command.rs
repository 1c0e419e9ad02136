//! External command actions.

use serde::{Deserialize, Serialize};

use selected_core::ActionMetadata;

use super::{report, ActionKind};
use crate::capabilities::Capabilities;
use crate::executable::ExecutableAction;

/// Run an external command with the selection on stdin.
///
/// Timeouts and output handling belong to the [`CommandRunner`](crate::CommandRunner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCommandAction {
    /// Command line, interpreted by the runner's shell.
    pub command: String,
}

impl RunCommandAction {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl ActionKind for RunCommandAction {
    fn kind_name(&self) -> &'static str {
        "runCommand"
    }

    fn generate(&self, meta: ActionMetadata, caps: &Capabilities) -> ExecutableAction {
        let command = self.command.clone();
        let identifier = meta.identifier.clone();
        let commands = caps.commands.clone();

        ExecutableAction::new(meta, move |ctx| {
            report(&identifier, "command", commands.run(&command, &ctx.text));
        })
    }
}
