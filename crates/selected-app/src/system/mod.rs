//! System collaborators for the Selected host.
//!
//! Key injection, OS services and chat/translation panes need a GUI host and
//! stay unavailable in the command-line build.

mod clipboard;
mod command;
mod opener;
mod speech;

pub use clipboard::SystemClipboard;
pub use command::{CommandOutput, ShellRunner};
pub use opener::SystemOpener;
pub use speech::{CommandSpeech, SAY};

use std::sync::Arc;

use selected_core::AppConfig;
use selected_plugin_api::{BrowserList, Capabilities};

/// Capabilities backed by the system, plus the shell runner so callers can
/// wait for background commands.
pub fn system_capabilities(config: &AppConfig) -> (Capabilities, Arc<ShellRunner>) {
    let commands = Arc::new(ShellRunner::from_config(&config.command));
    let caps = Capabilities {
        opener: Arc::new(SystemOpener),
        clipboard: Arc::new(SystemClipboard),
        speech: Arc::new(CommandSpeech::default()),
        commands: commands.clone(),
        browsers: Arc::new(BrowserList::new(config.browsers.iter().cloned())),
        ..Capabilities::unavailable()
    };
    (caps, commands)
}
