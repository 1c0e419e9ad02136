//! System clipboard via arboard.

use selected_core::CapabilityError;
use selected_plugin_api::Clipboard;

/// Writes plain text to the system clipboard.
///
/// A fresh arboard handle is opened per call; handles are not shared
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), CapabilityError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| CapabilityError::Failed(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| CapabilityError::Failed(e.to_string()))?;
        tracing::debug!("Copied {} chars to clipboard", text.chars().count());
        Ok(())
    }
}
