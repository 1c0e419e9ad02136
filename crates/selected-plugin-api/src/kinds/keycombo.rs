//! Key-combination actions.

use serde::{Deserialize, Serialize};

use selected_core::ActionMetadata;

use super::{report, ActionKind};
use crate::capabilities::Capabilities;
use crate::executable::ExecutableAction;
use crate::keymap::{keycodes, KeyCombo};

/// Key code pressed when a combo names only modifiers.
pub const DEFAULT_KEYCODE: u16 = keycodes::A;

/// Synthesize a key combination, e.g. `"cmd shift t"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeycomboAction {
    /// Space-separated modifier and key names.
    pub keycombo: String,
}

impl KeycomboAction {
    pub fn new(keycombo: impl Into<String>) -> Self {
        Self {
            keycombo: keycombo.into(),
        }
    }
}

impl ActionKind for KeycomboAction {
    fn kind_name(&self) -> &'static str {
        "keycombo"
    }

    fn generate(&self, meta: ActionMetadata, caps: &Capabilities) -> ExecutableAction {
        let combo = KeyCombo::parse(&self.keycombo);
        let combo_str = self.keycombo.clone();
        let identifier = meta.identifier.clone();
        let keys = caps.keys.clone();

        tracing::debug!("Action '{}': keycombo '{}' -> {:?}", identifier, combo_str, combo);

        ExecutableAction::new(meta, move |_ctx| {
            let keycode = combo.keycode.unwrap_or_else(|| {
                tracing::warn!(
                    "Action '{}': no key in combo '{}', pressing key code {}",
                    identifier,
                    combo_str,
                    DEFAULT_KEYCODE
                );
                DEFAULT_KEYCODE
            });
            report(&identifier, "key press", keys.press_key(keycode, combo.modifiers));
        })
    }
}
