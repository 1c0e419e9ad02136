//! Speech actions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use selected_core::ActionMetadata;

use super::{report, ActionKind};
use crate::capabilities::{Capabilities, Utterance};
use crate::executable::ExecutableAction;

/// Pitch multiplier for spoken selections.
pub const SPEECH_PITCH: f32 = 0.8;

/// Volume multiplier for spoken selections.
pub const SPEECH_VOLUME: f32 = 0.8;

/// Pause after each utterance.
pub const SPEECH_POST_DELAY: Duration = Duration::from_millis(200);

/// Read the selection aloud, cutting off anything already speaking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakAction {}

impl ActionKind for SpeakAction {
    fn kind_name(&self) -> &'static str {
        "speak"
    }

    fn generate(&self, meta: ActionMetadata, caps: &Capabilities) -> ExecutableAction {
        let identifier = meta.identifier.clone();
        let speech = caps.speech.clone();

        ExecutableAction::new(meta, move |ctx| {
            report(&identifier, "stop speech", speech.stop());
            let utterance = Utterance {
                text: ctx.text.clone(),
                pitch: SPEECH_PITCH,
                volume: SPEECH_VOLUME,
                post_delay: SPEECH_POST_DELAY,
            };
            report(&identifier, "speak", speech.speak(utterance));
        })
    }
}
