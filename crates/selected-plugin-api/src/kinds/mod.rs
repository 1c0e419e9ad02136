//! Action kinds.
//!
//! One type per kind of action. Each knows how to bind its declared
//! parameters and a set of [`Capabilities`] into an [`ExecutableAction`].
//!
//! | Kind | Manifest key | Capability |
//! |------|--------------|------------|
//! | [`UrlAction`] | `url` | [`UrlOpener`](crate::UrlOpener) |
//! | [`ServiceAction`] | `service` | [`ServiceInvoker`](crate::ServiceInvoker) |
//! | [`KeycomboAction`] | `keycombo` | [`KeyInjector`](crate::KeyInjector) |
//! | [`CopyAction`] | `copy` | [`Clipboard`](crate::Clipboard) |
//! | [`SpeakAction`] | `speak` | [`SpeechSynthesizer`](crate::SpeechSynthesizer) |
//! | [`ChatAction`] | `gpt` / `chat` | [`WindowPresenter`](crate::WindowPresenter) |
//! | [`TranslationAction`] | `translation` | [`WindowPresenter`](crate::WindowPresenter) |
//! | [`RunCommandAction`] | `runCommand` | [`CommandRunner`](crate::CommandRunner) |

mod chat;
mod copy;
mod keycombo;
mod open_url;
mod run_command;
mod service;
mod speak;
mod translate;

pub use chat::ChatAction;
pub use copy::CopyAction;
pub use keycombo::KeycomboAction;
pub use open_url::{UrlAction, TEXT_PLACEHOLDER};
pub use run_command::RunCommandAction;
pub use service::ServiceAction;
pub use speak::{SpeakAction, SPEECH_PITCH, SPEECH_POST_DELAY, SPEECH_VOLUME};
pub use translate::TranslationAction;

use selected_core::ActionMetadata;

use crate::capabilities::{Capabilities, CapabilityResult};
use crate::executable::ExecutableAction;

/// Turns a declared action into an executable one.
pub trait ActionKind {
    /// Manifest key naming this kind.
    fn kind_name(&self) -> &'static str;

    /// Bind `meta` and this kind's parameters into an executable action.
    ///
    /// The returned invocation owns copies of everything it needs.
    fn generate(&self, meta: ActionMetadata, caps: &Capabilities) -> ExecutableAction;
}

/// Log a failed capability call. Failures never leave the action.
fn report(identifier: &str, operation: &str, result: CapabilityResult) {
    if let Err(e) = result {
        tracing::warn!("Action '{}': {} failed: {}", identifier, operation, e);
    }
}
