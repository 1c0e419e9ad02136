//! Capabilities - the external collaborators actions drive.
//!
//! Every action kind talks to the outside world through one of these traits.
//! Implementations live in the host application; the engine only holds
//! handles to them, bundled in [`Capabilities`] and injected at registry
//! construction.
//!
//! All methods are fire-and-forget from the engine's point of view: a
//! returned error is logged by the calling action and otherwise ignored.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use selected_core::{CapabilityError, DEFAULT_BROWSERS};
use url::Url;

use crate::keymap::Modifiers;

/// Result type for capability calls.
pub type CapabilityResult = Result<(), CapabilityError>;

/// Location of an installed application, as resolved by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLocation(pub PathBuf);

impl AppLocation {
    /// Path to the application bundle.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// A speech request.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak.
    pub text: String,

    /// Pitch multiplier (1.0 = voice default).
    pub pitch: f32,

    /// Volume multiplier (1.0 = full).
    pub volume: f32,

    /// Pause after the utterance before it counts as finished.
    pub post_delay: Duration,
}

/// Opens URLs through the OS.
#[cfg_attr(test, mockall::automock)]
pub trait UrlOpener: Send + Sync {
    /// Open with the default handler for the URL's scheme.
    fn open(&self, url: &Url) -> CapabilityResult;

    /// Open with a specific application.
    fn open_with(&self, url: &Url, app: &AppLocation, activate: bool) -> CapabilityResult;

    /// Find the installed application for a bundle identifier.
    fn resolve_application(&self, app_id: &str) -> Option<AppLocation>;
}

/// System clipboard.
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with plain text.
    fn set_text(&self, text: &str) -> CapabilityResult;
}

/// Text-to-speech.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechSynthesizer: Send + Sync {
    /// Stop any in-progress speech at the next word boundary.
    fn stop(&self) -> CapabilityResult;

    /// Queue an utterance.
    fn speak(&self, utterance: Utterance) -> CapabilityResult;
}

/// Synthesized keyboard input.
#[cfg_attr(test, mockall::automock)]
pub trait KeyInjector: Send + Sync {
    /// Post a key press with the given modifiers held.
    fn press_key(&self, keycode: u16, modifiers: Modifiers) -> CapabilityResult;
}

/// OS services (e.g. the macOS Services menu).
#[cfg_attr(test, mockall::automock)]
pub trait ServiceInvoker: Send + Sync {
    /// Invoke a named service with the text as input.
    fn invoke(&self, service: &str, text: &str) -> CapabilityResult;
}

/// Chat and translation panes.
#[cfg_attr(test, mockall::automock)]
pub trait WindowPresenter: Send + Sync {
    /// Open a chat pane seeded with the text and a prompt template.
    fn create_chat_window(&self, text: &str, prompt: &str) -> CapabilityResult;

    /// Open a translation pane for the text.
    fn create_translation_window(&self, text: &str, target: &str) -> CapabilityResult;
}

/// External command execution.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run a command with the text on stdin.
    fn run(&self, command: &str, stdin_text: &str) -> CapabilityResult;
}

/// Stand-in for a capability the host did not wire up.
///
/// Every call fails with [`CapabilityError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl UrlOpener for Unavailable {
    fn open(&self, _url: &Url) -> CapabilityResult {
        Err(CapabilityError::Unavailable("url opener"))
    }

    fn open_with(&self, _url: &Url, _app: &AppLocation, _activate: bool) -> CapabilityResult {
        Err(CapabilityError::Unavailable("url opener"))
    }

    fn resolve_application(&self, _app_id: &str) -> Option<AppLocation> {
        None
    }
}

impl Clipboard for Unavailable {
    fn set_text(&self, _text: &str) -> CapabilityResult {
        Err(CapabilityError::Unavailable("clipboard"))
    }
}

impl SpeechSynthesizer for Unavailable {
    fn stop(&self) -> CapabilityResult {
        Err(CapabilityError::Unavailable("speech"))
    }

    fn speak(&self, _utterance: Utterance) -> CapabilityResult {
        Err(CapabilityError::Unavailable("speech"))
    }
}

impl KeyInjector for Unavailable {
    fn press_key(&self, _keycode: u16, _modifiers: Modifiers) -> CapabilityResult {
        Err(CapabilityError::Unavailable("key injection"))
    }
}

impl ServiceInvoker for Unavailable {
    fn invoke(&self, _service: &str, _text: &str) -> CapabilityResult {
        Err(CapabilityError::Unavailable("services"))
    }
}

impl WindowPresenter for Unavailable {
    fn create_chat_window(&self, _text: &str, _prompt: &str) -> CapabilityResult {
        Err(CapabilityError::Unavailable("window presenter"))
    }

    fn create_translation_window(&self, _text: &str, _target: &str) -> CapabilityResult {
        Err(CapabilityError::Unavailable("window presenter"))
    }
}

impl CommandRunner for Unavailable {
    fn run(&self, _command: &str, _stdin_text: &str) -> CapabilityResult {
        Err(CapabilityError::Unavailable("command runner"))
    }
}

/// Bundle identifiers classified as web browsers.
#[derive(Debug, Clone)]
pub struct BrowserList {
    ids: HashSet<String>,
}

impl BrowserList {
    /// Create a list from bundle identifiers.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether an application is a browser.
    pub fn is_browser(&self, app_id: &str) -> bool {
        self.ids.contains(app_id)
    }

    /// Number of known browsers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for BrowserList {
    fn default() -> Self {
        Self::new(DEFAULT_BROWSERS.iter().copied())
    }
}

/// Handles to every collaborator, cloned into each bound action.
#[derive(Clone)]
pub struct Capabilities {
    pub opener: Arc<dyn UrlOpener>,
    pub clipboard: Arc<dyn Clipboard>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub keys: Arc<dyn KeyInjector>,
    pub services: Arc<dyn ServiceInvoker>,
    pub windows: Arc<dyn WindowPresenter>,
    pub commands: Arc<dyn CommandRunner>,
    pub browsers: Arc<BrowserList>,
}

impl Capabilities {
    /// Capabilities where every collaborator is [`Unavailable`].
    ///
    /// Hosts override the fields they support with struct update syntax.
    pub fn unavailable() -> Self {
        Self {
            opener: Arc::new(Unavailable),
            clipboard: Arc::new(Unavailable),
            speech: Arc::new(Unavailable),
            keys: Arc::new(Unavailable),
            services: Arc::new(Unavailable),
            windows: Arc::new(Unavailable),
            commands: Arc::new(Unavailable),
            browsers: Arc::new(BrowserList::default()),
        }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("browsers", &self.browsers.len())
            .finish_non_exhaustive()
    }
}
