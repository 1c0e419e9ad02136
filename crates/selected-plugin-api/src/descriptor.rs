//! Action descriptors - declared actions as parsed from manifests.
//!
//! A manifest entry carries `meta` plus exactly one kind table:
//!
//! ```toml
//! [[actions]]
//! meta = { title = "Search", icon = "symbol:magnifyingglass", identifier = "demo.search" }
//! url = { url = "https://www.google.com/search?q={text}" }
//! ```
//!
//! The raw shape allows any number of kind tables; conversion into
//! [`ActionDescriptor`] rejects zero or several, so a descriptor that exists
//! always has exactly one kind.

use serde::{Deserialize, Serialize};

use selected_core::{ActionMetadata, DescriptorError};

use crate::capabilities::Capabilities;
use crate::executable::ExecutableAction;
use crate::kinds::{
    ActionKind, ChatAction, CopyAction, KeycomboAction, RunCommandAction, ServiceAction,
    SpeakAction, TranslationAction, UrlAction,
};

/// The kind of a declared action. Exactly one per descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKindSpec {
    Url(UrlAction),
    Service(ServiceAction),
    KeyCombo(KeycomboAction),
    Copy(CopyAction),
    Speak(SpeakAction),
    Chat(ChatAction),
    Translate(TranslationAction),
    RunCommand(RunCommandAction),
}

impl ActionKindSpec {
    /// The kind implementation behind this variant.
    pub fn as_kind(&self) -> &dyn ActionKind {
        match self {
            Self::Url(kind) => kind,
            Self::Service(kind) => kind,
            Self::KeyCombo(kind) => kind,
            Self::Copy(kind) => kind,
            Self::Speak(kind) => kind,
            Self::Chat(kind) => kind,
            Self::Translate(kind) => kind,
            Self::RunCommand(kind) => kind,
        }
    }
}

/// A declared action: metadata plus one kind.
///
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub struct ActionDescriptor {
    meta: ActionMetadata,
    kind: ActionKindSpec,
}

impl ActionDescriptor {
    /// Create a descriptor.
    ///
    /// Fails if the metadata has an empty identifier.
    pub fn new(meta: ActionMetadata, kind: ActionKindSpec) -> Result<Self, DescriptorError> {
        if meta.identifier.trim().is_empty() {
            return Err(DescriptorError::MissingIdentifier { title: meta.title });
        }
        Ok(Self { meta, kind })
    }

    /// Create a descriptor whose identifier is known to be valid.
    pub(crate) fn from_parts(meta: ActionMetadata, kind: ActionKindSpec) -> Self {
        debug_assert!(!meta.identifier.trim().is_empty());
        Self { meta, kind }
    }

    /// Display metadata.
    pub fn meta(&self) -> &ActionMetadata {
        &self.meta
    }

    /// Declared identifier.
    pub fn identifier(&self) -> &str {
        &self.meta.identifier
    }

    /// The declared kind.
    pub fn kind(&self) -> &ActionKindSpec {
        &self.kind
    }

    /// Bind this descriptor to the given capabilities.
    pub fn generate(&self, caps: &Capabilities) -> ExecutableAction {
        self.kind.as_kind().generate(self.meta.clone(), caps)
    }
}

/// Manifest shape of an action, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAction {
    pub meta: ActionMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<UrlAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keycombo: Option<KeycomboAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy: Option<CopyAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speak: Option<SpeakAction>,

    #[serde(default, alias = "chat", skip_serializing_if = "Option::is_none")]
    pub gpt: Option<ChatAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<TranslationAction>,

    #[serde(
        default,
        rename = "runCommand",
        alias = "run_command",
        skip_serializing_if = "Option::is_none"
    )]
    pub run_command: Option<RunCommandAction>,
}

impl TryFrom<RawAction> for ActionDescriptor {
    type Error = DescriptorError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let RawAction {
            meta,
            url,
            service,
            keycombo,
            copy,
            speak,
            gpt,
            translation,
            run_command,
        } = raw;

        let mut kinds: Vec<ActionKindSpec> = Vec::new();
        kinds.extend(url.map(ActionKindSpec::Url));
        kinds.extend(service.map(ActionKindSpec::Service));
        kinds.extend(keycombo.map(ActionKindSpec::KeyCombo));
        kinds.extend(copy.map(ActionKindSpec::Copy));
        kinds.extend(speak.map(ActionKindSpec::Speak));
        kinds.extend(gpt.map(ActionKindSpec::Chat));
        kinds.extend(translation.map(ActionKindSpec::Translate));
        kinds.extend(run_command.map(ActionKindSpec::RunCommand));

        if kinds.len() > 1 {
            return Err(DescriptorError::MultipleKinds {
                identifier: meta.identifier,
                kinds: kinds.iter().map(|k| k.as_kind().kind_name()).collect(),
            });
        }

        match kinds.pop() {
            Some(kind) => ActionDescriptor::new(meta, kind),
            None => Err(DescriptorError::MissingKind {
                identifier: meta.identifier,
            }),
        }
    }
}

impl From<ActionDescriptor> for RawAction {
    fn from(descriptor: ActionDescriptor) -> Self {
        let mut raw = RawAction {
            meta: descriptor.meta,
            ..RawAction::default()
        };
        match descriptor.kind {
            ActionKindSpec::Url(kind) => raw.url = Some(kind),
            ActionKindSpec::Service(kind) => raw.service = Some(kind),
            ActionKindSpec::KeyCombo(kind) => raw.keycombo = Some(kind),
            ActionKindSpec::Copy(kind) => raw.copy = Some(kind),
            ActionKindSpec::Speak(kind) => raw.speak = Some(kind),
            ActionKindSpec::Chat(kind) => raw.gpt = Some(kind),
            ActionKindSpec::Translate(kind) => raw.translation = Some(kind),
            ActionKindSpec::RunCommand(kind) => raw.run_command = Some(kind),
        }
        raw
    }
}
