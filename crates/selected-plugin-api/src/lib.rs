//! Action resolution and dispatch engine for Selected.
//!
//! This crate turns declared actions into executable ones and decides which
//! of them to offer for a selection:
//! - Capability traits for the OS and UI collaborators actions drive
//! - One `ActionKind` implementation per action type
//! - Descriptor parsing with load-time validation
//! - Plugin manifests (TOML or Lua) and the plugin manager
//! - The action registry (plugins + built-ins)
//! - Per-application conditions and the dispatcher

pub mod capabilities;
pub mod conditions;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod executable;
pub mod keymap;
pub mod kinds;
pub mod lua;
pub mod plugins;
pub mod registry;

// Re-export commonly used types
pub use capabilities::{
    AppLocation, BrowserList, Capabilities, Clipboard, CommandRunner, KeyInjector,
    ServiceInvoker, SpeechSynthesizer, UrlOpener, Utterance, WindowPresenter,
};
pub use conditions::{ConditionResolver, ConfigurationManager};
pub use descriptor::{ActionDescriptor, ActionKindSpec};
pub use dispatcher::Dispatcher;
pub use error::{PluginError, PluginResult};
pub use executable::ExecutableAction;
pub use keymap::{KeyCombo, Modifiers};
pub use kinds::ActionKind;
pub use plugins::{Plugin, PluginInfo, PluginManager, PluginManifest, PluginSource};
pub use registry::{builtin_descriptors, ActionRegistry};

// Re-export selected_core types for convenience
pub use selected_core::{
    ActionContext, ActionInfo, ActionMetadata, AfterBehavior, CapabilityError, Condition,
    DescriptorError,
};
