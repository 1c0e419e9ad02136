//! Core types for the Selected text-action engine.
//!
//! This crate contains shared data structures that are used across all Selected crates:
//! - The selection context handed to every action
//! - Action metadata and presentation summaries
//! - Per-application conditions
//! - Configuration types
//! - Error types

mod action;
mod condition;
mod config;
mod context;
mod error;

pub use action::{ActionInfo, ActionMetadata, AfterBehavior};
pub use condition::Condition;
pub use config::{
    config_dir, config_path, ensure_config_dir, load_config, plugins_dir, AppConfig,
    CommandConfig, DEFAULT_BROWSERS,
};
pub use context::ActionContext;
pub use error::{CapabilityError, ConfigError, DescriptorError};
