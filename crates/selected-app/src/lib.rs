//! Selected host library.
//!
//! Wires configuration, plugins and system collaborators into a
//! [`Dispatcher`], and exposes the result to the `selected` binary.

pub mod error;
pub mod system;

use std::path::Path;
use std::sync::Arc;

use selected_core::{load_config, ActionContext, ActionInfo, AppConfig};
use selected_plugin_api::{
    ActionRegistry, Capabilities, ConfigurationManager, Dispatcher, PluginManager,
};

pub use error::{AppError, AppResult};
use system::{system_capabilities, ShellRunner};

/// Initialize tracing with environment-based filtering.
///
/// Set `RUST_LOG` to override, e.g. `RUST_LOG=selected=trace`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("selected=debug".parse().expect("valid directive"))
            .add_directive("selected_plugin_api=debug".parse().expect("valid directive"))
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();
}

/// A loaded engine: plugins, conditions and the dispatcher over them.
pub struct Engine {
    config: AppConfig,
    plugins: Arc<PluginManager>,
    conditions: Arc<ConfigurationManager>,
    dispatcher: Dispatcher,
    commands: Option<Arc<ShellRunner>>,
}

impl Engine {
    /// Load config and plugins from disk and bind them to system collaborators.
    pub fn load(config_path: &Path, plugins_dir: &Path) -> AppResult<Self> {
        let config = load_config(config_path)?;
        let plugins = PluginManager::load_dir(plugins_dir)?;
        let (caps, commands) = system_capabilities(&config);

        let mut engine = Self::with_capabilities(config, plugins, caps);
        engine.commands = Some(commands);
        Ok(engine)
    }

    /// Build an engine over already-loaded parts.
    pub fn with_capabilities(config: AppConfig, plugins: PluginManager, caps: Capabilities) -> Self {
        plugins.apply_disabled(&config.disabled_plugins);

        let plugins = Arc::new(plugins);
        let conditions = Arc::new(ConfigurationManager::from_config(&config));
        let registry = Arc::new(ActionRegistry::new(plugins.clone(), caps));

        for identifier in registry.duplicate_identifiers() {
            tracing::warn!(
                "Action identifier '{}' is declared more than once; only the last declaration can be selected by a condition",
                identifier
            );
        }

        let dispatcher = Dispatcher::new(registry, conditions.clone());

        Self {
            config,
            plugins,
            conditions,
            dispatcher,
            commands: None,
        }
    }

    /// Loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Installed plugins.
    pub fn plugins(&self) -> &Arc<PluginManager> {
        &self.plugins
    }

    /// Per-application conditions.
    pub fn conditions(&self) -> &Arc<ConfigurationManager> {
        &self.conditions
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Summaries of the actions offered for a selection.
    pub fn actions(&self, ctx: &ActionContext) -> Vec<ActionInfo> {
        self.dispatcher
            .get_actions(ctx)
            .iter()
            .map(|action| action.info())
            .collect()
    }

    /// Run the offered action with the given identifier.
    pub fn run(&self, identifier: &str, ctx: &ActionContext) -> AppResult<ActionInfo> {
        let action = self
            .dispatcher
            .get_actions(ctx)
            .into_iter()
            .find(|action| action.identifier() == identifier)
            .ok_or_else(|| AppError::ActionNotOffered {
                identifier: identifier.to_string(),
                app_id: ctx.app_id.clone(),
            })?;

        self.dispatcher.execute(&action, ctx);
        Ok(action.info())
    }

    /// Wait for background work started by actions (shell commands).
    pub fn wait_idle(&self) {
        if let Some(commands) = &self.commands {
            commands.wait_idle();
        }
    }
}
