//! `selected` - list and run text actions for a selection.

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use selected_app::{init_tracing, AppResult, Engine};
use selected_core::{config_path, ensure_config_dir, plugins_dir, ActionContext, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "selected", version, about = "Text actions for the current selection")]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/selected/config.toml)
    #[arg(long, env = "SELECTED_CONFIG")]
    config: Option<PathBuf>,

    /// Plugins directory (defaults to ~/.config/selected/plugins)
    #[arg(long, env = "SELECTED_PLUGINS")]
    plugins: Option<PathBuf>,

    /// Bundle identifier of the application the text was selected in
    #[arg(long)]
    app_id: String,

    /// Selected text; read from stdin when omitted
    #[arg(long)]
    text: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the actions offered for the selection
    List {
        /// Print JSON instead of one action per line
        #[arg(long)]
        json: bool,
    },
    /// Run an offered action by identifier
    Run { identifier: String },
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("selected: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<()> {
    if cli.config.is_none() || cli.plugins.is_none() {
        if let Err(e) = ensure_config_dir() {
            tracing::warn!("Could not create config directory: {}", e);
        }
    }

    let config = match cli.config {
        Some(path) => path,
        None => config_path().ok_or(ConfigError::NoConfigDir)?,
    };
    let plugins = match cli.plugins {
        Some(path) => path,
        None => plugins_dir().ok_or(ConfigError::NoConfigDir)?,
    };

    let text = match cli.text {
        Some(text) => text,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let engine = Engine::load(&config, &plugins)?;
    let ctx = ActionContext::new(text, cli.app_id);

    match cli.command {
        Commands::List { json } => {
            let infos = engine.actions(&ctx);
            if json {
                println!("{}", serde_json::to_string_pretty(&infos)?);
            } else {
                for info in infos {
                    println!("{}\t{}", info.identifier, info.title);
                }
            }
        }
        Commands::Run { identifier } => {
            let info = engine.run(&identifier, &ctx)?;
            engine.wait_idle();
            tracing::debug!("'{}' done (after: {:?})", info.identifier, info.after);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "selected",
            "--app-id",
            "com.apple.Safari",
            "--text",
            "hello",
            "run",
            "selected.copy",
        ])
        .unwrap();
        assert_eq!(cli.app_id, "com.apple.Safari");
        assert_eq!(cli.text.as_deref(), Some("hello"));
        assert!(matches!(cli.command, Commands::Run { ref identifier } if identifier == "selected.copy"));
    }

    #[test]
    fn test_app_id_required() {
        let err = Cli::try_parse_from(["selected", "list"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
