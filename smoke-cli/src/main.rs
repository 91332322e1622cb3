//! optisam-smoke CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use smoke_config::{ConfigLoader, SmokeConfig};
use std::path::PathBuf;
use tracing::{debug, warn};

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands, ConfigCommands, EnvCommands};

/// Load configuration from a file, or defaults plus `OPTISAM_SMOKE_*` overrides
fn load_config(config_path: Option<&PathBuf>) -> Result<SmokeConfig> {
    let loader = ConfigLoader::new();
    match config_path {
        Some(path) => loader
            .from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => loader
            .from_env()
            .context("Failed to load configuration from environment"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration first: it carries the logging settings
    let config = load_config(cli.config.as_ref())?;
    utils::init_tracing(&config.logging, cli.log_level.as_ref())?;

    debug!("optisam-smoke starting");

    match cli.command {
        Some(Commands::Run {
            env,
            suites,
            suite_files,
            filter,
            json,
        }) => {
            let args = commands::RunArgs {
                env,
                suites,
                suite_files,
                filter,
                json,
            };
            commands::run_command(&config, args).await
        }
        Some(Commands::List { suite_files }) => commands::list_command(&suite_files),
        Some(Commands::Env { env_cmd }) => match env_cmd {
            EnvCommands::Show { env } => commands::env_show_command(&config, env.as_deref()),
            EnvCommands::List => commands::env_list_command(&config),
        },
        Some(Commands::Config { config_cmd }) => match config_cmd {
            ConfigCommands::Validate { config_file } => {
                commands::config_validate_command(&config_file)
            }
            ConfigCommands::Generate { output, force } => {
                commands::config_generate_command(&output, force)
            }
        },
        None => {
            warn!("No command specified");
            println!("No command specified. Use --help to see available commands.");
            Ok(())
        }
    }
}
