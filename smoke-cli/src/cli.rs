//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in once, then run probe suites against an environment
    Run {
        /// Environment name (local, dev, int, performance, ...)
        #[arg(long, value_name = "NAME")]
        env: Option<String>,

        /// Built-in suite to run; repeatable. All built-in suites when omitted
        #[arg(long = "suite", value_name = "NAME")]
        suites: Vec<String>,

        /// Suite file to run; repeatable
        #[arg(long = "suite-file", value_name = "PATH")]
        suite_files: Vec<PathBuf>,

        /// Only run probes whose name contains this text
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,

        /// Print the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// List suites and their probes
    List {
        /// Also list suites from these files
        #[arg(long = "suite-file", value_name = "PATH")]
        suite_files: Vec<PathBuf>,
    },

    /// Environment table commands
    Env {
        #[command(subcommand)]
        env_cmd: EnvCommands,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum EnvCommands {
    /// Show the base-URL table of an environment
    Show {
        /// Environment name; the configured default when omitted
        #[arg(long, value_name = "NAME")]
        env: Option<String>,
    },

    /// List configured environments
    List,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Write a sample configuration file with the built-in defaults
    Generate {
        /// Output file path
        #[arg(long, value_name = "PATH")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
