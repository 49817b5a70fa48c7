//! CLI command definitions for the `lectern` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod config;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use lectern_infra::config::DEFAULT_CONFIG_FILE;

/// Weather-forecast CRUD and key-phrase extraction demo server.
#[derive(Parser)]
#[command(name = "lectern", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default tracing directives for the chosen verbosity.
    pub fn log_directives(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,lectern=debug,tower_http=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Which demo routes to mount.
        #[arg(value_enum, default_value_t = DemoSelection::All)]
        demo: DemoSelection,

        /// Port to listen on.
        #[arg(short, long, default_value = "9112")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Load and validate the configuration, then print the resolved settings.
    Check,
}

/// Demo routes mounted by `lectern serve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoSelection {
    /// Forecast CRUD only.
    Forecast,
    /// Key-phrase chat only (requires AI settings).
    Chat,
    /// Both demos.
    All,
}

impl DemoSelection {
    pub fn includes_forecast(self) -> bool {
        matches!(self, DemoSelection::Forecast | DemoSelection::All)
    }

    pub fn includes_chat(self) -> bool {
        matches!(self, DemoSelection::Chat | DemoSelection::All)
    }
}
