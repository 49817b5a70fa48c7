//! Lectern CLI and REST API entry point.
//!
//! Binary name: `lectern`
//!
//! Parses CLI arguments, sets up tracing, loads `lectern.toml`, then
//! dispatches to the requested command.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, ConfigCommand};
use lectern_infra::config::load_config;
use lectern_observe::tracing_setup::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions need neither tracing nor config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "lectern", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(cli.otel, cli.log_directives())
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(&cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config).await?;

    match &cli.command {
        Commands::Serve { demo, port, host } => {
            cli::serve::serve(&config, *demo, host, *port).await?;
        }
        Commands::Config {
            action: ConfigCommand::Check,
        } => {
            cli::config::check(&cli.config, &config)?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
