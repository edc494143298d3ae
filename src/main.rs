// ABOUTME: Entry point for the uvdeploy CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use tracing_subscriber::EnvFilter;
use uvdeploy::config::{self, CONFIG_FILENAME};
use uvdeploy::error::Result;
use uvdeploy::output::Output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = cli.output_mode();

    if let Err(e) = run(cli).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(cli.output_mode());
    let cwd = env::current_dir()?;

    match cli.command {
        Commands::Init {
            app_name,
            host,
            force,
        } => {
            config::init_config(&cwd, app_name.as_deref(), host.as_deref(), force)?;
            output.success(&format!("Created {CONFIG_FILENAME}"));
            Ok(())
        }
        Commands::Deploy => commands::deploy(&cwd, output).await,
        Commands::Clean => commands::clean(&cwd, output).await,
        Commands::Files => commands::files(&cwd, &output).await,
        Commands::Status => commands::status(&cwd, &output).await,
    }
}
