// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands, their arguments, and the global output flags.

use clap::{Parser, Subcommand};
use uvdeploy::output::OutputMode;

#[derive(Parser)]
#[command(name = "uvdeploy")]
#[command(about = "Deploy a uv project to a systemd user service over SSH")]
#[command(version)]
pub struct Cli {
    /// Log remote commands and other debug detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new uvdeploy.yml configuration file
    Init {
        /// App name (also the systemd unit name)
        #[arg(long)]
        app_name: Option<String>,

        /// Target host as [user@]host[:port]
        #[arg(long)]
        host: Option<String>,

        /// Overwrite an existing uvdeploy.yml
        #[arg(short, long)]
        force: bool,
    },

    /// Remove the previous deployment, upload, install, and start the service
    Deploy,

    /// Stop the service and remove the remote app directory
    Clean,

    /// List the files a deployment would upload
    Files,

    /// Show whether the service is active on the host
    Status,
}
