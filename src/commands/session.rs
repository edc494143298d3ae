// ABOUTME: Shared helpers for loading the target and managing the SSH session.
// ABOUTME: Eliminates duplication across deploy, clean, and status commands.

use std::path::Path;
use uvdeploy::config::{Config, HostConfig};
use uvdeploy::deploy::DeploymentTarget;
use uvdeploy::diagnostics::{Diagnostics, Warning};
use uvdeploy::error::Result;
use uvdeploy::output::Output;
use uvdeploy::ssh::Session;

/// Load configuration from `project_dir` and the environment.
///
/// Every configuration error surfaces here, before any connection is made.
pub fn load_target(project_dir: &Path) -> Result<(Config, DeploymentTarget)> {
    let config = Config::discover(project_dir)?;
    let target = DeploymentTarget::from_config(&config)?;
    Ok((config, target))
}

/// Open the single SSH session used for the whole run.
pub async fn connect(config: &Config, output: &Output) -> Result<Session> {
    output.progress(&format!("  → Connecting to {}...", config.host));
    Ok(Session::connect(config.session_config()).await?)
}

/// Close the session; failure is recorded as a warning.
pub async fn disconnect(session: Session, host: &HostConfig, diag: &mut Diagnostics) {
    if let Err(e) = session.disconnect().await {
        diag.warn(Warning::ssh_disconnect(format!(
            "SSH disconnect failed for {}: {}",
            host, e
        )));
    }
}
