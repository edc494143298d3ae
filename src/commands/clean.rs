// ABOUTME: Clean command implementation.
// ABOUTME: Stops the service if present and removes the remote app directory.

use super::session::{connect, disconnect, load_target};
use std::path::Path;
use uvdeploy::deploy;
use uvdeploy::diagnostics::Diagnostics;
use uvdeploy::error::Result;
use uvdeploy::output::Output;
use uvdeploy::service::StopOutcome;

pub async fn clean(project_dir: &Path, mut output: Output) -> Result<()> {
    let (config, target) = load_target(project_dir)?;

    output.start_timer();
    let mut diag = Diagnostics::default();

    let session = connect(&config, &output).await?;
    output.progress(&format!("  → Removing {}...", target.app_path()));
    let result = deploy::clean(&session, &target).await;
    disconnect(session, &config.host, &mut diag).await;

    match result? {
        StopOutcome::Stopped => output.progress("  → Stopped the running service"),
        StopOutcome::Absent => output.progress("  → No service was installed"),
    }

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.success(&format!("Cleaned {} on {}", target.app_name, target.host));
    Ok(())
}
