// ABOUTME: Deploy command implementation.
// ABOUTME: Cleans the host, then drives the deployment state machine with progress output.

use super::session::{connect, disconnect, load_target};
use std::path::Path;
use uvdeploy::deploy::{Deployment, DeploymentTarget};
use uvdeploy::diagnostics::{Diagnostics, Warning};
use uvdeploy::error::Result;
use uvdeploy::files::{FileSource, GitFiles, Manifest};
use uvdeploy::output::Output;
use uvdeploy::remote::RemoteExecutor;
use uvdeploy::service::StopOutcome;

/// Clean and deploy the project in `project_dir`.
pub async fn deploy(project_dir: &Path, mut output: Output) -> Result<()> {
    let (config, target) = load_target(project_dir)?;

    output.start_timer();
    let mut diag = Diagnostics::default();

    output.progress(&format!(
        "Deploying {} to {}:{}",
        target.app_name,
        target.host,
        target.app_path()
    ));

    let session = connect(&config, &output).await?;
    let result = run_deployment(&session, &GitFiles, project_dir, target, &output, &mut diag).await;
    disconnect(session, &config.host, &mut diag).await;
    let manifest = result?;

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.success(&format!(
        "Deployed {} ({} file(s))",
        config.app_name,
        manifest.len()
    ));
    Ok(())
}

/// Run clean, sync, install and activate in order, stopping at the first error.
async fn run_deployment<E, F>(
    executor: &E,
    source: &F,
    root: &Path,
    target: DeploymentTarget,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<Manifest>
where
    E: RemoteExecutor + ?Sized,
    F: FileSource + ?Sized,
{
    let app_path = target.app_path();

    output.progress("  → Stopping service and removing previous deployment...");
    let deployment = Deployment::new(target).clean(executor).await?;
    match deployment.stop_outcome() {
        Some(StopOutcome::Stopped) => output.progress("  → Stopped the running service"),
        Some(StopOutcome::Absent) => output.progress("  → No existing service (first deploy)"),
        None => {}
    }

    output.progress(&format!("  → Uploading files to {}...", app_path));
    let deployment = deployment.sync_files(executor, source, root).await?;
    if deployment.manifest().is_empty() {
        diag.warn(Warning::empty_manifest(format!(
            "no project files selected; only {} was uploaded",
            deployment.target().lock_file
        )));
    }
    output.progress(&format!(
        "  → Uploaded {} file(s) and {}",
        deployment.manifest().len(),
        deployment.target().lock_file
    ));

    output.progress("  → Installing dependencies...");
    let deployment = deployment.install_dependencies(executor).await?;

    output.progress("  → Starting service...");
    let deployment = deployment.activate(executor).await?;

    output.progress(&format!(
        "  ✓ {} started and enabled",
        deployment.target().app_name.unit_name()
    ));

    Ok(deployment.finish())
}
