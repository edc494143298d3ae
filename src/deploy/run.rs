// ABOUTME: Whole-run compositions of the deployment transitions.
// ABOUTME: Clean, deploy, and the clean-then-deploy sequence the CLI uses.

use std::path::Path;

use crate::files::{FileSource, Manifest};
use crate::remote::RemoteExecutor;
use crate::service::StopOutcome;

use super::{DeployError, Deployment, DeploymentTarget};

/// Stop the service and remove the remote app directory.
pub async fn clean<E>(executor: &E, target: &DeploymentTarget) -> Result<StopOutcome, DeployError>
where
    E: RemoteExecutor + ?Sized,
{
    let cleaned = Deployment::new(target.clone()).clean(executor).await?;
    Ok(cleaned.stop_outcome().unwrap_or(StopOutcome::Absent))
}

/// Upload, install and activate without cleaning first.
///
/// Files deleted from the project since the previous deployment are left on
/// the host; use [`clean_and_deploy`] for a faithful mirror.
pub async fn deploy<E, F>(
    executor: &E,
    source: &F,
    root: &Path,
    target: &DeploymentTarget,
) -> Result<Manifest, DeployError>
where
    E: RemoteExecutor + ?Sized,
    F: FileSource + ?Sized,
{
    let deployment = Deployment::assume_clean(target.clone())
        .sync_files(executor, source, root)
        .await?
        .install_dependencies(executor)
        .await?
        .activate(executor)
        .await?;
    Ok(deployment.finish())
}

/// Clean the host, then deploy from scratch.
pub async fn clean_and_deploy<E, F>(
    executor: &E,
    source: &F,
    root: &Path,
    target: &DeploymentTarget,
) -> Result<Manifest, DeployError>
where
    E: RemoteExecutor + ?Sized,
    F: FileSource + ?Sized,
{
    let deployment = Deployment::new(target.clone())
        .clean(executor)
        .await?
        .sync_files(executor, source, root)
        .await?
        .install_dependencies(executor)
        .await?
        .activate(executor)
        .await?;
    Ok(deployment.finish())
}
