// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::collections::HashSet;
use std::path::Path;

use crate::files::{FileSource, normalize_relative, select_files};
use crate::remote::{CommandOutput, RemoteExecutor, Step, join, quote_path};
use crate::service::ServiceController;

use super::Deployment;
use super::error::DeployError;
use super::state::{Activated, Cleaned, Initialized, Installed, Synced};

// =============================================================================
// Internal Helpers
// =============================================================================

/// Run a command, failing on transport errors and non-zero exits.
async fn run_checked<E>(
    executor: &E,
    step: Step,
    command: &str,
) -> Result<CommandOutput, DeployError>
where
    E: RemoteExecutor + ?Sized,
{
    tracing::debug!(step = %step, "Running: {}", command);
    let output = executor
        .run(command)
        .await
        .map_err(|source| DeployError::Remote { step, source })?;

    if !output.success() {
        return Err(DeployError::CommandFailed {
            step,
            command: command.to_string(),
            exit_code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output)
}

/// `mkdir -p` a remote directory unless this run already created it.
async fn ensure_dir<E>(
    executor: &E,
    dir: &str,
    created: &mut HashSet<String>,
) -> Result<(), DeployError>
where
    E: RemoteExecutor + ?Sized,
{
    if created.contains(dir) {
        return Ok(());
    }
    run_checked(executor, Step::CreateDir, &format!("mkdir -p {}", quote_path(dir))).await?;
    created.insert(dir.to_string());
    Ok(())
}

async fn upload<E>(
    executor: &E,
    step: Step,
    local: &Path,
    remote_dir: &str,
) -> Result<(), DeployError>
where
    E: RemoteExecutor + ?Sized,
{
    tracing::debug!(step = %step, "Uploading {} to {}", local.display(), remote_dir);
    executor
        .upload(local, remote_dir)
        .await
        .map_err(|source| DeployError::Remote { step, source })
}

// =============================================================================
// Initialized -> Cleaned
// =============================================================================

impl Deployment<Initialized> {
    /// Stop the service if it exists, then remove the remote app directory.
    ///
    /// # Errors
    ///
    /// A missing unit is not an error. Any other stop failure, or failure to
    /// remove the directory, is returned.
    pub async fn clean<E>(self, executor: &E) -> Result<Deployment<Cleaned>, DeployError>
    where
        E: RemoteExecutor + ?Sized,
    {
        let outcome = ServiceController::new(executor, &self.target).stop().await?;

        let app_path = self.target.app_path();
        run_checked(
            executor,
            Step::RemoveAppDir,
            &format!("rm -rf {}", quote_path(&app_path)),
        )
        .await?;
        tracing::info!("Removed {}", app_path);

        Ok(self.transition(Cleaned {
            stop: Some(outcome),
        }))
    }
}

// =============================================================================
// Cleaned -> Synced
// =============================================================================

impl Deployment<Cleaned> {
    /// Upload every manifest file under `root`, then the lock file.
    ///
    /// Remote parent directories are created as needed. The lock file is
    /// uploaded exactly once to the app root, whether or not the manifest
    /// lists it.
    pub async fn sync_files<E, F>(
        self,
        executor: &E,
        source: &F,
        root: &Path,
    ) -> Result<Deployment<Synced>, DeployError>
    where
        E: RemoteExecutor + ?Sized,
        F: FileSource + ?Sized,
    {
        let manifest = select_files(source, root, &self.target.exclusions).await?;
        let app_path = self.target.app_path();
        let lock_file = normalize_relative(&self.target.lock_file)
            .unwrap_or_else(|| self.target.lock_file.clone());

        let mut created = HashSet::new();
        ensure_dir(executor, &app_path, &mut created).await?;

        for path in &manifest {
            if normalize_relative(path).as_deref() == Some(lock_file.as_str()) {
                continue;
            }
            let remote_dir = match path.rsplit_once('/') {
                Some((parent, _)) => join(&app_path, parent),
                None => app_path.clone(),
            };
            ensure_dir(executor, &remote_dir, &mut created).await?;
            upload(executor, Step::UploadFile, &root.join(path), &remote_dir).await?;
        }

        upload(executor, Step::UploadLockFile, &root.join(&lock_file), &app_path).await?;
        tracing::info!("Uploaded {} file(s) to {}", manifest.len(), app_path);

        Ok(self.transition(Synced { manifest }))
    }
}

// =============================================================================
// Synced -> Installed
// =============================================================================

impl Deployment<Synced> {
    /// Run `uv sync` inside the app directory.
    pub async fn install_dependencies<E>(
        self,
        executor: &E,
    ) -> Result<Deployment<Installed>, DeployError>
    where
        E: RemoteExecutor + ?Sized,
    {
        let command = format!(
            "cd {} && {} sync",
            quote_path(&self.target.app_path()),
            quote_path(self.target.uv_command())
        );
        run_checked(executor, Step::InstallDependencies, &command).await?;
        tracing::info!("Installed dependencies for {}", self.target.app_name);

        let Synced { manifest } = self.state;
        Ok(Deployment {
            target: self.target,
            state: Installed { manifest },
        })
    }
}

// =============================================================================
// Installed -> Activated
// =============================================================================

impl Deployment<Installed> {
    /// Link, reload, start and enable the service.
    pub async fn activate<E>(self, executor: &E) -> Result<Deployment<Activated>, DeployError>
    where
        E: RemoteExecutor + ?Sized,
    {
        ServiceController::new(executor, &self.target)
            .activate()
            .await?;

        let Installed { manifest } = self.state;
        Ok(Deployment {
            target: self.target,
            state: Activated { manifest },
        })
    }
}
