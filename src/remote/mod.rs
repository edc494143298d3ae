// ABOUTME: Capability boundary between the deployment core and the remote host.
// ABOUTME: Defines the executor trait, command output, remote errors, and step names.

mod shell;

pub use shell::{quote, quote_path};

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};

/// Output from a remote command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code of the command.
    pub exit_code: u32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Errors returned by a [`RemoteExecutor`].
///
/// A non-zero exit status is not an error at this level; callers inspect
/// [`CommandOutput::exit_code`] and decide.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The connection could not be used (closed, timed out, protocol failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// A file could not be written to the remote host.
    #[error("failed to upload {} to {remote}: {reason}", local.display())]
    Upload {
        local: PathBuf,
        remote: String,
        reason: String,
    },
}

/// Run commands on, and upload files to, a single remote host.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Run a shell command and return its exit status and captured output.
    async fn run(&self, command: &str) -> Result<CommandOutput, RemoteError>;

    /// Upload `local` into the existing remote directory `remote_dir`,
    /// keeping the file name.
    async fn upload(&self, local: &Path, remote_dir: &str) -> Result<(), RemoteError>;
}

/// A named remote operation, used to give errors and logs context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    StopService,
    RemoveAppDir,
    CreateDir,
    UploadFile,
    UploadLockFile,
    InstallDependencies,
    LinkUnit,
    ReloadUnits,
    StartService,
    EnableService,
    ServiceStatus,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::StopService => "stop service",
            Step::RemoveAppDir => "remove app directory",
            Step::CreateDir => "create remote directory",
            Step::UploadFile => "upload file",
            Step::UploadLockFile => "upload lock file",
            Step::InstallDependencies => "install dependencies",
            Step::LinkUnit => "link unit file",
            Step::ReloadUnits => "reload units",
            Step::StartService => "start service",
            Step::EnableService => "enable service",
            Step::ServiceStatus => "query service status",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote path of `relative` under `base`, both `/`-separated.
pub fn join(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches('/');
    if relative.is_empty() {
        base.to_string()
    } else if base.is_empty() {
        relative.to_string()
    } else {
        format!("{base}/{relative}")
    }
}
