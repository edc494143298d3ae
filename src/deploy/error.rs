// ABOUTME: Error types for deployment operations.
// ABOUTME: Every variant records the step that failed so a run can be diagnosed without rerunning.

use crate::files::FileSourceError;
use crate::remote::{RemoteError, Step};
use crate::service::{ServiceError, ServiceErrorKind};

/// Errors that abort a clean or deploy run.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The executor failed: transport loss or an upload that could not be written.
    #[error("{step} failed: {source}")]
    Remote {
        step: Step,
        #[source]
        source: RemoteError,
    },

    /// A remote command ran and exited non-zero.
    #[error("{step} failed: `{command}` exited with status {exit_code}: {stderr}")]
    CommandFailed {
        step: Step,
        command: String,
        exit_code: u32,
        stderr: String,
    },

    /// Tracked files could not be listed.
    #[error("failed to list project files: {0}")]
    FileSelection(#[from] FileSourceError),

    /// Stopping or activating the service failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    /// Connection lost or unusable.
    Transport,
    /// A remote command exited non-zero.
    CommandFailure,
    /// A file could not be written to the remote host.
    UploadFailure,
    /// Local file listing failed.
    FileSelection,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Remote {
                source: RemoteError::Upload { .. },
                ..
            } => DeployErrorKind::UploadFailure,
            DeployError::Remote { .. } => DeployErrorKind::Transport,
            DeployError::CommandFailed { .. } => DeployErrorKind::CommandFailure,
            DeployError::FileSelection(_) => DeployErrorKind::FileSelection,
            DeployError::Service(e) => match e.kind() {
                ServiceErrorKind::Transport => DeployErrorKind::Transport,
                ServiceErrorKind::CommandFailure => DeployErrorKind::CommandFailure,
            },
        }
    }

    /// The step that failed, if the failure happened on the remote host.
    pub fn step(&self) -> Option<Step> {
        match self {
            DeployError::Remote { step, .. } | DeployError::CommandFailed { step, .. } => {
                Some(*step)
            }
            DeployError::Service(e) => Some(e.step()),
            DeployError::FileSelection(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn upload_errors_classify_as_upload_failure() {
        let err = DeployError::Remote {
            step: Step::UploadFile,
            source: RemoteError::Upload {
                local: PathBuf::from("app.py"),
                remote: "/srv/demo".to_string(),
                reason: "Permission denied".to_string(),
            },
        };
        assert_eq!(err.kind(), DeployErrorKind::UploadFailure);
        assert_eq!(err.step(), Some(Step::UploadFile));
    }

    #[test]
    fn transport_errors_classify_as_transport() {
        let err = DeployError::Remote {
            step: Step::CreateDir,
            source: RemoteError::Transport("channel closed".to_string()),
        };
        assert_eq!(err.kind(), DeployErrorKind::Transport);
    }

    #[test]
    fn command_failure_message_has_context() {
        let err = DeployError::CommandFailed {
            step: Step::InstallDependencies,
            command: "cd /srv/demo && uv sync".to_string(),
            exit_code: 2,
            stderr: "error: lock file out of date".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with("install dependencies failed"));
        assert!(message.contains("uv sync"));
        assert!(message.contains("status 2"));
        assert_eq!(err.kind(), DeployErrorKind::CommandFailure);
    }
}
