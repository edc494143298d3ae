// ABOUTME: Service controller error types with the SNAFU pattern.
// ABOUTME: Separates transport failures from commands that ran and exited non-zero.

use snafu::Snafu;

use crate::remote::{RemoteError, Step};

/// Errors from managing the remote service.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ServiceError {
    #[snafu(display("{step} for {unit} failed: {source}"))]
    Transport {
        step: Step,
        unit: String,
        source: RemoteError,
    },

    #[snafu(display(
        "{step} for {unit} failed: `{command}` exited with status {exit_code}: {stderr}"
    ))]
    CommandFailed {
        step: Step,
        unit: String,
        command: String,
        exit_code: u32,
        stderr: String,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// The remote host could not be reached or the session broke.
    Transport,
    /// A systemctl or link command ran and exited non-zero.
    CommandFailure,
}

impl ServiceError {
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            ServiceError::Transport { .. } => ServiceErrorKind::Transport,
            ServiceError::CommandFailed { .. } => ServiceErrorKind::CommandFailure,
        }
    }

    /// The lifecycle step that failed.
    pub fn step(&self) -> Step {
        match self {
            ServiceError::Transport { step, .. } | ServiceError::CommandFailed { step, .. } => {
                *step
            }
        }
    }
}
