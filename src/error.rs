// ABOUTME: Application-wide error types for uvdeploy.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::DeployError;
use crate::files::{FileSourceError, InvalidPattern};
use crate::service::ServiceError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("missing required setting `{name}` (set it in the project file or {env})")]
    MissingSetting { name: &'static str, env: String },

    #[error("invalid value for {name}: {reason}")]
    InvalidSetting { name: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Pattern(#[from] InvalidPattern),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("SSH error: {0}")]
    Ssh(#[from] crate::ssh::Error),

    #[error(transparent)]
    Files(#[from] FileSourceError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Deploy(#[from] DeployError),
}

impl Error {
    /// Whether the error was found before any remote interaction.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::AlreadyExists(_)
                | Error::MissingSetting { .. }
                | Error::InvalidSetting { .. }
                | Error::InvalidConfig(_)
                | Error::Pattern(_)
                | Error::Yaml(_)
                | Error::Toml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
