// ABOUTME: Application name validation.
// ABOUTME: Names double as directory names and systemd unit names, so the charset is narrow.

use std::fmt;
use thiserror::Error;

/// Longest accepted name; leaves room for the `.service` suffix in systemd's 255 limit.
const MAX_LEN: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppNameError {
    #[error("app name cannot be empty")]
    Empty,

    #[error("app name exceeds maximum length of {MAX_LEN} characters")]
    TooLong,

    #[error("app name cannot start with '{0}'")]
    InvalidStart(char),

    #[error("invalid character in app name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, AppNameError> {
        let Some(first) = value.chars().next() else {
            return Err(AppNameError::Empty);
        };

        if value.len() > MAX_LEN {
            return Err(AppNameError::TooLong);
        }

        if first == '-' || first == '.' {
            return Err(AppNameError::InvalidStart(first));
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(AppNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The systemd unit name, e.g. `demo.service`.
    pub fn unit_name(&self) -> String {
        format!("{}.service", self.0)
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
