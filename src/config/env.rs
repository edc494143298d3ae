// ABOUTME: Environment variable overrides for configuration.
// ABOUTME: DEPLOY_* variables take precedence over values read from the project file.

use std::time::Duration;

use super::PartialConfig;
use super::host::HostConfig;
use crate::error::{Error, Result};

/// Prefix shared by every override variable.
pub const ENV_PREFIX: &str = "DEPLOY_";

/// Setting names that can be overridden, without the prefix.
pub const ENV_KEYS: &[&str] = &[
    "HOST",
    "DIR",
    "APP_NAME",
    "HOST_UV_PATH",
    "IGNORE_LIST",
    "LOCK_FILE",
    "COMMAND_TIMEOUT",
];

/// Full variable name for a setting, e.g. `DEPLOY_APP_NAME`.
pub fn env_var(key: &str) -> String {
    format!("{ENV_PREFIX}{key}")
}

fn invalid(var: String, reason: impl ToString) -> Error {
    Error::InvalidSetting {
        name: var,
        reason: reason.to_string(),
    }
}

impl PartialConfig {
    /// Overlay values found through `lookup` (usually `std::env::var`).
    ///
    /// `DEPLOY_IGNORE_LIST` is a JSON array of strings and
    /// `DEPLOY_COMMAND_TIMEOUT` a human-readable duration such as `90s`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ENV_KEYS {
            let var = env_var(key);
            let Some(value) = lookup(&var) else {
                continue;
            };
            tracing::debug!("Using {} from environment", var);

            match *key {
                "HOST" => self.host = Some(HostConfig::parse(&value).map_err(|e| invalid(var, e))?),
                "DIR" => self.dir = Some(value),
                "APP_NAME" => self.app_name = Some(value),
                "HOST_UV_PATH" => self.host_uv_path = Some(value),
                "IGNORE_LIST" => {
                    let list: Vec<String> =
                        serde_json::from_str(&value).map_err(|e| invalid(var, e))?;
                    self.ignore_list = Some(list);
                }
                "LOCK_FILE" => self.lock_file = Some(value),
                "COMMAND_TIMEOUT" => {
                    let timeout: Duration = humantime_serde::re::humantime::parse_duration(&value)
                        .map_err(|e| invalid(var, e))?;
                    self.command_timeout = Some(timeout);
                }
                _ => unreachable!("unhandled override {key}"),
            }
        }
        Ok(())
    }
}
