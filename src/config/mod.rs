// ABOUTME: Configuration types, project file discovery, and validation.
// ABOUTME: Reads uvdeploy.yml or pyproject.toml [tool.deploy], then applies DEPLOY_* overrides.

mod env;
mod host;
mod init;

pub use env::{ENV_KEYS, ENV_PREFIX, env_var};
pub use host::HostConfig;
pub use init::init_config;

use crate::error::{Error, Result};
use crate::files::normalize_relative;
use crate::ssh::SessionConfig;
use crate::types::AppName;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "uvdeploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "uvdeploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".uvdeploy/config.yml";
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

pub const DEFAULT_LOCK_FILE: &str = "uv.lock";

/// Validated settings for one deployment, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: HostConfig,
    /// Remote base directory the app directory is created in.
    pub dir: String,
    pub app_name: AppName,
    /// Remote path to uv, when it is not on the login `PATH`.
    pub host_uv_path: Option<String>,
    /// Regular expressions; matching paths are not uploaded.
    pub ignore_list: Vec<String>,
    pub lock_file: String,
    pub command_timeout: Duration,
}

/// Settings as found in a project file, before overrides and validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialConfig {
    #[serde(default, deserialize_with = "host::deserialize_host_option")]
    pub host: Option<HostConfig>,

    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default)]
    pub app_name: Option<String>,

    #[serde(default)]
    pub host_uv_path: Option<String>,

    #[serde(default)]
    pub ignore_list: Option<Vec<String>>,

    #[serde(default)]
    pub lock_file: Option<String>,

    #[serde(default, with = "humantime_serde")]
    pub command_timeout: Option<Duration>,
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: PyProjectTools,
}

#[derive(Debug, Default, Deserialize)]
struct PyProjectTools {
    #[serde(default)]
    deploy: Option<PartialConfig>,
}

fn default_command_timeout() -> Duration {
    Duration::from_secs(300)
}

impl PartialConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// Read the `[tool.deploy]` table; `None` if the table is absent.
    pub fn from_pyproject(content: &str) -> Result<Option<Self>> {
        let pyproject: PyProject = toml::from_str(content)?;
        Ok(pyproject.tool.deploy)
    }

    /// Find the project file in `dir`.
    ///
    /// YAML files are tried first, then `pyproject.toml` if it has a
    /// `[tool.deploy]` table. Returns the path that was used, if any.
    pub fn find(dir: &Path) -> Result<Option<(PathBuf, Self)>> {
        let yaml_candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in yaml_candidates {
            if path.is_file() {
                let partial = Self::from_yaml(&std::fs::read_to_string(&path)?)?;
                return Ok(Some((path, partial)));
            }
        }

        let pyproject = dir.join(PYPROJECT_FILENAME);
        if pyproject.is_file()
            && let Some(partial) = Self::from_pyproject(&std::fs::read_to_string(&pyproject)?)?
        {
            return Ok(Some((pyproject, partial)));
        }

        Ok(None)
    }

    /// Validate and fill defaults.
    pub fn build(self) -> Result<Config> {
        let host = self.host.ok_or_else(|| missing("host"))?;
        let dir = non_empty("dir", self.dir.ok_or_else(|| missing("dir"))?)?;
        let app_name = self.app_name.ok_or_else(|| missing("app_name"))?;
        let app_name = AppName::new(&app_name).map_err(|e| Error::InvalidSetting {
            name: "app_name".to_string(),
            reason: e.to_string(),
        })?;
        let lock_file = self
            .lock_file
            .unwrap_or_else(|| DEFAULT_LOCK_FILE.to_string());
        let lock_file =
            normalize_relative(&lock_file).ok_or_else(|| Error::InvalidSetting {
                name: "lock_file".to_string(),
                reason: format!("{lock_file:?} must be a path inside the project"),
            })?;

        Ok(Config {
            host,
            dir,
            app_name,
            host_uv_path: self.host_uv_path.filter(|p| !p.trim().is_empty()),
            ignore_list: self.ignore_list.unwrap_or_default(),
            lock_file,
            command_timeout: self
                .command_timeout
                .unwrap_or_else(default_command_timeout),
        })
    }
}

fn missing(name: &'static str) -> Error {
    Error::MissingSetting {
        name,
        env: env_var(&name.to_ascii_uppercase()),
    }
}

fn non_empty(name: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::InvalidSetting {
            name: name.to_string(),
            reason: "cannot be empty".to_string(),
        });
    }
    Ok(value)
}

impl Config {
    /// Parse a complete YAML config, without environment overrides.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        PartialConfig::from_yaml(yaml)?.build()
    }

    /// Load settings from the project file in `dir` (if any) and the process
    /// environment.
    pub fn discover(dir: &Path) -> Result<Self> {
        Self::discover_with(dir, |name| std::env::var(name).ok())
    }

    /// Like [`Config::discover`], reading overrides through `lookup`.
    pub fn discover_with<F>(dir: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut partial = match PartialConfig::find(dir)? {
            Some((path, partial)) => {
                tracing::debug!("Loaded settings from {}", path.display());
                partial
            }
            None => {
                tracing::debug!("No project file in {}, using environment only", dir.display());
                PartialConfig::default()
            }
        };
        partial.apply_env(lookup)?;
        partial.build()
    }

    pub fn session_config(&self) -> SessionConfig {
        self.host.session_config(self.command_timeout)
    }

    pub fn template() -> Self {
        Config {
            host: HostConfig {
                host: "server.example.com".to_string(),
                port: 22,
                user: Some("deploy".to_string()),
                key_path: None,
                known_hosts: None,
                trust_first_connection: true,
            },
            dir: "~/apps".to_string(),
            app_name: AppName::new("my-app").expect("template app name is valid"),
            host_uv_path: None,
            ignore_list: vec![r"^\.".to_string(), "^tests/".to_string()],
            lock_file: DEFAULT_LOCK_FILE.to_string(),
            command_timeout: default_command_timeout(),
        }
    }
}
