// ABOUTME: The immutable description of where and what to deploy.
// ABOUTME: Built once from configuration; all remote paths are derived from it.

use crate::config::{Config, HostConfig};
use crate::files::{ExclusionPattern, InvalidPattern};
use crate::remote::join;
use crate::service::SYSTEMD_USER_DIR;
use crate::types::AppName;

/// Uv binary used when no remote path is configured.
pub const DEFAULT_UV: &str = "uv";

/// A single app on a single host.
#[derive(Debug, Clone)]
pub struct DeploymentTarget {
    pub host: HostConfig,
    /// Remote base directory; the app lives in `{dir}/{app_name}`.
    pub dir: String,
    pub app_name: AppName,
    /// Remote path to the uv binary, if not on `PATH`.
    pub uv_path: Option<String>,
    pub exclusions: Vec<ExclusionPattern>,
    /// Lock file, relative to the project root.
    pub lock_file: String,
}

impl DeploymentTarget {
    /// Build a target from loaded configuration, compiling exclusion patterns.
    pub fn from_config(config: &Config) -> Result<Self, InvalidPattern> {
        let exclusions = config
            .ignore_list
            .iter()
            .map(|pattern| ExclusionPattern::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            host: config.host.clone(),
            dir: config.dir.clone(),
            app_name: config.app_name.clone(),
            uv_path: config.host_uv_path.clone(),
            exclusions,
            lock_file: config.lock_file.clone(),
        })
    }

    /// Remote app directory, `{dir}/{app_name}`.
    pub fn app_path(&self) -> String {
        join(&self.dir, self.app_name.as_str())
    }

    /// Uploaded unit definition, `{app_path}/{app_name}.service`.
    pub fn unit_file(&self) -> String {
        join(&self.app_path(), &self.app_name.unit_name())
    }

    /// Where systemd expects the user unit.
    pub fn unit_link(&self) -> String {
        join(SYSTEMD_USER_DIR, &self.app_name.unit_name())
    }

    pub fn uv_command(&self) -> &str {
        self.uv_path.as_deref().unwrap_or(DEFAULT_UV)
    }
}
