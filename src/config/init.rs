// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates uvdeploy.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::AppName;

use super::{CONFIG_FILENAME, Config, HostConfig};

pub fn init_config(
    dir: &Path,
    app_name: Option<&str>,
    host: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(name) = app_name {
        config.app_name = AppName::new(name).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    if let Some(h) = host {
        config.host = HostConfig::parse(h).map_err(Error::InvalidConfig)?;
    }

    std::fs::write(&config_path, generate_template_yaml(&config))?;
    tracing::info!("Wrote {}", config_path.display());

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    let ignore_list = config
        .ignore_list
        .iter()
        .map(|pattern| format!("  - '{}'\n", pattern.replace('\'', "''")))
        .collect::<String>();

    format!(
        r#"host: {host}
dir: {dir}
app_name: {app_name}
# Remote path to uv if it is not on the login PATH
# host_uv_path: ~/.local/bin/uv
# Regular expressions; any tracked file matching one is not uploaded
ignore_list:
{ignore_list}lock_file: {lock_file}
command_timeout: 5m
# Every setting can be overridden with a DEPLOY_* variable, e.g. DEPLOY_HOST.
# The repository must contain {app_name}.service, the systemd user unit.
"#,
        host = config.host,
        dir = config.dir,
        app_name = config.app_name,
        lock_file = config.lock_file,
    )
}
