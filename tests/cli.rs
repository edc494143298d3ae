// ABOUTME: Integration tests for the uvdeploy CLI commands.
// ABOUTME: Validates --help output, init behavior, and configuration errors before connecting.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use uvdeploy::config::{ENV_KEYS, env_var};

fn uvdeploy_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("uvdeploy"));
    for key in ENV_KEYS {
        cmd.env_remove(env_var(key));
    }
    cmd
}

#[test]
fn help_shows_commands() {
    uvdeploy_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("files"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("uvdeploy.yml");

    uvdeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--app-name", "demo", "--host", "deploy@bourne"])
        .assert()
        .success();

    assert!(config_path.exists(), "uvdeploy.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("app_name: demo"));
    assert!(content.contains("host: deploy@bourne"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("uvdeploy.yml");

    fs::write(&config_path, "existing: config").unwrap();

    uvdeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_invalid_app_name() {
    let temp_dir = tempfile::tempdir().unwrap();

    uvdeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--app-name", "bad name"])
        .assert()
        .failure();

    assert!(!temp_dir.path().join("uvdeploy.yml").exists());
}

/// Test: deploy with no project file and no environment.
/// Expected: fails on the first missing setting without connecting anywhere.
#[test]
fn deploy_without_settings_fails_early() {
    let temp_dir = tempfile::tempdir().unwrap();

    uvdeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required setting `host`"))
        .stderr(predicate::str::contains("DEPLOY_HOST"));
}

/// Test: bad regular expression in the ignore list.
/// Expected: configuration error reported before any connection attempt.
#[test]
fn clean_with_invalid_pattern_fails_early() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("uvdeploy.yml"),
        "host: deploy@unreachable.invalid\ndir: /srv\napp_name: demo\nignore_list: ['(']\n",
    )
    .unwrap();

    uvdeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("clean")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid exclusion pattern"))
        .stderr(predicate::str::contains("Connecting").not());
}

#[test]
fn json_errors_are_structured() {
    let temp_dir = tempfile::tempdir().unwrap();

    uvdeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["--json", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"event\":\"error\""));
}
