// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted in-memory remote executor and a fixed file source.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Once;
use uvdeploy::config::HostConfig;
use uvdeploy::deploy::DeploymentTarget;
use uvdeploy::files::{ExclusionPattern, FileSource, FileSourceError};
use uvdeploy::remote::{CommandOutput, RemoteError, RemoteExecutor};
use uvdeploy::types::AppName;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("uvdeploy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A call observed by [`FakeExecutor`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Run(String),
    Upload { local: PathBuf, remote_dir: String },
}

enum Response {
    Output(CommandOutput),
    Transport(String),
}

/// Records every call and answers commands from a script.
///
/// Commands succeed with empty output unless a rule matches; the first rule
/// whose needle is a substring of the command decides the response.
#[derive(Default)]
pub struct FakeExecutor {
    calls: Mutex<Vec<Call>>,
    rules: Vec<(String, Response)>,
    failing_uploads: Vec<String>,
}

#[allow(dead_code)]
impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands containing `needle` exit with `exit_code` and `stderr`.
    pub fn respond(mut self, needle: &str, exit_code: u32, stderr: &str) -> Self {
        self.rules.push((
            needle.to_string(),
            Response::Output(CommandOutput {
                exit_code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
        ));
        self
    }

    /// Commands containing `needle` succeed and print `stdout`.
    pub fn respond_stdout(mut self, needle: &str, exit_code: u32, stdout: &str) -> Self {
        self.rules.push((
            needle.to_string(),
            Response::Output(CommandOutput {
                exit_code,
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        ));
        self
    }

    /// Commands containing `needle` fail at the transport level.
    pub fn transport_error(mut self, needle: &str) -> Self {
        self.rules
            .push((needle.to_string(), Response::Transport("connection reset".to_string())));
        self
    }

    /// Uploads of local paths containing `needle` fail.
    pub fn fail_upload(mut self, needle: &str) -> Self {
        self.failing_uploads.push(needle.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Run(command) => Some(command),
                Call::Upload { .. } => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<(PathBuf, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Upload { local, remote_dir } => Some((local, remote_dir)),
                Call::Run(_) => None,
            })
            .collect()
    }

    /// Index in [`FakeExecutor::calls`] of the first command containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.calls()
            .iter()
            .position(|call| matches!(call, Call::Run(command) if command.contains(needle)))
    }

    /// Number of commands containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.commands()
            .iter()
            .filter(|command| command.contains(needle))
            .count()
    }
}

#[async_trait]
impl RemoteExecutor for FakeExecutor {
    async fn run(&self, command: &str) -> Result<CommandOutput, RemoteError> {
        self.calls.lock().push(Call::Run(command.to_string()));

        match self
            .rules
            .iter()
            .find(|(needle, _)| command.contains(needle.as_str()))
        {
            Some((_, Response::Output(output))) => Ok(output.clone()),
            Some((_, Response::Transport(reason))) => Err(RemoteError::Transport(reason.clone())),
            None => Ok(CommandOutput::default()),
        }
    }

    async fn upload(&self, local: &Path, remote_dir: &str) -> Result<(), RemoteError> {
        self.calls.lock().push(Call::Upload {
            local: local.to_path_buf(),
            remote_dir: remote_dir.to_string(),
        });

        let local_str = local.to_string_lossy();
        if self
            .failing_uploads
            .iter()
            .any(|needle| local_str.contains(needle.as_str()))
        {
            return Err(RemoteError::Upload {
                local: local.to_path_buf(),
                remote: remote_dir.to_string(),
                reason: "No space left on device".to_string(),
            });
        }
        Ok(())
    }
}

/// A file source returning a fixed candidate list.
pub struct FixedFiles(pub Vec<String>);

#[allow(dead_code)]
impl FixedFiles {
    pub fn new(paths: &[&str]) -> Self {
        Self(paths.iter().map(|p| p.to_string()).collect())
    }
}

#[async_trait]
impl FileSource for FixedFiles {
    async fn tracked_files(&self, _root: &Path) -> Result<Vec<String>, FileSourceError> {
        Ok(self.0.clone())
    }
}

/// Target for app `demo` under `/srv/apps` with the given exclusion patterns.
#[allow(dead_code)]
pub fn target(exclusions: &[&str]) -> DeploymentTarget {
    DeploymentTarget {
        host: HostConfig::parse("deploy@bourne").unwrap(),
        dir: "/srv/apps".to_string(),
        app_name: AppName::new("demo").unwrap(),
        uv_path: None,
        exclusions: exclusions
            .iter()
            .map(|p| ExclusionPattern::new(p).unwrap())
            .collect(),
        lock_file: "uv.lock".to_string(),
    }
}
