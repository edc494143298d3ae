// ABOUTME: Issues systemctl --user commands for a single app unit.
// ABOUTME: Classifies "unit not loaded" on stop as an absent service rather than a failure.

use snafu::ResultExt;

use super::error::{CommandFailedSnafu, ServiceError, TransportSnafu};
use crate::deploy::DeploymentTarget;
use crate::remote::{CommandOutput, RemoteExecutor, Step, quote, quote_path};

/// Directory systemd reads user units from.
pub const SYSTEMD_USER_DIR: &str = "~/.config/systemd/user";

/// systemctl exit status for "unit not loaded / program not installed".
const EXIT_UNIT_NOT_LOADED: u32 = 5;

/// Shell statuses for a command that could not be executed or was not found.
const SHELL_EXIT_CODES: [u32; 2] = [126, 127];

/// Outcome of stopping the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The unit existed and was stopped (or was already inactive).
    Stopped,
    /// No such unit on the host; nothing to stop.
    Absent,
}

/// Whether a failed `systemctl stop` means the unit does not exist.
///
/// Only systemctl's own wording about the unit counts. A shell that cannot
/// find or run `systemctl` at all is a failure, not an absent unit.
pub fn is_unit_missing(output: &CommandOutput) -> bool {
    if output.success() || SHELL_EXIT_CODES.contains(&output.exit_code) {
        return false;
    }
    if output.exit_code == EXIT_UNIT_NOT_LOADED {
        return true;
    }
    let stderr = output.stderr.to_ascii_lowercase();
    stderr.contains("unit ")
        && ["not loaded", "not found", "does not exist"]
            .iter()
            .any(|needle| stderr.contains(needle))
}

/// Drives the remote unit for one app through its lifecycle.
pub struct ServiceController<'a, E: ?Sized> {
    executor: &'a E,
    unit: String,
    unit_file: String,
    unit_link: String,
}

impl<'a, E> ServiceController<'a, E>
where
    E: RemoteExecutor + ?Sized,
{
    pub fn new(executor: &'a E, target: &DeploymentTarget) -> Self {
        Self {
            executor,
            unit: target.app_name.unit_name(),
            unit_file: target.unit_file(),
            unit_link: target.unit_link(),
        }
    }

    /// The unit name, e.g. `demo.service`.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Stop the service. A missing unit is reported as [`StopOutcome::Absent`].
    pub async fn stop(&self) -> Result<StopOutcome, ServiceError> {
        let command = format!("systemctl --user stop {}", quote(&self.unit));
        let output = self.run(Step::StopService, &command).await?;

        if output.success() {
            tracing::info!("Stopped {}", self.unit);
            return Ok(StopOutcome::Stopped);
        }

        if is_unit_missing(&output) {
            tracing::info!("{} is not installed, nothing to stop", self.unit);
            return Ok(StopOutcome::Absent);
        }

        self.failed(Step::StopService, command, output)
    }

    /// Link the unit file, reload systemd, then start and enable the service.
    ///
    /// Stops at the first failing command; earlier steps are not undone.
    pub async fn activate(&self) -> Result<(), ServiceError> {
        let link = format!(
            "mkdir -p {} && ln -sf {} {}",
            quote_path(SYSTEMD_USER_DIR),
            quote_path(&self.unit_file),
            quote_path(&self.unit_link)
        );
        self.run_checked(Step::LinkUnit, &link).await?;

        self.run_checked(Step::ReloadUnits, "systemctl --user daemon-reload")
            .await?;

        let unit = quote(&self.unit);
        self.run_checked(
            Step::StartService,
            &format!("systemctl --user start {unit}"),
        )
        .await?;
        self.run_checked(
            Step::EnableService,
            &format!("systemctl --user enable {unit}"),
        )
        .await?;

        tracing::info!("Activated {}", self.unit);
        Ok(())
    }

    /// Report the unit's active state as printed by `systemctl is-active`.
    ///
    /// Inactive or failed units exit non-zero but still print a state, which
    /// is returned as-is.
    pub async fn status(&self) -> Result<String, ServiceError> {
        let command = format!("systemctl --user is-active {}", quote(&self.unit));
        let output = self.run(Step::ServiceStatus, &command).await?;

        let state = output.stdout.trim();
        if state.is_empty() {
            return self.failed(Step::ServiceStatus, command, output);
        }
        Ok(state.to_string())
    }

    async fn run(&self, step: Step, command: &str) -> Result<CommandOutput, ServiceError> {
        tracing::debug!(step = %step, "Running: {}", command);
        self.executor.run(command).await.context(TransportSnafu {
            step,
            unit: self.unit.as_str(),
        })
    }

    async fn run_checked(&self, step: Step, command: &str) -> Result<CommandOutput, ServiceError> {
        let output = self.run(step, command).await?;
        if output.success() {
            Ok(output)
        } else {
            self.failed(step, command.to_string(), output)
        }
    }

    fn failed<T>(
        &self,
        step: Step,
        command: String,
        output: CommandOutput,
    ) -> Result<T, ServiceError> {
        CommandFailedSnafu {
            step,
            unit: self.unit.as_str(),
            command,
            exit_code: output.exit_code,
            stderr: output.stderr.trim(),
        }
        .fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(exit_code: u32, stderr: &str) -> CommandOutput {
        CommandOutput {
            exit_code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn unit_not_loaded_exit_status_is_missing() {
        assert!(is_unit_missing(&output(
            5,
            "Failed to stop demo.service: Unit demo.service not loaded."
        )));
    }

    #[test]
    fn not_found_message_is_missing() {
        assert!(is_unit_missing(&output(1, "Unit demo.service not found.")));
    }

    #[test]
    fn bus_failure_is_not_missing() {
        assert!(!is_unit_missing(&output(
            1,
            "Failed to connect to bus: No medium found"
        )));
    }

    #[test]
    fn missing_systemctl_is_not_missing_unit() {
        assert!(!is_unit_missing(&output(
            127,
            "bash: systemctl: command not found"
        )));
        assert!(!is_unit_missing(&output(126, "bash: /usr/bin/systemctl: Permission denied")));
    }

    #[test]
    fn not_found_without_unit_wording_is_not_missing() {
        assert!(!is_unit_missing(&output(1, "Failed to connect: socket not found")));
    }

    #[test]
    fn success_is_never_missing() {
        assert!(!is_unit_missing(&output(0, "not found")));
    }
}
