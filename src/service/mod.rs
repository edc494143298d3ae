// ABOUTME: Lifecycle control of the app's systemd user service on the remote host.
// ABOUTME: Stop tolerates a missing unit; activation links, reloads, starts, and enables.

mod controller;
mod error;

pub use controller::{SYSTEMD_USER_DIR, ServiceController, StopOutcome, is_unit_missing};
pub use error::{ServiceError, ServiceErrorKind};
