// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Exports the target, state markers, transitions, and whole-run helpers.

mod deployment;
mod error;
mod run;
mod state;
mod target;
mod transitions;

pub use deployment::Deployment;
pub use error::{DeployError, DeployErrorKind};
pub use run::{clean, clean_and_deploy, deploy};
pub use state::{Activated, Cleaned, Initialized, Installed, Synced};
pub use target::{DEFAULT_UV, DeploymentTarget};
