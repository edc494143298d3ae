// ABOUTME: Deployment state marker types for the type state pattern.
// ABOUTME: Each state carries what earlier steps produced.

use crate::files::Manifest;
use crate::service::StopOutcome;

/// Initial state: nothing done on the host yet.
/// Available actions: `clean()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Cleaned: service stopped and app directory removed.
/// Available actions: `sync_files()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Cleaned {
    /// How the stop went; `None` when cleaning was skipped.
    pub(crate) stop: Option<StopOutcome>,
}

/// Synced: manifest and lock file uploaded.
/// Available actions: `install_dependencies()`
#[derive(Debug, Clone, Default)]
pub struct Synced {
    pub(crate) manifest: Manifest,
}

/// Installed: dependencies installed from the lock file.
/// Available actions: `activate()`
#[derive(Debug, Clone, Default)]
pub struct Installed {
    pub(crate) manifest: Manifest,
}

/// Activated: unit linked, started and enabled.
/// Available actions: `finish()`
#[derive(Debug, Clone, Default)]
pub struct Activated {
    pub(crate) manifest: Manifest,
}
