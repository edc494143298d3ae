// ABOUTME: Generic deployment struct parameterized by state marker.
// ABOUTME: Clean must run before files are synced unless skipped explicitly.

use crate::files::Manifest;
use crate::service::StopOutcome;

use super::state::{Activated, Cleaned, Initialized, Installed, Synced};
use super::target::DeploymentTarget;

/// A deployment in progress, parameterized by its current state.
///
/// Uploads never prune files left over from an earlier deployment, so the
/// remote directory only mirrors the manifest when `clean()` ran first. The
/// state parameter makes that ordering a compile-time property.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) target: DeploymentTarget,
    pub(crate) state: S,
}

impl Deployment<Initialized> {
    /// Start a deployment that will clean the host first.
    pub fn new(target: DeploymentTarget) -> Self {
        Deployment {
            target,
            state: Initialized,
        }
    }
}

impl Deployment<Cleaned> {
    /// Skip cleaning and treat the host as already clean.
    ///
    /// Files removed from the project since the last deployment stay on the
    /// host.
    pub fn assume_clean(target: DeploymentTarget) -> Self {
        Deployment {
            target,
            state: Cleaned { stop: None },
        }
    }

    /// How stopping the previous service went, if cleaning ran.
    pub fn stop_outcome(&self) -> Option<StopOutcome> {
        self.state.stop
    }
}

impl<S> Deployment<S> {
    pub fn target(&self) -> &DeploymentTarget {
        &self.target
    }

    /// Internal helper to transition to a new state.
    pub(crate) fn transition<T>(self, state: T) -> Deployment<T> {
        Deployment {
            target: self.target,
            state,
        }
    }
}

impl Deployment<Synced> {
    pub fn manifest(&self) -> &Manifest {
        &self.state.manifest
    }
}

impl Deployment<Installed> {
    pub fn manifest(&self) -> &Manifest {
        &self.state.manifest
    }
}

impl Deployment<Activated> {
    pub fn manifest(&self) -> &Manifest {
        &self.state.manifest
    }

    /// Finish the deployment, returning the manifest that was shipped.
    pub fn finish(self) -> Manifest {
        self.state.manifest
    }
}
