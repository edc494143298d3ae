// ABOUTME: Library root for uvdeploy - exposes the deployment core for the CLI and tests.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod files;
pub mod output;
pub mod remote;
pub mod service;
pub mod ssh;
pub mod types;
