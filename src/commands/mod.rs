// ABOUTME: Command module aggregator for the uvdeploy CLI.
// ABOUTME: Re-exports deploy, clean, files, and status command handlers.

mod clean;
mod deploy;
mod files;
mod session;
mod status;

pub use clean::clean;
pub use deploy::deploy;
pub use files::files;
pub use status::status;
