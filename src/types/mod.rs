// ABOUTME: Validated domain types.
// ABOUTME: Parsed once at configuration time so the rest of the crate can trust them.

mod app_name;

pub use app_name::{AppName, AppNameError};
