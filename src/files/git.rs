// ABOUTME: File source backed by the git index.
// ABOUTME: Untracked and ignored files never become deployment candidates.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::{FileSource, FileSourceError};

/// Lists files tracked by git with `git ls-files -z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitFiles;

#[async_trait]
impl FileSource for GitFiles {
    async fn tracked_files(&self, root: &Path) -> Result<Vec<String>, FileSourceError> {
        tracing::debug!("Listing tracked files in {}", root.display());

        let output = Command::new("git")
            .args(["ls-files", "-z"])
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| FileSourceError::Spawn {
                program: "git",
                source,
            })?;

        if !output.status.success() {
            return Err(FileSourceError::Failed {
                program: "git",
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_ls_files(&output.stdout))
    }
}

/// Split NUL-separated `git ls-files -z` output into paths.
pub fn parse_ls_files(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|b| *b == 0)
        .filter(|entry| !entry.is_empty())
        .map(|entry| String::from_utf8_lossy(entry).into_owned())
        .collect()
}
