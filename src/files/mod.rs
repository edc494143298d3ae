// ABOUTME: Selection of the local files that make up a deployment.
// ABOUTME: Lists tracked files through a pluggable source and filters them into a manifest.

mod git;
mod pattern;

pub use git::{GitFiles, parse_ls_files};
pub use pattern::{ExclusionPattern, InvalidPattern};

use async_trait::async_trait;
use std::path::{Component, Path};

/// Extensions of compiled bytecode artifacts that are never shipped.
const BYTECODE_EXTENSIONS: &[&str] = &["pyc", "pyo"];

/// Errors from listing candidate files.
#[derive(Debug, thiserror::Error)]
pub enum FileSourceError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {code:?}: {stderr}")]
    Failed {
        program: &'static str,
        code: Option<i32>,
        stderr: String,
    },
}

/// Lists the candidate files of a project, relative to its root.
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn tracked_files(&self, root: &Path) -> Result<Vec<String>, FileSourceError>;
}

/// Ordered list of relative paths to upload, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest(Vec<String>);

impl Manifest {
    pub fn paths(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_paths(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether `path` is a compiled bytecode artifact.
pub fn is_bytecode(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| BYTECODE_EXTENSIONS.contains(&ext))
}

/// Canonical `/`-separated spelling of a project-relative path.
///
/// `.` segments and repeated separators are dropped. Returns `None` for
/// absolute paths, paths that climb out with `..`, and paths naming nothing.
pub fn normalize_relative(path: &str) -> Option<String> {
    let mut parts = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Filter candidate paths into a manifest, keeping their order.
///
/// Bytecode artifacts are always dropped. Every other path is dropped when any
/// exclusion pattern matches somewhere in it; patterns are tried in order and
/// the first match ends the search.
pub fn select<I>(candidates: I, exclusions: &[ExclusionPattern]) -> Manifest
where
    I: IntoIterator<Item = String>,
{
    let paths = candidates
        .into_iter()
        .filter(|path| {
            if is_bytecode(path) {
                return false;
            }
            match exclusions.iter().find(|pattern| pattern.is_match(path)) {
                Some(pattern) => {
                    tracing::debug!(path = %path, pattern = %pattern, "excluded");
                    false
                }
                None => true,
            }
        })
        .collect();
    Manifest(paths)
}

/// List the files under `root` through `source` and filter them.
pub async fn select_files<F>(
    source: &F,
    root: &Path,
    exclusions: &[ExclusionPattern],
) -> Result<Manifest, FileSourceError>
where
    F: FileSource + ?Sized,
{
    let candidates = source.tracked_files(root).await?;
    let total = candidates.len();
    let manifest = select(candidates, exclusions);
    tracing::info!(
        candidates = total,
        selected = manifest.len(),
        "computed deployment manifest"
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(sources: &[&str]) -> Vec<ExclusionPattern> {
        sources
            .iter()
            .map(|s| ExclusionPattern::new(s).unwrap())
            .collect()
    }

    fn owned(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn bytecode_detection_uses_extension() {
        assert!(is_bytecode("app.pyc"));
        assert!(is_bytecode("pkg/__pycache__/mod.cpython-312.pyc"));
        assert!(is_bytecode("legacy.pyo"));
        assert!(!is_bytecode("app.py"));
        assert!(!is_bytecode("pyc/readme.md"));
    }

    #[test]
    fn no_patterns_keeps_everything_but_bytecode() {
        let manifest = select(owned(&["a.py", "b.pyc", "c.txt"]), &[]);
        assert_eq!(manifest.paths(), ["a.py", "c.txt"]);
    }

    #[test]
    fn patterns_search_anywhere_in_path() {
        let manifest = select(
            owned(&["src/app.py", "docs/intro.md", "src/docs.py"]),
            &patterns(&["docs/"]),
        );
        assert_eq!(manifest.paths(), ["src/app.py", "src/docs.py"]);
    }

    #[test]
    fn patterns_are_or_combined() {
        let manifest = select(
            owned(&["app.py", ".gitignore", "tests/test_app.py", "README.md"]),
            &patterns(&["^tests/", r"^\.git", r"\.md$"]),
        );
        assert_eq!(manifest.paths(), ["app.py"]);
    }

    #[test]
    fn normalizes_relative_spellings() {
        assert_eq!(normalize_relative("uv.lock").as_deref(), Some("uv.lock"));
        assert_eq!(normalize_relative("./uv.lock").as_deref(), Some("uv.lock"));
        assert_eq!(
            normalize_relative("locks//./uv.lock").as_deref(),
            Some("locks/uv.lock")
        );
    }

    #[test]
    fn rejects_paths_outside_project() {
        assert_eq!(normalize_relative("/etc/uv.lock"), None);
        assert_eq!(normalize_relative("../uv.lock"), None);
        assert_eq!(normalize_relative("locks/../../uv.lock"), None);
        assert_eq!(normalize_relative("."), None);
        assert_eq!(normalize_relative(""), None);
    }

    #[test]
    fn empty_candidates_give_empty_manifest() {
        let manifest = select(Vec::new(), &patterns(&[".*"]));
        assert!(manifest.is_empty());
    }
}
