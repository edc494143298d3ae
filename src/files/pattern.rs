// ABOUTME: Exclusion patterns applied to candidate file paths.
// ABOUTME: A pattern excludes a path when it matches anywhere in it.

use regex::Regex;
use std::fmt;

#[derive(Debug, thiserror::Error)]
#[error("invalid exclusion pattern {pattern:?}: {source}")]
pub struct InvalidPattern {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// A compiled regular expression tested against relative paths.
#[derive(Debug, Clone)]
pub struct ExclusionPattern(Regex);

impl ExclusionPattern {
    pub fn new(pattern: &str) -> Result<Self, InvalidPattern> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Search semantics: true if the pattern matches any part of `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.0.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExclusionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
