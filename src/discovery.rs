//! Glob expansion of the configured path patterns

use glob::{MatchOptions, Pattern, PatternError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("Failed to read {path} while expanding '{pattern}': {message}")]
    Unreadable {
        pattern: String,
        path: PathBuf,
        message: String,
    },
}

/// Shell-like matching: `*` does not match a leading dot
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Expands `pattern` into the regular files it matches.
///
/// Relative patterns are resolved against `base_dir`; absolute patterns are
/// used unchanged. A pattern that matches nothing yields an empty list.
pub fn expand_pattern(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let full_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let base = Pattern::escape(&base_dir.to_string_lossy());
        format!("{}/{}", base.trim_end_matches('/'), pattern)
    };
    trace!("Expanding {} as {}", pattern, full_pattern);

    let paths = glob::glob_with(&full_pattern, MATCH_OPTIONS).map_err(|source| {
        DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| DiscoveryError::Unreadable {
            pattern: pattern.to_string(),
            path: e.path().to_path_buf(),
            message: e.error().to_string(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    debug!("Pattern '{}' matched {} files", pattern, files.len());
    Ok(files)
}
