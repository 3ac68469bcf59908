//! Glob pattern expansion against a directory tree

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use procpool_errors::SourceError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find every entry under `root` whose path relative to `root` matches one
/// of `patterns`
///
/// `*` and `?` stay within one path component, `**` crosses directories.
/// Results are sorted and de-duplicated. Paths are returned relative to
/// the current directory when `root` is `.`, and joined onto `root`
/// otherwise.
///
/// # Errors
///
/// Returns an error if a pattern is not valid glob syntax or the tree
/// cannot be walked.
pub fn expand_patterns<S: AsRef<str>>(
    root: &Path,
    patterns: &[S],
) -> Result<Vec<PathBuf>, SourceError> {
    let set = build_glob_set(patterns)?;
    let strip_root = root == Path::new(".");
    let mut matches = BTreeSet::new();

    for entry in WalkDir::new(root).follow_links(false).min_depth(1) {
        let entry = entry.map_err(|e| SourceError::WalkFailed {
            root: root.display().to_string(),
            message: e.to_string(),
        })?;

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if set.is_match(relative) {
            let path = if strip_root {
                relative.to_path_buf()
            } else {
                entry.path().to_path_buf()
            };
            matches.insert(path);
        }
    }

    tracing::debug!(
        root = %root.display(),
        patterns = patterns.len(),
        matched = matches.len(),
        "expanded patterns"
    );
    Ok(matches.into_iter().collect())
}

fn build_glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, SourceError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| SourceError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| SourceError::InvalidPattern {
        pattern: patterns
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" "),
        message: e.to_string(),
    })
}
