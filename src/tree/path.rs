//! Path canonicalization and relative-path utilities

use crate::error::MergeError;
use std::path::{Component, Path, PathBuf};

/// Canonicalize a path, resolving symlinks, `..`, and `.`.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, MergeError> {
    // Use dunce for cross-platform canonicalization
    dunce::canonicalize(path).map_err(|e| {
        MergeError::InvalidPath(format!("Failed to canonicalize {}: {}", path.display(), e))
    })
}

/// Express `target` as a path relative to the directory `base`, inserting
/// `..` components where `target` lies outside `base`.
///
/// Both paths must already be canonical (no symlinks, no `.`/`..`); this is
/// a pure lexical computation.
pub fn relative_from(target: &Path, base: &Path) -> Result<PathBuf, MergeError> {
    if target.is_absolute() != base.is_absolute() {
        return Err(MergeError::InvalidPath(format!(
            "Cannot relativize {} against {}: mixed absolute and relative paths",
            target.display(),
            base.display()
        )));
    }

    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let mut common = 0;
    while common < target_parts.len()
        && common < base_parts.len()
        && target_parts[common] == base_parts[common]
    {
        common += 1;
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }

    Ok(relative)
}
