//! Immediate-children listing for one directory level
//!
//! The merge recurses per level itself, so traversal here is deliberately
//! capped at depth one.

use crate::error::MergeError;
use crate::tree::entry::PathEntry;
use std::path::Path;
use walkdir::WalkDir;

/// List the immediate children of `dir`, classified and sorted by name.
///
/// Sorting makes plans deterministic, including which conflict is reported
/// first when a level contains several.
pub fn list_dir(dir: &Path) -> Result<Vec<PathEntry>, MergeError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        entries.push(PathEntry::classify(entry.path())?);
    }

    Ok(entries)
}
