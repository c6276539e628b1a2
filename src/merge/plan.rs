//! Merge planning
//!
//! A read-only pass over both source trees that validates every shared path
//! for kind compatibility and records one decision per relative path. A
//! conflict anywhere fails the whole plan before a single byte is written,
//! so a failed merge leaves the destination untouched.

use crate::error::MergeError;
use crate::merge::compare::files_identical;
use crate::tree::{list_dir, path::canonicalize_path, EntryKind, PathEntry};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Which source tree an entry is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// The planned handling of one relative path.
#[derive(Debug, Clone)]
pub enum Decision {
    /// Directory subtree present on one side only; copied verbatim.
    CopyTree { side: Side },
    /// Regular file present on one side only; copied verbatim.
    CopyFile { side: Side },
    /// Regular file with byte-identical content on both sides; side A's
    /// bytes are copied.
    CopyIdentical,
    /// Regular files with differing bytes; fused by the external tool.
    Fuse,
    /// Directory on both sides; children planned recursively.
    Recurse(Vec<PlanEntry>),
    /// Symlink re-created with its target relative to the containing
    /// directory. `side` records which tree the target was derived from;
    /// links present on both sides with equal targets plan as side A.
    Symlink { target: PathBuf, side: Side },
}

/// One name in a directory level together with its decision.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub name: OsString,
    pub decision: Decision,
}

/// An immutable, fully validated merge plan for a pair of source trees.
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// Canonical root of tree A
    pub root_a: PathBuf,
    /// Canonical root of tree B
    pub root_b: PathBuf,
    pub entries: Vec<PlanEntry>,
}

/// Counts of planned work, used for dry runs and the post-merge report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    /// Directories present on both sides (recursed into)
    pub directories: usize,
    /// Files or whole subtrees present on one side only
    pub copied_entries: usize,
    /// Byte-identical files
    pub identical_files: usize,
    /// Differing files handed to the fuse tool
    pub fused_files: usize,
    pub symlinks: usize,
}

impl MergePlan {
    pub fn summary(&self) -> PlanSummary {
        let mut summary = PlanSummary::default();
        summarize(&self.entries, &mut summary);
        summary
    }
}

fn summarize(entries: &[PlanEntry], summary: &mut PlanSummary) {
    for entry in entries {
        match &entry.decision {
            Decision::CopyTree { .. } | Decision::CopyFile { .. } => summary.copied_entries += 1,
            Decision::CopyIdentical => summary.identical_files += 1,
            Decision::Fuse => summary.fused_files += 1,
            Decision::Symlink { .. } => summary.symlinks += 1,
            Decision::Recurse(children) => {
                summary.directories += 1;
                summarize(children, summary);
            }
        }
    }
}

/// Plan the merge of `tree_a` and `tree_b`.
///
/// Both roots must exist and be directories. The returned plan covers every
/// relative path present in either tree exactly once.
pub fn plan_merge(tree_a: &Path, tree_b: &Path) -> Result<MergePlan, MergeError> {
    let root_a = source_root(tree_a)?;
    let root_b = source_root(tree_b)?;
    debug!(tree_a = %root_a.display(), tree_b = %root_b.display(), "planning merge");

    let entries = plan_dir(&root_a, &root_b, Path::new(""))?;
    Ok(MergePlan {
        root_a,
        root_b,
        entries,
    })
}

/// Canonicalize a source root and require it to be a directory.
fn source_root(root: &Path) -> Result<PathBuf, MergeError> {
    if !root.is_dir() {
        return Err(MergeError::SourceRoot(root.to_path_buf()));
    }
    canonicalize_path(root)
}

/// Plan one directory level. Children of shared directories are planned
/// before the level returns, so validation covers the whole forest.
fn plan_dir(dir_a: &Path, dir_b: &Path, rel: &Path) -> Result<Vec<PlanEntry>, MergeError> {
    let listing_a = list_dir(dir_a)?;
    let listing_b = list_dir(dir_b)?;

    let b_by_name: BTreeMap<&OsStr, &PathEntry> = listing_b
        .iter()
        .map(|entry| (entry.name.as_os_str(), entry))
        .collect();

    let mut entries = Vec::new();

    for a in &listing_a {
        let rel_path = rel.join(&a.name);
        let decision = match b_by_name.get(a.name.as_os_str()) {
            None => single_sided(a, dir_a, Side::A)?,
            Some(b) => both_sided(a, b, dir_a, dir_b, &rel_path)?,
        };
        trace!(path = %rel_path.display(), ?decision, "planned");
        entries.push(PlanEntry {
            name: a.name.clone(),
            decision,
        });
    }

    // Names present only on side B
    for b in &listing_b {
        if listing_a.iter().any(|a| a.name == b.name) {
            continue;
        }
        let rel_path = rel.join(&b.name);
        let decision = single_sided(b, dir_b, Side::B)?;
        trace!(path = %rel_path.display(), ?decision, "planned");
        entries.push(PlanEntry {
            name: b.name.clone(),
            decision,
        });
    }

    Ok(entries)
}

fn single_sided(entry: &PathEntry, dir: &Path, side: Side) -> Result<Decision, MergeError> {
    Ok(match entry.kind {
        EntryKind::Directory => Decision::CopyTree { side },
        EntryKind::File => Decision::CopyFile { side },
        EntryKind::Symlink => Decision::Symlink {
            target: entry.relative_target(dir)?,
            side,
        },
    })
}

/// Validate a name present on both sides and decide its handling.
fn both_sided(
    a: &PathEntry,
    b: &PathEntry,
    dir_a: &Path,
    dir_b: &Path,
    rel_path: &Path,
) -> Result<Decision, MergeError> {
    match (a.kind, b.kind) {
        (EntryKind::Symlink, EntryKind::Symlink) => {
            let target_a = a.relative_target(dir_a)?;
            let target_b = b.relative_target(dir_b)?;
            if target_a == target_b {
                Ok(Decision::Symlink {
                    target: target_a,
                    side: Side::A,
                })
            } else {
                Err(MergeError::SymlinkTargetConflict {
                    path: rel_path.to_path_buf(),
                    target_a,
                    target_b,
                })
            }
        }
        (EntryKind::Directory, EntryKind::Directory) => {
            Ok(Decision::Recurse(plan_dir(&a.path, &b.path, rel_path)?))
        }
        (EntryKind::File, EntryKind::File) => {
            if files_identical(&a.path, &b.path)? {
                Ok(Decision::CopyIdentical)
            } else {
                Ok(Decision::Fuse)
            }
        }
        (kind_a, kind_b) => Err(MergeError::Conflict {
            path: rel_path.to_path_buf(),
            kind_a,
            kind_b,
        }),
    }
}
