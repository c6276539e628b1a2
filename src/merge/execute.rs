//! Plan execution
//!
//! Writes a validated `MergePlan` into the destination tree. Per directory
//! level, files and directories are produced first and symlinks last,
//! matching the order the trees were built in. A fuse failure degrades to a
//! copy of side A's file and the run continues.

use crate::error::{FuseError, MergeError};
use crate::fuse::Fuser;
use crate::merge::plan::{Decision, MergePlan, PlanEntry, Side};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome counters for a completed merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Directories created in the destination
    pub directories: usize,
    /// Single-sided files and subtrees copied verbatim
    pub copied_entries: usize,
    /// Byte-identical files copied from side A
    pub identical_files: usize,
    /// Files fused by the external tool
    pub fused_files: usize,
    /// Fuse failures degraded to a copy of side A
    pub fuse_fallbacks: usize,
    /// Symlinks re-created under the new root
    pub symlinks: usize,
}

/// Execute `plan` into `dest`, fusing differing files with `fuser`.
///
/// The destination root is created if absent. Relative paths from the plan
/// must not already exist under it; no pre-merge cleanup is performed.
pub fn execute_plan(
    plan: &MergePlan,
    dest: &Path,
    fuser: &dyn Fuser,
) -> Result<MergeReport, MergeError> {
    fs::create_dir_all(dest)?;
    let mut report = MergeReport::default();
    execute_level(
        &plan.entries,
        &plan.root_a,
        &plan.root_b,
        dest,
        fuser,
        &mut report,
    )?;
    info!(
        directories = report.directories,
        copied = report.copied_entries,
        identical = report.identical_files,
        fused = report.fused_files,
        fallbacks = report.fuse_fallbacks,
        symlinks = report.symlinks,
        "merge complete"
    );
    Ok(report)
}

fn execute_level(
    entries: &[PlanEntry],
    dir_a: &Path,
    dir_b: &Path,
    dest: &Path,
    fuser: &dyn Fuser,
    report: &mut MergeReport,
) -> Result<(), MergeError> {
    // Files and directories first; symlinks once the level's real entries
    // are in place.
    for entry in entries {
        if matches!(entry.decision, Decision::Symlink { .. }) {
            continue;
        }
        let src_a = dir_a.join(&entry.name);
        let src_b = dir_b.join(&entry.name);
        let dst = dest.join(&entry.name);

        match &entry.decision {
            Decision::CopyFile { side } => {
                let src = pick(*side, &src_a, &src_b);
                fs::copy(src, &dst)?;
                report.copied_entries += 1;
            }
            Decision::CopyTree { side } => {
                copy_tree(pick(*side, &src_a, &src_b), &dst)?;
                report.copied_entries += 1;
            }
            Decision::CopyIdentical => {
                fs::copy(&src_a, &dst)?;
                report.identical_files += 1;
            }
            Decision::Fuse => match fuser.fuse(&dst, &src_a, &src_b) {
                Ok(()) => {
                    debug!(output = %dst.display(), "fused");
                    report.fused_files += 1;
                }
                Err(err) => {
                    warn_fuse_failure(&err, &src_a, &src_b);
                    fs::copy(&src_a, &dst)?;
                    report.fuse_fallbacks += 1;
                }
            },
            Decision::Recurse(children) => {
                fs::create_dir(&dst)?;
                report.directories += 1;
                execute_level(children, &src_a, &src_b, &dst, fuser, report)?;
            }
            Decision::Symlink { .. } => unreachable!("symlinks handled below"),
        }
    }

    for entry in entries {
        if let Decision::Symlink { target, .. } = &entry.decision {
            let dst = dest.join(&entry.name);
            make_symlink(target, &dst)?;
            report.symlinks += 1;
        }
    }

    Ok(())
}

fn pick<'a>(side: Side, a: &'a Path, b: &'a Path) -> &'a Path {
    match side {
        Side::A => a,
        Side::B => b,
    }
}

fn warn_fuse_failure(err: &FuseError, input_a: &Path, input_b: &Path) {
    warn!(
        input_a = %input_a.display(),
        input_b = %input_b.display(),
        error = %err,
        "could not fuse; copying first input instead"
    );
}

/// Copy a whole subtree verbatim: directories, file bytes, and symlinks with
/// their literal targets, so relative links inside the subtree stay valid.
fn copy_tree(src: &Path, dst: &Path) -> Result<(), MergeError> {
    fs::create_dir(dst)?;
    for entry in WalkDir::new(src)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel = entry.path().strip_prefix(src).map_err(|_| {
            MergeError::InvalidPath(format!(
                "{} escaped its subtree root {}",
                entry.path().display(),
                src.display()
            ))
        })?;
        let target = dst.join(rel);
        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir(&target)?;
        } else if file_type.is_symlink() {
            let link_target = fs::read_link(entry.path())?;
            make_symlink(&link_target, &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
