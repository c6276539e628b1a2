//! Entry classification for source-tree children

use crate::error::MergeError;
use crate::tree::path::{canonicalize_path, relative_from};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Filesystem entry kinds the merge distinguishes.
///
/// Derived from `symlink_metadata`, so a symlink is always reported as
/// `Symlink` regardless of what it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::File => write!(f, "regular file"),
            EntryKind::Symlink => write!(f, "symlink"),
        }
    }
}

/// One immediate child of a source directory.
#[derive(Debug, Clone)]
pub struct PathEntry {
    /// File name within the containing directory
    pub name: OsString,
    /// Absolute path within the source tree
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl PathEntry {
    /// Classify a path without following symlinks.
    pub fn classify(path: &Path) -> Result<Self, MergeError> {
        let name = path
            .file_name()
            .ok_or_else(|| MergeError::InvalidPath(format!("{} has no file name", path.display())))?
            .to_os_string();
        let metadata = std::fs::symlink_metadata(path)?;
        let kind = if metadata.file_type().is_symlink() {
            EntryKind::Symlink
        } else if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Ok(Self {
            name,
            path: path.to_path_buf(),
            kind,
        })
    }

    /// Resolve this symlink's final real target and express it relative to
    /// `base` (the link's containing directory).
    ///
    /// The relative form is what gets written into the destination tree, so
    /// the link stays valid under the new root. Fails if the link chain is
    /// broken, since a target that cannot be resolved cannot be re-derived.
    pub fn relative_target(&self, base: &Path) -> Result<PathBuf, MergeError> {
        debug_assert_eq!(self.kind, EntryKind::Symlink);
        let real = canonicalize_path(&self.path)?;
        relative_from(&real, base)
    }
}
