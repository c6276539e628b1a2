//! Error types for the universal build-tree merger.

use crate::tree::EntryKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while planning or executing a tree merge.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error(
        "Incompatible entries at '{path}': {kind_a} in tree A vs {kind_b} in tree B. \
         The two trees appear to have been built from incompatible configurations"
    )]
    Conflict {
        path: PathBuf,
        kind_a: EntryKind,
        kind_b: EntryKind,
    },

    #[error(
        "Symlink '{path}' points to '{target_a}' in tree A but '{target_b}' in tree B. \
         The two trees appear to have been built from incompatible configurations"
    )]
    SymlinkTargetConflict {
        path: PathBuf,
        target_a: PathBuf,
        target_b: PathBuf,
    },

    #[error("Source root {0:?} does not exist or is not a directory")]
    SourceRoot(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MergeError {
    /// True for kind-mismatch conflicts between the two trees, as opposed to
    /// environmental failures.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            MergeError::Conflict { .. } | MergeError::SymlinkTargetConflict { .. }
        )
    }
}

/// Failure of the external architecture-fusing tool.
///
/// Never fatal to a merge: the executor logs it and falls back to copying
/// one side.
#[derive(Debug, Error)]
pub enum FuseError {
    #[error("failed to launch fuse tool '{tool}': {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("fuse tool '{tool}' exited with status {code:?}: {stderr}")]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Top-level CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
