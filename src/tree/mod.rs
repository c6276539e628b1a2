//! Source-tree inspection
//!
//! Classification of directory children, one-level listings, and the path
//! arithmetic used to re-derive symlink targets under a new root.

pub mod entry;
pub mod listing;
pub mod path;

pub use entry::{EntryKind, PathEntry};
pub use listing::list_dir;
