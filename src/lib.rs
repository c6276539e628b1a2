//! Unibin: Universal Build-Tree Merging
//!
//! Combines two architecture-specific build-output trees into a single
//! universal tree. Identical and single-sided entries are copied, differing
//! binaries are fused by an external lipo-style tool, and symlinks are
//! re-created with targets re-derived relative to the new root.

pub mod cli;
pub mod config;
pub mod error;
pub mod fuse;
pub mod logging;
pub mod merge;
pub mod tree;
