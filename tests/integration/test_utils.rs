//! Shared test utilities for integration tests
//!
//! Source-tree fixtures and fuse-tool stubs used across the merge tests.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use unibin::error::FuseError;
use unibin::fuse::Fuser;

/// Two empty source roots (`a/`, `b/`) plus a destination path (`dest/`,
/// not created) under one temp dir.
pub fn merge_fixture() -> (TempDir, PathBuf, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    let dest = temp_dir.path().join("dest");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    (temp_dir, a, b, dest)
}

/// Write a file at `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

#[cfg(unix)]
pub fn make_link(root: &Path, rel: &str, target: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    std::os::unix::fs::symlink(target, path).unwrap();
}

/// Collect all relative paths under `root` (files, dirs, symlinks), sorted.
pub fn relative_paths(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .map(|e| {
            e.unwrap()
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_path_buf()
        })
        .collect();
    paths.sort();
    paths
}

/// Deterministic fuse stub: records every invocation and either writes
/// `<bytes of A><bytes of B>` to the output or fails without writing.
pub struct StubFuser {
    pub calls: RefCell<Vec<(PathBuf, PathBuf, PathBuf)>>,
    pub fail: bool,
}

impl StubFuser {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl Fuser for StubFuser {
    fn fuse(&self, output: &Path, input_a: &Path, input_b: &Path) -> Result<(), FuseError> {
        self.calls.borrow_mut().push((
            output.to_path_buf(),
            input_a.to_path_buf(),
            input_b.to_path_buf(),
        ));
        if self.fail {
            return Err(FuseError::Failed {
                tool: "stub-lipo".to_string(),
                code: Some(1),
                stderr: "can't figure out the architecture type".to_string(),
            });
        }
        let mut fused = fs::read(input_a).unwrap();
        fused.extend(fs::read(input_b).unwrap());
        fs::write(output, fused).unwrap();
        Ok(())
    }
}
