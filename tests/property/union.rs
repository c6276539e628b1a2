//! Property-based tests for the union guarantee
//!
//! For arbitrary compatible source forests, the destination must contain
//! exactly the union of both trees' relative paths, with per-file content
//! determined by the merge rules.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use unibin::error::FuseError;
use unibin::fuse::Fuser;
use unibin::merge::merge_trees;

/// Where a generated file lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    OnlyA,
    OnlyB,
    BothSame,
    BothDiffer,
}

/// Fuse stub that concatenates both inputs, making fused output checkable.
struct ConcatFuser;

impl Fuser for ConcatFuser {
    fn fuse(&self, output: &Path, input_a: &Path, input_b: &Path) -> Result<(), FuseError> {
        let mut fused = fs::read(input_a).unwrap();
        fused.extend(fs::read(input_b).unwrap());
        fs::write(output, fused).unwrap();
        Ok(())
    }
}

/// Directory components are prefixed `d` and file names `f`, so a generated
/// file can never collide with another entry's directory under the same name
/// (which would be a legitimate conflict, not a union case).
fn forest_strategy() -> impl Strategy<Value = Vec<(Vec<String>, String, Presence, Vec<u8>)>> {
    let entry = (
        prop::collection::vec("d[a-z]{1,3}", 0..3),
        "f[a-z]{1,4}",
        prop_oneof![
            Just(Presence::OnlyA),
            Just(Presence::OnlyB),
            Just(Presence::BothSame),
            Just(Presence::BothDiffer),
        ],
        prop::collection::vec(any::<u8>(), 0..32),
    );
    prop::collection::vec(entry, 1..12)
}

fn write_file(root: &Path, rel: &Path, bytes: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

/// All relative paths under `root`, including intermediate directories.
fn relative_paths(root: &Path) -> BTreeSet<PathBuf> {
    walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| {
            e.unwrap()
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_path_buf()
        })
        .collect()
}

#[test]
fn test_destination_equals_union_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&forest_strategy(), |entries| {
            // Dedupe by full relative path; first entry wins.
            let mut files: BTreeMap<PathBuf, (Presence, Vec<u8>)> = BTreeMap::new();
            for (dirs, name, presence, bytes) in entries {
                let mut rel = PathBuf::new();
                for dir in &dirs {
                    rel.push(dir);
                }
                rel.push(&name);
                files.entry(rel).or_insert((presence, bytes));
            }

            let temp_dir = TempDir::new().unwrap();
            let a = temp_dir.path().join("a");
            let b = temp_dir.path().join("b");
            let dest = temp_dir.path().join("dest");
            fs::create_dir(&a).unwrap();
            fs::create_dir(&b).unwrap();

            let mut expected: BTreeSet<PathBuf> = BTreeSet::new();
            for (rel, (presence, bytes)) in &files {
                let mut differing = bytes.clone();
                differing.push(0xFE);
                match presence {
                    Presence::OnlyA => write_file(&a, rel, bytes),
                    Presence::OnlyB => write_file(&b, rel, bytes),
                    Presence::BothSame => {
                        write_file(&a, rel, bytes);
                        write_file(&b, rel, bytes);
                    }
                    Presence::BothDiffer => {
                        write_file(&a, rel, bytes);
                        write_file(&b, rel, &differing);
                    }
                }
                // The file and every ancestor directory must appear.
                let mut ancestor = rel.clone();
                loop {
                    expected.insert(ancestor.clone());
                    if !ancestor.pop() || ancestor.as_os_str().is_empty() {
                        break;
                    }
                }
            }

            merge_trees(&a, &b, &dest, &ConcatFuser).unwrap();

            // Exactly the union; nothing duplicated (sets), nothing dropped.
            prop_assert_eq!(relative_paths(&dest), expected);

            // Per-file content follows the merge rules.
            for (rel, (presence, bytes)) in &files {
                let merged = fs::read(dest.join(rel)).unwrap();
                match presence {
                    Presence::OnlyA | Presence::OnlyB | Presence::BothSame => {
                        prop_assert_eq!(&merged, bytes);
                    }
                    Presence::BothDiffer => {
                        let mut fused = bytes.clone();
                        fused.extend(bytes.iter().copied());
                        fused.push(0xFE);
                        prop_assert_eq!(merged, fused);
                    }
                }
            }

            Ok(())
        })
        .unwrap();
}
