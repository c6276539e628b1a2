//! Dual-tree merge core
//!
//! Two phases: a read-only planning pass that validates both trees and
//! decides per-path handling, then an execution pass that writes the
//! destination. Splitting them means a conflict can never leave a partially
//! merged destination behind.

mod compare;
mod execute;
mod plan;

pub use compare::files_identical;
pub use execute::{execute_plan, MergeReport};
pub use plan::{plan_merge, Decision, MergePlan, PlanEntry, PlanSummary, Side};

use crate::error::MergeError;
use crate::fuse::Fuser;
use std::path::Path;

/// Plan and execute a merge of `tree_a` and `tree_b` into `dest`.
pub fn merge_trees(
    tree_a: &Path,
    tree_b: &Path,
    dest: &Path,
    fuser: &dyn Fuser,
) -> Result<MergeReport, MergeError> {
    let plan = plan_merge(tree_a, tree_b)?;
    execute_plan(&plan, dest, fuser)
}
