//! CLI route: run context dispatching to the merge core and presentation.

use crate::cli::output::{format_plan_summary, format_report};
use crate::cli::parse::Cli;
use crate::config::{ConfigLoader, UnibinConfig};
use crate::error::CliError;
use crate::fuse::LipoFuser;
use crate::merge::{execute_plan, plan_merge};
use std::path::Path;
use tracing::info;

/// Runtime context for CLI execution: resolved configuration only; the merge
/// core itself is stateless.
pub struct RunContext {
    config: UnibinConfig,
}

impl RunContext {
    /// Build a context from an optional config file and an optional fuse-tool
    /// override. The override wins over file and environment.
    pub fn new(config_path: Option<&Path>, fuse_tool: Option<String>) -> Result<Self, CliError> {
        let mut config = ConfigLoader::load(config_path)?;
        if let Some(tool) = fuse_tool {
            config.fuse.tool = tool;
        }
        config.validate().map_err(CliError::Config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &UnibinConfig {
        &self.config
    }

    /// Plan the merge and, unless this is a dry run, execute it.
    pub fn execute(&self, cli: &Cli) -> Result<String, CliError> {
        let plan = plan_merge(&cli.tree_a, &cli.tree_b)?;
        let summary = plan.summary();
        info!(
            fused = summary.fused_files,
            copied = summary.copied_entries,
            symlinks = summary.symlinks,
            "plan validated"
        );

        if cli.dry_run {
            return Ok(format_plan_summary(&summary, &cli.format));
        }

        let fuser = LipoFuser::new(self.config.fuse.tool.clone());
        let report = execute_plan(&plan, &cli.dest, &fuser)?;
        Ok(format_report(&report, &cli.format))
    }
}
