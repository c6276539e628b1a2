//! CLI parse: clap types for unibin. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// unibin - merge two per-architecture build trees into a universal tree
#[derive(Parser)]
#[command(name = "unibin")]
#[command(about = "Merge two per-architecture build trees into a universal binary tree")]
pub struct Cli {
    /// Build tree for the first architecture
    pub tree_a: PathBuf,

    /// Build tree for the second architecture
    pub tree_b: PathBuf,

    /// Destination for the merged universal tree
    pub dest: PathBuf,

    /// Configuration file path (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fuse tool executable (overrides config; default "lipo")
    #[arg(long)]
    pub fuse_tool: Option<String>,

    /// Plan the merge and print a summary without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for the summary (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Enable verbose logging (default: off)
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging output
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}
