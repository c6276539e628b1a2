//! CLI output: error mapping and text/json formatters for the merge surface.

use crate::error::CliError;
use crate::merge::{MergeReport, PlanSummary};

/// Map domain/service errors to a string for CLI output.
/// Keeps route handlers thin; extend with stable categories if needed.
pub fn map_error(e: &CliError) -> String {
    e.to_string()
}

/// Format a dry-run plan summary.
pub fn format_plan_summary(summary: &PlanSummary, format: &str) -> String {
    if format == "json" {
        return serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
    }

    let mut output = String::from("Merge plan:\n");
    output.push_str(&format!("  Shared directories:  {}\n", summary.directories));
    output.push_str(&format!(
        "  Single-sided copies: {}\n",
        summary.copied_entries
    ));
    output.push_str(&format!(
        "  Identical files:     {}\n",
        summary.identical_files
    ));
    output.push_str(&format!("  Files to fuse:       {}\n", summary.fused_files));
    output.push_str(&format!("  Symlinks:            {}\n", summary.symlinks));
    output.push_str("\nNo changes written (dry run).\n");
    output
}

/// Format the report of a completed merge.
pub fn format_report(report: &MergeReport, format: &str) -> String {
    if format == "json" {
        return serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
    }

    let mut output = String::from("Merge complete:\n");
    output.push_str(&format!("  Directories created: {}\n", report.directories));
    output.push_str(&format!(
        "  Single-sided copies: {}\n",
        report.copied_entries
    ));
    output.push_str(&format!(
        "  Identical files:     {}\n",
        report.identical_files
    ));
    output.push_str(&format!("  Files fused:         {}\n", report.fused_files));
    output.push_str(&format!("  Symlinks created:    {}\n", report.symlinks));
    if report.fuse_fallbacks > 0 {
        output.push_str(&format!(
            "  Fuse fallbacks:      {} (copied without fusing; see warnings)\n",
            report.fuse_fallbacks
        ));
    }
    output
}
