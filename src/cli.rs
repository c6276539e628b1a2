//! CLI domain: parse, route, and output only.
//! No domain orchestration; the route layer dispatches to the merge core.

mod output;
mod parse;
mod route;

pub use output::{format_plan_summary, format_report, map_error};
pub use parse::Cli;
pub use route::RunContext;
