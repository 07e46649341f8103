//! Renderers turning judge output into HTML fragments
//!
//! Each renderer is split into a parse step producing a serializable record
//! (see [`crate::models`]) and a render step producing markup. The functions
//! below chain both.

pub mod interactive_log;
pub mod judge_diff;
pub mod lcs;
pub mod run_diff;
pub mod source_diff;

use crate::config::Config;

pub use judge_diff::parse_judge_diff;
pub use lcs::{LineDiff, compute_lcs_diff};
pub use source_diff::format_unified_diff;

/// Render a raw interactive log as a validator/submission table
pub fn parse_interactive_log(raw: &str) -> String {
    interactive_log::render(&interactive_log::parse(raw))
}

/// Render the differences between team output and the reference output
pub fn render_run_diff(actual: &str, reference: &str) -> String {
    run_diff::render(&run_diff::diff(actual, reference))
}

/// Like [`render_run_diff`], with the context taken from the configuration
pub fn render_run_diff_with_config(actual: &str, reference: &str, config: &Config) -> String {
    run_diff::render(&run_diff::diff_with_context(
        actual,
        reference,
        config.diff.context_lines,
    ))
}

/// Render a unified diff of two submission sources
pub fn render_source_diff(diff_text: &str) -> String {
    format_unified_diff(diff_text)
}
