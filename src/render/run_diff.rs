//! Team output vs reference output diff
//!
//! Every line pair is compared with [`compute_lcs_diff`]; only the region
//! from the first to the last differing line (plus some context) is shown.

use crate::constants::DEFAULT_DIFF_CONTEXT_LINES;
use crate::models::{DiffLine, DiffWindow};
use crate::render::lcs::compute_lcs_diff;

/// Diff team output against the reference with the default context
pub fn diff(actual: &str, reference: &str) -> DiffWindow {
    diff_with_context(actual, reference, DEFAULT_DIFF_CONTEXT_LINES)
}

/// Diff team output against the reference, showing `context` lines around
/// the first and last mismatch
pub fn diff_with_context(actual: &str, reference: &str, context: usize) -> DiffWindow {
    let actual_lines: Vec<&str> = actual.trim().split('\n').collect();
    let reference_lines: Vec<&str> = reference.trim().split('\n').collect();
    let compared = actual_lines.len().min(reference_lines.len());

    let mut lines = Vec::with_capacity(compared);
    let mut first_err: Option<usize> = None;
    let mut last_err: Option<usize> = None;
    for (i, (team_line, reference_line)) in actual_lines.iter().zip(&reference_lines).enumerate() {
        let line = compute_lcs_diff(team_line, reference_line);
        if line.any_diff() {
            first_err.get_or_insert(i);
            last_err = Some(i);
        }
        lines.push(DiffLine {
            line_number: i + 1,
            class: line.class,
            rendered: line.rendered,
        });
    }

    let (Some(first_err), Some(last_err)) = (first_err, last_err) else {
        return DiffWindow::empty(compared);
    };

    let first_shown = first_err.saturating_sub(context);
    let last_shown = last_err.saturating_add(context).min(compared - 1);
    tracing::debug!(
        first_err,
        last_err,
        first_shown,
        last_shown,
        compared,
        "computed run diff window"
    );

    DiffWindow {
        bounds: Some((first_shown, last_shown)),
        lines: lines.drain(first_shown..=last_shown).collect(),
        truncated_before: first_shown > 0,
        truncated_after: last_shown < compared - 1,
        compared_lines: compared,
    }
}

const ELLIPSIS_ROW: &str = "<tr><td class=\"linenr\">[...]</td><td/></tr>\n";

/// Render a diff window as a two-column table of line numbers and markup
pub fn render(window: &DiffWindow) -> String {
    let mut html = String::from("<table class=\"lcsdiff output_text\">\n");
    if window.truncated_before {
        html.push_str(ELLIPSIS_ROW);
    }
    for line in &window.lines {
        html.push_str(&format!(
            "<tr><td class=\"linenr\">{}</td><td>{}</td></tr>\n",
            line.line_number, line.rendered
        ));
    }
    if window.truncated_after {
        html.push_str(ELLIPSIS_ROW);
    }
    html.push_str("</table>\n");
    html
}
