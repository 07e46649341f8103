//! Unified diff rendering for submission source comparisons

use crate::utils::html::escape;

/// Render a unified diff, styling added and deleted lines
///
/// Processing ends at the first empty line. Every line is escaped and
/// terminated with a newline.
pub fn format_unified_diff(diff_text: &str) -> String {
    let mut html = String::new();

    for raw_line in diff_text.split('\n') {
        let line = raw_line.trim_matches(|c| c == '\r' || c == '\n');
        if line.is_empty() {
            break;
        }
        let styled = match line.as_bytes()[0] {
            b'-' => format!("<span class='diff-del'>{}</span>", escape(line)),
            b'+' => format!("<span class='diff-add'>{}</span>", escape(line)),
            _ => escape(line),
        };
        html.push_str(&styled);
        html.push('\n');
    }

    html
}
