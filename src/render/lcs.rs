//! Token-level LCS comparison of a single line pair

use crate::constants::{CUT_OFF_NOTICE, END_OF_LINE_MARKER, LCS_TOKEN_CUTOFF};
use crate::models::LineClass;
use crate::utils::html::escape;

/// Comparison result for one line pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    pub class: LineClass,
    /// Inline HTML markup
    pub rendered: String,
}

impl LineDiff {
    pub fn any_diff(&self) -> bool {
        self.class.is_difference()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Common(usize),
    Delete(usize),
    Insert(usize),
}

/// Align two token sequences, preferring the earliest matches
fn align(actual: &[&str], reference: &[&str]) -> Vec<Op> {
    let (n, m) = (actual.len(), reference.len());
    let width = m + 1;
    // suffix[i * width + j] = LCS length of actual[i..] and reference[j..]
    let mut suffix = vec![0usize; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            suffix[i * width + j] = if actual[i] == reference[j] {
                suffix[(i + 1) * width + j + 1] + 1
            } else {
                suffix[(i + 1) * width + j].max(suffix[i * width + j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if actual[i] == reference[j] {
            ops.push(Op::Common(i));
            i += 1;
            j += 1;
        } else if suffix[(i + 1) * width + j] >= suffix[i * width + j + 1] {
            ops.push(Op::Delete(i));
            i += 1;
        } else {
            ops.push(Op::Insert(j));
            j += 1;
        }
    }
    ops.extend((i..n).map(Op::Delete));
    ops.extend((j..m).map(Op::Insert));
    ops
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn trailing_whitespace(line: &str) -> &str {
    &line[line.trim_end().len()..]
}

fn end_of_line_marker() -> String {
    format!(r#"<span class="endline">{}</span>"#, END_OF_LINE_MARKER)
}

fn join_escaped(tokens: &[&str]) -> String {
    tokens.iter().map(|t| escape(t)).collect::<Vec<_>>().join(" ")
}

/// Compare a line of team output with the reference line
///
/// Lines are compared as whitespace-separated tokens, so runs of spaces
/// inside a line do not matter. Only the first tokens of each line are
/// aligned; a notice marks lines that were cut off. Lines where one side
/// merely continues the other are not aligned and are shown in full.
pub fn compute_lcs_diff(actual: &str, reference: &str) -> LineDiff {
    let actual_tokens: Vec<&str> = actual.split_whitespace().collect();
    let reference_tokens: Vec<&str> = reference.split_whitespace().collect();

    if actual_tokens == reference_tokens {
        return compare_whitespace(actual, reference);
    }

    if actual_tokens.starts_with(&reference_tokens) || reference_tokens.starts_with(&actual_tokens) {
        return LineDiff {
            class: LineClass::Extra,
            rendered: render_extra(&actual_tokens, &reference_tokens),
        };
    }

    let cut_off =
        actual_tokens.len() > LCS_TOKEN_CUTOFF || reference_tokens.len() > LCS_TOKEN_CUTOFF;
    let actual_head = &actual_tokens[..actual_tokens.len().min(LCS_TOKEN_CUTOFF)];
    let reference_head = &reference_tokens[..reference_tokens.len().min(LCS_TOKEN_CUTOFF)];

    let mut rendered = render_differ(actual_head, reference_head);
    if cut_off {
        if !rendered.is_empty() {
            rendered.push(' ');
        }
        rendered.push_str(CUT_OFF_NOTICE);
    }

    LineDiff {
        class: LineClass::Differ,
        rendered,
    }
}

/// Both lines hold the same tokens; only the surrounding whitespace can differ
///
/// Changed indentation counts as a real difference, changed trailing
/// whitespace as an end-of-line difference.
fn compare_whitespace(actual: &str, reference: &str) -> LineDiff {
    let (actual_indent, reference_indent) = (leading_whitespace(actual), leading_whitespace(reference));
    let same_ending = trailing_whitespace(actual) == trailing_whitespace(reference);

    if actual_indent != reference_indent {
        let mut rendered = String::new();
        if !actual_indent.is_empty() {
            rendered.push_str(&format!("<del>{}</del>", escape(actual_indent)));
        }
        if !reference_indent.is_empty() {
            rendered.push_str(&format!("<ins>{}</ins>", escape(reference_indent)));
        }
        rendered.push_str(&escape(actual.trim()));
        if !same_ending {
            rendered.push_str(&end_of_line_marker());
        }
        return LineDiff {
            class: LineClass::Differ,
            rendered,
        };
    }

    if same_ending {
        LineDiff {
            class: LineClass::Equal,
            rendered: escape(actual),
        }
    } else {
        LineDiff {
            class: LineClass::EndOfLine,
            rendered: format!("{}{}", escape(actual.trim_end()), end_of_line_marker()),
        }
    }
}

/// One side is a prefix of the other: show the surplus as extra content
fn render_extra(actual: &[&str], reference: &[&str]) -> String {
    let common = actual.len().min(reference.len());
    let (tag, surplus) = if actual.len() > common {
        ("del", &actual[common..])
    } else {
        ("ins", &reference[common..])
    };

    let mut parts = Vec::new();
    if common > 0 {
        parts.push(join_escaped(&actual[..common]));
    }
    if !surplus.is_empty() {
        parts.push(format!(
            r#"<{tag} class="extra">{}</{tag}>"#,
            join_escaped(surplus)
        ));
    }
    parts.join(" ")
}

fn render_differ(actual: &[&str], reference: &[&str]) -> String {
    align(actual, reference)
        .into_iter()
        .map(|op| match op {
            Op::Common(i) => escape(actual[i]),
            Op::Delete(i) => format!("<del>{}</del>", escape(actual[i])),
            Op::Insert(j) => format!("<ins>{}</ins>", escape(reference[j])),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
