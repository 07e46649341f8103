//! Judge-produced diff reports
//!
//! The output comparator writes a side-by-side report:
//!
//! ```text
//! ### DIFFERENCES FROM LINE 2 ###
//! _ team ? reference
//! 1 1 2  = 1 2
//! 2 3    ! 4
//! ```
//!
//! The `_` padding of the legend line gives the width of the line number
//! column and the `?` marks the column of the comparison marker.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::JUDGE_DIFF_HEADER;
use crate::models::{JudgeDiff, JudgeDiffLine, LineClass};
use crate::utils::html::escape;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{}([+-]?\d+)", regex::escape(JUDGE_DIFF_HEADER)))
        .expect("valid judge diff header regex")
});

/// Map a three character marker (`' = '`, `' ! '`, ...) to a line class
pub fn classify_marker(marker: &str) -> LineClass {
    match marker {
        " = " => LineClass::Equal,
        " ! " => LineClass::Differ,
        " $ " => LineClass::EndOfLine,
        " > " | " < " => LineClass::Extra,
        _ => LineClass::Plain,
    }
}

fn char_slice(chars: &[char], start: usize, len: usize) -> String {
    chars.iter().skip(start).take(len).collect()
}

/// Parse a judge diff report; `None` if the text does not start with one
pub fn parse(diff_text: &str) -> Option<JudgeDiff> {
    let mut lines = diff_text.split('\n');
    let header = lines.next()?;
    let first_difference = HEADER.captures(header)?.get(1)?.as_str().parse().ok()?;

    let legend = lines.next();
    let (number_width, marker_at) = match legend {
        Some(legend) => {
            let chars: Vec<char> = legend.chars().collect();
            let number_width = chars.iter().rposition(|&c| c == '_').map_or(1, |p| p + 1);
            let marker_at = chars
                .iter()
                .position(|&c| c == '?')
                .and_then(|p| p.checked_sub(number_width + 1));
            (number_width, marker_at)
        }
        None => (1, None),
    };

    let body = lines
        .take_while(|line| !line.is_empty())
        .map(|line| {
            let chars: Vec<char> = line.chars().collect();
            let label = char_slice(&chars, 0, number_width);
            let body_chars: Vec<char> = chars.iter().skip(number_width + 1).copied().collect();
            let class = match marker_at {
                Some(at) if at >= 1 => classify_marker(&char_slice(&body_chars, at - 1, 3)),
                _ => LineClass::Plain,
            };
            JudgeDiffLine {
                label,
                class,
                body: body_chars.into_iter().collect(),
            }
        })
        .collect();

    Some(JudgeDiff {
        first_difference,
        header: header.to_string(),
        legend: legend.map(str::to_string),
        lines: body,
    })
}

/// Render a parsed judge diff, one styled line per comparison line
pub fn render(diff: &JudgeDiff) -> String {
    let mut html = escape(&diff.header);
    html.push('\n');
    if let Some(legend) = &diff.legend {
        html.push_str(&escape(legend));
        html.push('\n');
    }
    for line in &diff.lines {
        let body = match line.class.css_class() {
            Some(css) => format!("<span class='{}'>{}</span>", css, escape(&line.body)),
            None => escape(&line.body),
        };
        html.push_str(&format!("{} {}\n", escape(&line.label), body));
    }
    html
}

/// Render a judge diff report, or the escaped text if it is not one
pub fn parse_judge_diff(diff_text: &str) -> String {
    match parse(diff_text) {
        Some(diff) => render(&diff),
        None => escape(diff_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "### DIFFERENCES FROM LINE 2 ###\n\
                          _ team ? reference\n\
                          1 1 2  = 1 2\n\
                          2 3    ! 4\n\
                          3 5    $ \n\
                          4      > 6\n";

    #[test]
    fn test_parse_report() {
        let diff = parse(REPORT).unwrap();
        assert_eq!(diff.first_difference, 2);
        assert_eq!(diff.legend.as_deref(), Some("_ team ? reference"));
        let classes: Vec<LineClass> = diff.lines.iter().map(|l| l.class).collect();
        assert_eq!(
            classes,
            vec![
                LineClass::Equal,
                LineClass::Differ,
                LineClass::EndOfLine,
                LineClass::Extra
            ]
        );
        assert_eq!(diff.lines[0].label, "1");
        assert_eq!(diff.lines[0].body, "1 2  = 1 2");
    }

    #[test]
    fn test_render_report() {
        let html = parse_judge_diff(REPORT);
        assert!(html.starts_with("### DIFFERENCES FROM LINE 2 ###\n_ team ? reference\n"));
        assert!(html.contains("1 <span class='correct'>1 2  = 1 2</span>\n"));
        assert!(html.contains("2 <span class='differ'>3    ! 4</span>\n"));
        assert!(html.contains("3 <span class='endline'>5    $ </span>\n"));
        assert!(html.contains("4 <span class='extra'>     &gt; 6</span>\n"));
    }

    #[test]
    fn test_unrecognised_marker_is_plain() {
        let html = parse_judge_diff("### DIFFERENCES FROM LINE 1 ###\n_ team ? reference\n1 a   ? b\n");
        assert!(html.ends_with("1 a   ? b\n"));
    }

    #[test]
    fn test_other_text_is_escaped() {
        assert_eq!(parse_judge_diff("no <diff> here"), "no &lt;diff&gt; here");
        assert_eq!(parse_judge_diff(""), "");
    }

    #[test]
    fn test_stops_at_empty_line() {
        let diff = parse("### DIFFERENCES FROM LINE 1 ###\n_ team ? reference\n1 a = a\n\n2 b ! c\n").unwrap();
        assert_eq!(diff.lines.len(), 1);
    }
}
