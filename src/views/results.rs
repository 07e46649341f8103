//! Judging results, host statuses and test case badges

use serde::{Deserialize, Serialize};

use crate::constants::{RESULT_CORRECT, statuses};
use crate::models::TestcaseRun;
use crate::utils::html::escape;

/// Status reported for a judgehost or team connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    NoConnection,
    Critical,
    Warning,
    Ok,
}

impl StatusLevel {
    /// Parse the short status string (`noconn`, `crit`, `warn`, `ok`)
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            statuses::NO_CONNECTION => Some(StatusLevel::NoConnection),
            statuses::CRITICAL => Some(StatusLevel::Critical),
            statuses::WARNING => Some(StatusLevel::Warning),
            statuses::OK => Some(StatusLevel::Ok),
            _ => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusLevel::NoConnection => "text-muted",
            StatusLevel::Critical => "text-danger",
            StatusLevel::Warning => "text-warning",
            StatusLevel::Ok => "text-success",
        }
    }

    /// Font Awesome icon name
    pub fn icon(&self) -> &'static str {
        match self {
            StatusLevel::NoConnection => "question",
            StatusLevel::Critical => "times",
            StatusLevel::Warning => "exclamation",
            StatusLevel::Ok => "check",
        }
    }
}

/// CSS class for a status string; empty for unknown statuses
pub fn status_class(status: &str) -> &'static str {
    StatusLevel::from_status(status).map_or("", |s| s.css_class())
}

/// Icon markup for a status string; unknown statuses are printed as text
pub fn status_icon(status: &str) -> String {
    match StatusLevel::from_status(status) {
        Some(status) => format!(r#"<i class="fas fa-{}-circle"></i>"#, status.icon()),
        None => escape(status),
    }
}

/// Print a judging result as a styled label
///
/// Results still being judged show as `pending` to teams; the jury sees
/// `judging` or `queued`. Invalid submissions are always greyed out.
pub fn print_result(result: Option<&str>, valid: bool, jury: bool) -> String {
    let result = result.filter(|r| !r.is_empty()).unwrap_or("judging");
    let (label, style) = match result {
        "too-late" => (result, "sol_queued"),
        "judging" | "queued" => (if jury { result } else { "pending" }, "sol_queued"),
        RESULT_CORRECT => (result, "sol_correct"),
        _ => (result, "sol_incorrect"),
    };
    format!(
        r#"<span class="sol {}">{}</span>"#,
        if valid { style } else { "disabled" },
        escape(label)
    )
}

/// Bootstrap style of a test case badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    /// Passed
    Success,
    /// Judged with any other result
    Danger,
    /// Not judged yet, judging still running
    Primary,
    /// Not judged, judging finished without running it
    Secondary,
}

impl BadgeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeStyle::Success => "success",
            BadgeStyle::Danger => "danger",
            BadgeStyle::Primary => "primary",
            BadgeStyle::Secondary => "secondary",
        }
    }
}

/// Badge style and text for a single run
pub fn run_badge(run: &TestcaseRun, submission_done: bool) -> (BadgeStyle, String) {
    match run.result.as_deref() {
        Some(RESULT_CORRECT) => (BadgeStyle::Success, "\u{2713}".to_string()),
        Some(result) => (
            BadgeStyle::Danger,
            result.chars().next().map(String::from).unwrap_or_default(),
        ),
        None if submission_done => (BadgeStyle::Secondary, "?".to_string()),
        None => (BadgeStyle::Primary, "?".to_string()),
    }
}

fn badge_markup(style: BadgeStyle, text: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!(
            r#"<span class="badge badge-{} badge-testcase" title="{}">{}</span>"#,
            style.as_str(),
            title,
            escape(text)
        ),
        None => format!(
            r#"<span class="badge badge-{} badge-testcase">{}</span>"#,
            style.as_str(),
            escape(text)
        ),
    }
}

/// Compact strip of badges, one per test case, in the given order
pub fn testcase_results(runs: &[TestcaseRun], submission_done: bool) -> String {
    runs.iter()
        .enumerate()
        .map(|(index, run)| {
            let (style, text) = run_badge(run, submission_done);
            let title = match run.description.as_deref().filter(|d| !d.is_empty()) {
                Some(description) => format!("Run {}: {}", index + 1, escape(description)),
                None => format!("Run {}", index + 1),
            };
            badge_markup(style, &text, Some(&title))
        })
        .collect()
}

/// Badges linking to the per-run details further down the page
///
/// Links to correct runs also reveal the (by default hidden) correct runs.
pub fn display_testcase_results(runs: &[TestcaseRun], submission_done: bool) -> String {
    let mut html = String::new();
    for run in runs {
        let (style, text) = run_badge(run, submission_done);
        let mut title = format!(
            "#{}, desc: {}",
            run.rank,
            escape(run.description.as_deref().unwrap_or_default())
        );
        if let Some(result) = &run.result {
            let runtime = run.runtime.map(|r| r.to_string()).unwrap_or_default();
            title.push_str(&format!(", runtime: {}s, result: {}", runtime, escape(result)));
        }
        let onclick = if run.is_correct() {
            r#" onclick="display_correctruns(true);""#
        } else {
            ""
        };
        html.push_str(&format!(
            r##"<a title="{}" href="#run-{}"{}>{}</a>"##,
            title,
            run.rank,
            onclick,
            badge_markup(style, &text, None)
        ));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rank: u32, result: Option<&str>, description: Option<&str>) -> TestcaseRun {
        TestcaseRun {
            rank,
            description: description.map(str::to_string),
            result: result.map(str::to_string),
            runtime: result.map(|_| 0.25),
        }
    }

    #[test]
    fn test_status_helpers() {
        assert_eq!(status_class("crit"), "text-danger");
        assert_eq!(status_class("bogus"), "");
        assert_eq!(status_icon("ok"), r#"<i class="fas fa-check-circle"></i>"#);
        assert_eq!(status_icon("noconn"), r#"<i class="fas fa-question-circle"></i>"#);
        assert_eq!(status_icon("<b>"), "&lt;b&gt;");
    }

    #[test]
    fn test_print_result() {
        assert_eq!(
            print_result(Some("correct"), true, false),
            r#"<span class="sol sol_correct">correct</span>"#
        );
        assert_eq!(
            print_result(Some("wrong-answer"), true, true),
            r#"<span class="sol sol_incorrect">wrong-answer</span>"#
        );
        assert_eq!(
            print_result(None, true, false),
            r#"<span class="sol sol_queued">pending</span>"#
        );
        assert_eq!(
            print_result(Some(""), true, true),
            r#"<span class="sol sol_queued">judging</span>"#
        );
        assert_eq!(
            print_result(Some("queued"), false, true),
            r#"<span class="sol disabled">queued</span>"#
        );
        assert_eq!(
            print_result(Some("too-late"), true, false),
            r#"<span class="sol sol_queued">too-late</span>"#
        );
    }

    #[test]
    fn test_testcase_results() {
        let runs = vec![
            run(1, Some("correct"), Some("sample")),
            run(2, Some("wrong-answer"), None),
            run(3, None, Some("a < b")),
        ];
        let html = testcase_results(&runs, false);
        assert_eq!(
            html,
            concat!(
                r#"<span class="badge badge-success badge-testcase" title="Run 1: sample">✓</span>"#,
                r#"<span class="badge badge-danger badge-testcase" title="Run 2">w</span>"#,
                r#"<span class="badge badge-primary badge-testcase" title="Run 3: a &lt; b">?</span>"#,
            )
        );
        assert!(testcase_results(&runs, true).contains("badge-secondary"));
    }

    #[test]
    fn test_display_testcase_results() {
        let runs = vec![run(1, Some("correct"), Some("sample")), run(2, None, None)];
        let html = display_testcase_results(&runs, true);
        assert!(html.starts_with(
            r##"<a title="#1, desc: sample, runtime: 0.25s, result: correct" href="#run-1" onclick="display_correctruns(true);">"##
        ));
        assert!(html.contains(
            r##"<a title="#2, desc: " href="#run-2"><span class="badge badge-secondary badge-testcase">?</span></a>"##
        ));
    }
}
