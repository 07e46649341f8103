//! End-to-end checks of the public rendering API

use hermes::models::LineClass;
use hermes::render::{interactive_log, run_diff};
use hermes::{parse_interactive_log, render_run_diff, render_source_diff};

fn frame(time: &str, direction: char, payload: &str) -> String {
    format!("[{}/{}]{}: {}\n", time, payload.len(), direction, payload)
}

#[test]
fn interactive_log_keeps_frame_order_and_payloads() {
    let payloads = ["3", "1 2\n", "", "ünïcode", "a]b/c["];
    let raw: String = payloads
        .iter()
        .enumerate()
        .map(|(i, p)| frame(&format!("{}.000s", i), if i % 2 == 0 { '>' } else { '<' }, p))
        .collect();

    let log = interactive_log::parse(&raw);
    assert_eq!(log.entries.len(), payloads.len());
    for (i, (entry, payload)) in log.entries.iter().zip(payloads).enumerate() {
        assert_eq!(entry.text, payload);
        assert_eq!(entry.is_validator_side, i % 2 == 0);
        assert_eq!(entry.timestamp, format!("{}.000s", i));
    }
    assert_eq!(log.validator_entries().count(), 3);
    assert_eq!(log.submission_entries().count(), 2);
}

#[test]
fn interactive_log_truncation_notice_follows_table() {
    let raw = format!(
        "{}{}[output display truncated after 512 B]\n",
        frame("0.1", '>', "ping"),
        frame("0.2", '<', "pong")
    );
    let html = parse_interactive_log(&raw);
    assert_eq!(html.matches("<tr><td>").count(), 2);
    assert!(html.ends_with("</table>[output display truncated after 512 B]"));
}

#[test]
fn identical_outputs_give_empty_window() {
    let output = "1\n2\n3\n";
    let window = run_diff::diff(output, output);
    assert!(window.is_empty());
    assert!(!window.truncated_before && !window.truncated_after);
    assert_eq!(render_run_diff(output, output), "<table class=\"lcsdiff output_text\">\n</table>\n");
}

#[test]
fn single_difference_on_first_of_hundred_lines() {
    let reference: Vec<String> = (1..=100).map(|i| i.to_string()).collect();
    let mut actual = reference.clone();
    actual[0] = "0".to_string();

    let window = run_diff::diff(&actual.join("\n"), &reference.join("\n"));
    assert_eq!(window.first_shown(), Some(0));
    assert_eq!(window.last_shown(), Some(5));
    assert!(!window.truncated_before);
    assert!(window.truncated_after);
    assert_eq!(window.lines[0].class, LineClass::Differ);
    assert!(window.lines[1..].iter().all(|l| l.class == LineClass::Equal));

    let html = render_run_diff(&actual.join("\n"), &reference.join("\n"));
    assert!(html.contains("<tr><td class=\"linenr\">1</td><td><del>0</del> <ins>1</ins></td></tr>"));
    assert_eq!(html.matches("[...]").count(), 1);
}

#[test]
fn run_diff_line_classes() {
    let actual = "a b\nx y \n1 2 3\nfoo";
    let reference = "a b\nx y\n1 2\nbar";
    let window = run_diff::diff_with_context(actual, reference, 0);
    assert_eq!(window.bounds, Some((1, 3)));
    let classes: Vec<LineClass> = window.lines.iter().map(|l| l.class).collect();
    assert_eq!(
        classes,
        vec![LineClass::EndOfLine, LineClass::Extra, LineClass::Differ]
    );
}

#[test]
fn source_diff_examples() {
    assert_eq!(
        render_source_diff("-foo\n+bar\nbaz\n\nignored"),
        "<span class='diff-del'>-foo</span>\n<span class='diff-add'>+bar</span>\nbaz\n"
    );
    assert_eq!(render_source_diff(""), "");
}

#[test]
fn payload_markup_is_escaped_everywhere() {
    let hostile = "<script>alert('x') && 1</script>";
    let log_html = parse_interactive_log(&frame("0.1", '<', hostile));
    assert!(!log_html.contains("<script>"));
    assert!(log_html.contains("&lt;script&gt;alert(&#039;x&#039;) &amp;&amp; 1&lt;/script&gt;"));

    let diff_html = render_run_diff(hostile, "safe");
    assert!(!diff_html.contains("<script>"));

    let source_html = render_source_diff(&format!("+{}", hostile));
    assert!(!source_html.contains("<script>"));
}
