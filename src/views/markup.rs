//! Markup helpers: buttons, descriptions, code editors and contest times

use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::config::Config;
use crate::constants::DESCRIPTION_COLLAPSED_LINES;
use crate::utils::html::escape;
use crate::utils::time::{format_datetime, print_time};

/// Render a link styled as a button
pub fn button(url: &str, text: &str, button_type: &str, icon: Option<&str>, ajax_modal: bool) -> String {
    let icon = icon
        .filter(|i| !i.is_empty())
        .map(|i| format!(r#"<i class="fas fa-{}"></i>&nbsp;"#, escape(i)))
        .unwrap_or_default();
    let modal = if ajax_modal { " data-ajax-modal" } else { "" };
    let text = escape(text);
    format!(
        r#"<a href="{}" class="btn btn-{}" title="{}"{}>{}{}</a>"#,
        escape(url),
        escape(button_type),
        text,
        modal,
        icon,
        text
    )
}

/// Show a description, collapsing it behind an expand link when it is long
pub fn description_expand(description: Option<&str>) -> String {
    let Some(description) = description.filter(|d| !d.is_empty()) else {
        return String::new();
    };

    let lines: Vec<String> = description.split('\n').map(escape).collect();
    if lines.len() <= DESCRIPTION_COLLAPSED_LINES {
        return lines.join("<br>");
    }

    let collapsed = lines[..DESCRIPTION_COLLAPSED_LINES].join("<br>");
    let expanded = lines.join("<br>");
    format!(
        "<span>\n    <span data-expanded=\"{}\" data-collapsed=\"{}\">\n    {}\n    </span>\n    <br/>\n    <a href=\"javascript:;\" onclick=\"toggleExpand(event)\">[expand]</a>\n</span>",
        escape(&expanded),
        escape(&collapsed),
        collapsed
    )
}

/// Quote a value as a JavaScript string literal safe to embed in a script tag
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

/// Options for [`code_editor`]
#[derive(Debug, Clone, Default)]
pub struct EditorOptions<'a> {
    /// Ace mode name, e.g. `c_cpp`
    pub language: Option<&'a str>,
    pub editable: bool,
    /// Id of a form element kept in sync with the editor contents
    pub element_to_update: Option<&'a str>,
    /// Used to pick the mode when no language is given
    pub filename: Option<&'a str>,
}

/// Embed an Ace code editor showing `code`
pub fn code_editor(code: &str, index: &str, options: &EditorOptions<'_>) -> String {
    let id = format!("editor{}", index);
    let id_literal = js_string(&id);

    let mode = match (options.language, options.filename) {
        (Some(language), _) => format!(
            "{id}.getSession().setMode({});\n",
            js_string(&format!("ace/mode/{}", language))
        ),
        (None, Some(filename)) => format!(
            "var modelist = ace.require('ace/ext/modelist');\n\
             var filePath = {};\n\
             var mode = modelist.getModeForPath(filePath).mode;\n\
             {id}.getSession().setMode(mode);\n",
            js_string(filename)
        ),
        (None, None) => String::new(),
    };

    let sync = match options.element_to_update.filter(|e| !e.is_empty()) {
        Some(element) => format!(
            "{id}.getSession().on('change', function() {{\n    \
             var textarea = document.getElementById({});\n    \
             textarea.value = {id}.getSession().getValue();\n\
             }});\n",
            js_string(element)
        ),
        None => String::new(),
    };

    format!(
        "<div class=\"editor\" id=\"{id_attr}\">{code}</div>\n\
         <script>\n\
         var {id} = ace.edit({id_literal});\n\
         {id}.setTheme(\"ace/theme/eclipse\");\n\
         {id}.setOptions({{ maxLines: Infinity }});\n\
         {id}.setReadOnly({read_only});\n\
         {mode}\
         document.getElementById({id_literal}).editor = {id};\n\
         {sync}\
         </script>",
        id_attr = escape(&id),
        code = escape(code),
        read_only = !options.editable,
    )
}

/// Link to a submission on the external CCS, if one is configured
pub fn external_ccs_url(submission_id: u64, external_id: Option<&str>, config: &Config) -> Option<String> {
    let base = config.display.ext_ccs_url.as_deref()?;
    match external_id.filter(|e| !e.is_empty()) {
        Some(external_id) => Some(format!("{}{}", base, external_id)),
        None => Some(format!("{}{}", base, submission_id)),
    }
}

/// Print a time with the full date and zone in a hover title
pub fn print_time_hover<Tz>(at: &DateTime<Tz>, contest_start: Option<&DateTime<Tz>>, config: &Config) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!(
        r#"<span title="{}">{}</span>"#,
        escape(&format_datetime(at, "%Y-%m-%d %H:%M (%Z)").unwrap_or_default()),
        escape(&print_time(at, None, contest_start, config))
    )
}

/// Describe when a contest starts
///
/// Starts on the same day as `now` only print the time, others the full date.
pub fn print_contest_start<Tz>(start: &DateTime<Tz>, start_enabled: bool, now: &DateTime<Tz>, config: &Config) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let prefix = if start_enabled {
        "scheduled to start "
    } else {
        "start delayed, was scheduled "
    };

    let same_day = format_datetime(now, "%Y%m%d") == format_datetime(start, "%Y%m%d");
    if same_day {
        format!("{}at {}", prefix, print_time(start, None, None, config))
    } else {
        format!(
            "{}on {}",
            prefix,
            print_time(start, Some("%a %d %b %Y %T %Z"), None, config)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_button() {
        assert_eq!(
            button("/jury/teams", "Teams", "primary", None, false),
            r#"<a href="/jury/teams" class="btn btn-primary" title="Teams">Teams</a>"#
        );
        assert_eq!(
            button("/x?a=1&b=2", "Edit", "secondary", Some("edit"), true),
            r#"<a href="/x?a=1&amp;b=2" class="btn btn-secondary" title="Edit" data-ajax-modal><i class="fas fa-edit"></i>&nbsp;Edit</a>"#
        );
    }

    #[test]
    fn test_short_description_is_inlined() {
        assert_eq!(description_expand(None), "");
        assert_eq!(description_expand(Some("a\n<b>")), "a<br>&lt;b&gt;");
    }

    #[test]
    fn test_long_description_collapses() {
        let html = description_expand(Some("1\n2\n3\n4"));
        assert!(html.contains(r#"data-expanded="1&lt;br&gt;2&lt;br&gt;3&lt;br&gt;4""#));
        assert!(html.contains(r#"data-collapsed="1&lt;br&gt;2&lt;br&gt;3""#));
        assert!(html.contains("\n    1<br>2<br>3\n"));
        assert!(html.contains("[expand]"));
    }

    #[test]
    fn test_code_editor() {
        let options = EditorOptions {
            language: Some("c_cpp"),
            ..EditorOptions::default()
        };
        let html = code_editor("if (a < b) {}", "3", &options);
        assert!(html.starts_with(r#"<div class="editor" id="editor3">if (a &lt; b) {}</div>"#));
        assert!(html.contains(r#"var editor3 = ace.edit("editor3");"#));
        assert!(html.contains("editor3.setReadOnly(true);"));
        assert!(html.contains(r#"editor3.getSession().setMode("ace/mode/c_cpp");"#));
        assert!(!html.contains("modelist"));
        assert!(html.ends_with("</script>"));
    }

    #[test]
    fn test_code_editor_by_filename_and_sync() {
        let options = EditorOptions {
            editable: true,
            element_to_update: Some("source"),
            filename: Some("main.py"),
            ..EditorOptions::default()
        };
        let html = code_editor("print(1)", "0", &options);
        assert!(html.contains("editor0.setReadOnly(false);"));
        assert!(html.contains(r#"var filePath = "main.py";"#));
        assert!(html.contains(r#"document.getElementById("source");"#));
    }

    #[test]
    fn test_js_string_cannot_close_script() {
        assert_eq!(js_string("</script>"), r#""<\/script>""#);
        assert_eq!(js_string("a\"b"), r#""a\"b""#);
    }

    #[test]
    fn test_external_ccs_url() {
        let mut config = Config::default();
        assert_eq!(external_ccs_url(42, None, &config), None);
        config.display.ext_ccs_url = Some("https://ccs.example/submissions/".to_string());
        assert_eq!(
            external_ccs_url(42, None, &config).as_deref(),
            Some("https://ccs.example/submissions/42")
        );
        assert_eq!(
            external_ccs_url(42, Some("ext-7"), &config).as_deref(),
            Some("https://ccs.example/submissions/ext-7")
        );
    }

    #[test]
    fn test_print_time_hover() {
        let config = Config::default();
        // 2024-01-15T12:34:56Z
        assert_eq!(
            print_time_hover(&at(1_705_322_096), None, &config),
            r#"<span title="2024-01-15 12:34 (UTC)">12:34</span>"#
        );
    }

    #[test]
    fn test_print_contest_start() {
        let config = Config::default();
        let start = at(1_705_322_096);
        assert_eq!(
            print_contest_start(&start, true, &at(1_705_300_000), &config),
            "scheduled to start at 12:34"
        );
        assert_eq!(
            print_contest_start(&start, false, &at(1_705_000_000), &config),
            "start delayed, was scheduled on Mon 15 Jan 2024 12:34:56 UTC"
        );
    }
}
