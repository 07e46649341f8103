//! Named filter registry for template engines
//!
//! Every helper of the crate is registered under the name templates use for
//! it (`printtime`, `runDiff`, ...). Filters take the piped value as input and
//! positional arguments as a slice of JSON values:
//!
//! ```ignore
//! use hermes::filters;
//! use serde_json::json;
//!
//! let html = filters::apply("printSize", &json!(1536), &[json!(1)], &config)?;
//! assert_eq!(html, json!("1.5&nbsp;KB"));
//! ```
//!
//! Entries marked `is_safe` produce markup that must not be escaped again.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde_json::Value;

use crate::config::Config;
use crate::error::{RenderError, RenderResult};
use crate::models::TestcaseRun;
use crate::render;
use crate::utils::{color, format, time, wrap};
use crate::views::{self, EditorOptions};

/// Positional filter arguments
pub type FilterArgs = [Value];

/// Filter implementation
pub type FilterFn = Arc<dyn Fn(&Value, &FilterArgs, &Config) -> RenderResult<Value> + Send + Sync>;

/// Whether an entry is used as `value|filter` or called as `function(...)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Filter,
    Function,
}

/// A registered filter
#[derive(Clone)]
pub struct FilterEntry {
    pub func: FilterFn,
    pub kind: FilterKind,
    /// Output is HTML that templates must not escape
    pub is_safe: bool,
}

/// Registry mapping template names to filters
pub struct FilterRegistry {
    filters: HashMap<String, FilterEntry>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Register a filter.
    pub fn register<F>(&mut self, name: impl Into<String>, kind: FilterKind, is_safe: bool, func: F)
    where
        F: Fn(&Value, &FilterArgs, &Config) -> RenderResult<Value> + Send + Sync + 'static,
    {
        self.filters.insert(
            name.into(),
            FilterEntry {
                func: Arc::new(func),
                kind,
                is_safe,
            },
        );
    }

    /// Check if a filter is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Look up a filter by name.
    pub fn get(&self, name: &str) -> Option<&FilterEntry> {
        self.filters.get(name)
    }

    /// List all registered filter names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Invoke a filter by name.
    pub fn apply(&self, name: &str, input: &Value, args: &FilterArgs, config: &Config) -> RenderResult<Value> {
        let entry = self
            .get(name)
            .ok_or_else(|| RenderError::UnknownFilter(name.to_string()))?;
        tracing::trace!(filter = name, args = args.len(), "applying filter");
        (entry.func)(input, args, config)
    }

    /// Registry with every helper of the crate
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_time_filters(&mut registry);
        register_result_filters(&mut registry);
        register_render_filters(&mut registry);
        register_text_filters(&mut registry);
        tracing::debug!(filters = registry.filters.len(), "filter registry built");
        registry
    }
}

static REGISTRY: LazyLock<FilterRegistry> = LazyLock::new(FilterRegistry::with_defaults);

/// The shared default registry
pub fn registry() -> &'static FilterRegistry {
    &REGISTRY
}

/// Invoke a filter of the default registry
pub fn apply(name: &str, input: &Value, args: &FilterArgs, config: &Config) -> RenderResult<Value> {
    registry().apply(name, input, args, config)
}

// =============================================================================
// ARGUMENT CONVERSION
// =============================================================================

fn text<'a>(filter: &str, value: &'a Value) -> RenderResult<Cow<'a, str>> {
    match value {
        Value::String(s) => Ok(Cow::Borrowed(s)),
        Value::Null => Ok(Cow::Borrowed("")),
        Value::Number(n) => Ok(Cow::Owned(n.to_string())),
        other => Err(RenderError::invalid_argument(
            filter,
            format!("expected text, got {}", other),
        )),
    }
}

fn number(filter: &str, value: &Value) -> RenderResult<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| RenderError::invalid_argument(filter, format!("expected a number, got {}", value)))
}

fn unsigned(filter: &str, value: &Value) -> RenderResult<u64> {
    let n = number(filter, value)?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(RenderError::invalid_argument(
            filter,
            format!("expected a non-negative integer, got {}", value),
        ));
    }
    Ok(n as u64)
}

fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Positional argument, treating `null` as absent
fn arg(args: &FilterArgs, index: usize) -> Option<&Value> {
    args.get(index).filter(|v| !v.is_null())
}

fn arg_text<'a>(filter: &str, args: &'a FilterArgs, index: usize) -> RenderResult<Option<Cow<'a, str>>> {
    arg(args, index).map(|v| text(filter, v)).transpose()
}

fn arg_flag(args: &FilterArgs, index: usize, default: bool) -> bool {
    arg(args, index).map_or(default, flag)
}

fn timestamp(filter: &str, value: &Value) -> RenderResult<chrono::DateTime<chrono::Utc>> {
    if value.is_null() {
        return Ok(time::now_utc());
    }
    let seconds = number(filter, value)?;
    time::from_unix_seconds(seconds)
        .ok_or_else(|| RenderError::invalid_argument(filter, format!("timestamp out of range: {}", seconds)))
}

fn testcase_runs(filter: &str, value: &Value) -> RenderResult<Vec<TestcaseRun>> {
    serde_json::from_value(value.clone())
        .map_err(|e| RenderError::invalid_argument(filter, e.to_string()))
}

fn string(s: impl Into<String>) -> RenderResult<Value> {
    Ok(Value::String(s.into()))
}

// =============================================================================
// REGISTRATION
// =============================================================================

fn register_time_filters(registry: &mut FilterRegistry) {
    use FilterKind::{Filter, Function};

    registry.register("printtimediff", Filter, false, |input, args, _| {
        let start = number("printtimediff", input)?;
        let end = match arg(args, 0) {
            Some(end) => number("printtimediff", end)?,
            None => time::now_utc().timestamp_micros() as f64 / 1_000_000.0,
        };
        string(time::print_time_diff(start, end))
    });

    registry.register("printtime", Filter, false, |input, args, config| {
        let at = timestamp("printtime", input)?;
        let format = arg_text("printtime", args, 0)?;
        let contest_start = arg(args, 1).map(|v| timestamp("printtime", v)).transpose()?;
        string(time::print_time(&at, format.as_deref(), contest_start.as_ref(), config))
    });

    registry.register("printtimeHover", Filter, true, |input, args, config| {
        let at = timestamp("printtimeHover", input)?;
        let contest_start = arg(args, 0).map(|v| timestamp("printtimeHover", v)).transpose()?;
        string(views::print_time_hover(&at, contest_start.as_ref(), config))
    });

    registry.register("printTimeRelative", Filter, false, |input, args, _| {
        let relative = number("printTimeRelative", input)?;
        string(time::print_time_relative(relative, arg_flag(args, 0, false)))
    });

    registry.register("printContestStart", Filter, false, |input, args, config| {
        let start = timestamp("printContestStart", input)?;
        let enabled = arg_flag(args, 0, true);
        string(views::print_contest_start(&start, enabled, &time::now_utc(), config))
    });

    registry.register("scoreTime", Filter, false, |input, _, config| {
        let seconds = number("scoreTime", input)?;
        Ok(Value::from(time::score_time(seconds, &config.scoring)))
    });

    registry.register("calculatePenaltyTime", Function, false, |input, args, config| {
        let submissions = arg(args, 0)
            .map(|v| unsigned("calculatePenaltyTime", v))
            .transpose()?
            .unwrap_or(0);
        let submissions = u32::try_from(submissions).map_err(|_| {
            RenderError::invalid_argument("calculatePenaltyTime", "too many submissions")
        })?;
        Ok(Value::from(time::calculate_penalty_time(
            flag(input),
            submissions,
            &config.scoring,
        )))
    });
}

fn register_result_filters(registry: &mut FilterRegistry) {
    use FilterKind::Filter;

    registry.register("printResult", Filter, true, |input, args, _| {
        let result = text("printResult", input)?;
        string(views::print_result(
            Some(result.as_ref()),
            arg_flag(args, 0, true),
            arg_flag(args, 1, false),
        ))
    });

    registry.register("statusClass", Filter, false, |input, _, _| {
        string(views::status_class(&text("statusClass", input)?))
    });

    registry.register("statusIcon", Filter, true, |input, _, _| {
        string(views::status_icon(&text("statusIcon", input)?))
    });

    registry.register("testcaseResults", Filter, true, |input, args, _| {
        let runs = testcase_runs("testcaseResults", input)?;
        string(views::testcase_results(&runs, arg_flag(args, 0, false)))
    });

    registry.register("displayTestcaseResults", Filter, true, |input, args, _| {
        let runs = testcase_runs("displayTestcaseResults", input)?;
        string(views::display_testcase_results(&runs, arg_flag(args, 0, false)))
    });

    registry.register("externalCcsUrl", Filter, false, |input, args, config| {
        let submission_id = unsigned("externalCcsUrl", input)?;
        let external_id = arg_text("externalCcsUrl", args, 0)?;
        Ok(views::external_ccs_url(submission_id, external_id.as_deref(), config)
            .map_or(Value::Null, Value::String))
    });
}

fn register_render_filters(registry: &mut FilterRegistry) {
    use FilterKind::Filter;

    registry.register("interactiveLog", Filter, true, |input, _, _| {
        string(render::parse_interactive_log(&text("interactiveLog", input)?))
    });

    registry.register("runDiff", Filter, true, |input, args, config| {
        let actual = text("runDiff", input)?;
        let reference = arg_text("runDiff", args, 0)?.unwrap_or_default();
        string(render::render_run_diff_with_config(&actual, &reference, config))
    });

    registry.register("parseRunDiff", Filter, true, |input, _, _| {
        string(render::parse_judge_diff(&text("parseRunDiff", input)?))
    });

    registry.register("showDiff", Filter, true, |input, _, _| {
        string(render::render_source_diff(&text("showDiff", input)?))
    });

    registry.register("codeEditor", Filter, true, |input, args, _| {
        let code = text("codeEditor", input)?;
        let index = arg_text("codeEditor", args, 0)?.unwrap_or_default();
        let language = arg_text("codeEditor", args, 1)?;
        let element_to_update = arg_text("codeEditor", args, 3)?;
        let filename = arg_text("codeEditor", args, 4)?;
        let options = EditorOptions {
            language: language.as_deref(),
            editable: arg_flag(args, 2, false),
            element_to_update: element_to_update.as_deref(),
            filename: filename.as_deref(),
        };
        string(views::code_editor(&code, &index, &options))
    });
}

fn register_text_filters(registry: &mut FilterRegistry) {
    use FilterKind::{Filter, Function};

    registry.register("printYesNo", Filter, false, |input, _, _| {
        string(format::print_yes_no(flag(input)))
    });

    registry.register("printSize", Filter, true, |input, args, _| {
        let size = unsigned("printSize", input)?;
        let decimals = arg(args, 0).map(|v| unsigned("printSize", v)).transpose()?.unwrap_or(1);
        string(format::print_size(size, decimals as usize))
    });

    registry.register("printHost", Filter, true, |input, args, _| {
        string(format::print_host(&text("printHost", input)?, arg_flag(args, 0, false)))
    });

    registry.register("lineCount", Filter, false, |input, _, _| {
        Ok(Value::from(format::line_count(&text("lineCount", input)?)))
    });

    registry.register("base64", Filter, false, |input, _, _| {
        string(format::base64_encode(text("base64", input)?.as_bytes()))
    });

    registry.register("base64_decode", Filter, false, |input, _, _| {
        string(format::base64_decode(&text("base64_decode", input)?)?)
    });

    registry.register("descriptionExpand", Filter, true, |input, _, _| {
        let description = text("descriptionExpand", input)?;
        string(views::description_expand(Some(description.as_ref())))
    });

    registry.register("wrapUnquoted", Filter, false, |input, args, config| {
        let width = arg(args, 0)
            .map(|v| unsigned("wrapUnquoted", v))
            .transpose()?
            .map_or(config.display.wrap_width, |w| w as usize);
        let quote = arg_text("wrapUnquoted", args, 1)?.unwrap_or(Cow::Borrowed(">"));
        string(wrap::wrap_unquoted(&text("wrapUnquoted", input)?, width, &quote))
    });

    registry.register("hexColorToRGBA", Filter, false, |input, args, _| {
        let opacity = arg(args, 0).map(|v| number("hexColorToRGBA", v)).transpose()?.unwrap_or(1.0);
        string(color::hex_color_to_rgba(&text("hexColorToRGBA", input)?, opacity))
    });

    registry.register("button", Function, true, |input, args, _| {
        let url = text("button", input)?;
        let label = arg_text("button", args, 0)?.unwrap_or_default();
        let button_type = arg_text("button", args, 1)?.unwrap_or(Cow::Borrowed("primary"));
        let icon = arg_text("button", args, 2)?;
        string(views::button(
            &url,
            &label,
            &button_type,
            icon.as_deref(),
            arg_flag(args, 3, false),
        ))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str, input: Value, args: &[Value]) -> RenderResult<Value> {
        apply(name, &input, args, &Config::default())
    }

    #[test]
    fn test_registry_contains_template_names() {
        let names = [
            "printtimediff",
            "printtime",
            "printtimeHover",
            "printResult",
            "printHost",
            "printYesNo",
            "printSize",
            "displayTestcaseResults",
            "testcaseResults",
            "externalCcsUrl",
            "lineCount",
            "base64",
            "base64_decode",
            "parseRunDiff",
            "runDiff",
            "interactiveLog",
            "codeEditor",
            "showDiff",
            "printContestStart",
            "printTimeRelative",
            "scoreTime",
            "statusClass",
            "statusIcon",
            "descriptionExpand",
            "wrapUnquoted",
            "hexColorToRGBA",
            "button",
            "calculatePenaltyTime",
        ];
        for name in names {
            assert!(registry().contains(name), "missing filter {}", name);
        }
        assert_eq!(registry().list().len(), names.len());
    }

    #[test]
    fn test_unknown_filter() {
        let err = call("nope", json!("x"), &[]).unwrap_err();
        assert!(matches!(err, RenderError::UnknownFilter(ref name) if name == "nope"));
    }

    #[test]
    fn test_safe_and_kind_flags() {
        assert!(registry().get("runDiff").unwrap().is_safe);
        assert!(!registry().get("printtime").unwrap().is_safe);
        assert_eq!(registry().get("button").unwrap().kind, FilterKind::Function);
        assert_eq!(registry().get("printSize").unwrap().kind, FilterKind::Filter);
    }

    #[test]
    fn test_scalar_filters() {
        assert_eq!(call("printSize", json!(1536), &[json!(1)]).unwrap(), json!("1.5&nbsp;KB"));
        assert_eq!(call("printYesNo", json!(true), &[]).unwrap(), json!("Yes"));
        assert_eq!(call("lineCount", json!("a\nb\n"), &[]).unwrap(), json!(2));
        assert_eq!(call("base64", json!("hi"), &[]).unwrap(), json!("aGk="));
        assert_eq!(call("base64_decode", json!("aGk="), &[]).unwrap(), json!("hi"));
        assert_eq!(call("printtimediff", json!(0), &[json!(61)]).unwrap(), json!("01:01"));
        assert_eq!(call("scoreTime", json!(125.5), &[]).unwrap(), json!(2));
        assert_eq!(
            call("calculatePenaltyTime", json!(true), &[json!(3)]).unwrap(),
            json!(40)
        );
    }

    #[test]
    fn test_render_filters() {
        let html = call("interactiveLog", json!("[0.1/2]>: ok\n"), &[]).unwrap();
        assert!(html.as_str().unwrap().contains("<td class=\"output_text\">ok</td>"));

        let html = call("runDiff", json!("1 5 3"), &[json!("1 2 3")]).unwrap();
        assert!(html.as_str().unwrap().contains("<del>5</del>"));

        let html = call("showDiff", json!("+a\n"), &[]).unwrap();
        assert_eq!(html, json!("<span class='diff-add'>+a</span>\n"));
    }

    #[test]
    fn test_testcase_filters_take_json_runs() {
        let runs = json!([
            {"rank": 1, "description": "sample", "result": "correct", "runtime": 0.1},
            {"rank": 2, "description": null}
        ]);
        let html = call("testcaseResults", runs.clone(), &[json!(false)]).unwrap();
        assert!(html.as_str().unwrap().contains("badge-success"));
        assert!(html.as_str().unwrap().contains("badge-primary"));

        let err = call("testcaseResults", json!("nope"), &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_invalid_arguments() {
        let err = call("printSize", json!("big"), &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        let err = call("printSize", json!(-1), &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        let err = call("base64_decode", json!("@@@"), &[]).unwrap_err();
        assert_eq!(err.error_code(), "DECODE_ERROR");
        let err = call("statusClass", json!(["ok"]), &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_external_ccs_url_uses_config() {
        let mut config = Config::default();
        assert_eq!(
            apply("externalCcsUrl", &json!(7), &[], &config).unwrap(),
            Value::Null
        );
        config.display.ext_ccs_url = Some("https://ccs/".to_string());
        assert_eq!(
            apply("externalCcsUrl", &json!(7), &[json!("x-1")], &config).unwrap(),
            json!("https://ccs/x-1")
        );
    }

    #[test]
    fn test_wrap_unquoted_default_width() {
        let long = "word ".repeat(30);
        let wrapped = call("wrapUnquoted", json!(long), &[]).unwrap();
        assert!(wrapped.as_str().unwrap().lines().all(|l| l.chars().count() <= 75));
        let wrapped = call("wrapUnquoted", json!("aaa bbb"), &[json!(3)]).unwrap();
        assert_eq!(wrapped, json!("aaa\nbbb"));
    }

    #[test]
    fn test_function_button() {
        let html = call("button", json!("/x"), &[json!("Go"), Value::Null, json!("play")]).unwrap();
        assert_eq!(
            html,
            json!(r#"<a href="/x" class="btn btn-primary" title="Go"><i class="fas fa-play"></i>&nbsp;Go</a>"#)
        );
    }
}
