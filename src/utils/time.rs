//! Time utilities

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};

use crate::config::{Config, ScoringConfig};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Convert a (fractional) unix timestamp to a UTC datetime
pub fn from_unix_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Format a datetime with a strftime format, rejecting malformed formats
pub fn format_datetime<Tz>(at: &DateTime<Tz>, format: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    Some(at.format_with_items(items.into_iter()).to_string())
}

/// Print the time elapsed between two timestamps as `[Nd ][H:]MM:SS`
pub fn print_time_diff(start: f64, end: f64) -> String {
    let mut diff = (end - start).floor().max(0.0) as i64;
    let mut ret = String::new();

    if diff >= SECONDS_PER_DAY {
        let days = diff / SECONDS_PER_DAY;
        ret.push_str(&format!("{}d ", days));
        diff -= days * SECONDS_PER_DAY;
    }
    if diff >= SECONDS_PER_HOUR {
        let hours = diff / SECONDS_PER_HOUR;
        ret.push_str(&format!("{}:", hours));
        diff -= hours * SECONDS_PER_HOUR;
    }
    ret.push_str(&format!("{:02}:{:02}", diff / 60, diff % 60));
    ret
}

/// Print a time, either absolute (strftime) or relative to the contest start
///
/// Relative times are used when `contest_start` is given and
/// `show_relative_time` is enabled. They are shown as `[-]H:MM` without
/// seconds, so any part of a minute before the start rounds away from zero:
/// ten seconds before the start prints as `-0:01`.
pub fn print_time<Tz>(
    at: &DateTime<Tz>,
    format: Option<&str>,
    contest_start: Option<&DateTime<Tz>>,
    config: &Config,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if let Some(start) = contest_start.filter(|_| config.display.show_relative_time) {
        return print_contest_relative(at.clone().signed_duration_since(start.clone()).num_seconds());
    }

    let format = format.unwrap_or(config.display.time_format.as_str());
    format_datetime(at, format).unwrap_or_else(|| {
        tracing::warn!(format, "invalid time format, falling back to default");
        format_datetime(at, crate::constants::DEFAULT_TIME_FORMAT).unwrap_or_default()
    })
}

fn print_contest_relative(seconds: i64) -> String {
    let negative = seconds < 0;
    let mut remaining = seconds.abs();

    let secs = remaining % 60;
    remaining /= 60;
    if negative && secs > 0 {
        remaining += 1;
    }
    let minutes = remaining % 60;
    let hours = remaining / 60;

    if negative {
        format!("-{}:{:02}", hours, minutes)
    } else {
        format!("{}:{:02}", hours, minutes)
    }
}

/// Print a relative time in `[-]H:MM:SS[.uuuuuu]` format
pub fn print_time_relative(relative: f64, use_microseconds: bool) -> String {
    let negative = relative < 0.0;
    let magnitude = relative.abs();

    let (whole, fraction) = if use_microseconds {
        let formatted = format!("{:.6}", magnitude);
        let fraction = formatted
            .split_once('.')
            .map(|(_, frac)| frac.to_string())
            .unwrap_or_default();
        (magnitude.floor() as i64, Some(fraction))
    } else if negative {
        // Sign is split off: the ceiling of the magnitude is the floor of the value.
        (magnitude.ceil() as i64, None)
    } else {
        (magnitude.floor() as i64, None)
    };

    let hours = whole / SECONDS_PER_HOUR;
    let minutes = (whole % SECONDS_PER_HOUR) / 60;
    let seconds = whole % 60;
    let sign = if negative { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{}{}:{:02}:{:02}.{}", sign, hours, minutes, seconds, fraction),
        None => format!("{}{}:{:02}:{:02}", sign, hours, minutes, seconds),
    }
}

/// Scoreboard time for a contest-relative time in seconds
pub fn score_time(seconds: f64, scoring: &ScoringConfig) -> i64 {
    if scoring.score_in_seconds {
        seconds.floor() as i64
    } else {
        (seconds / 60.0).floor() as i64
    }
}

/// Penalty time for a problem given the number of submissions made
pub fn calculate_penalty_time(solved: bool, submissions: u32, scoring: &ScoringConfig) -> i64 {
    if !solved || submissions == 0 {
        return 0;
    }
    let penalty = i64::from(submissions - 1) * scoring.penalty_time_minutes;
    if scoring.score_in_seconds {
        penalty * 60
    } else {
        penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn relative_config() -> Config {
        let mut config = Config::default();
        config.display.show_relative_time = true;
        config
    }

    #[test]
    fn test_print_time_diff() {
        assert_eq!(print_time_diff(0.0, 59.9), "00:59");
        assert_eq!(print_time_diff(100.0, 230.0), "02:10");
        assert_eq!(print_time_diff(0.0, 3661.0), "1:01:01");
        assert_eq!(print_time_diff(0.0, 90061.0), "1d 1:01:01");
        assert_eq!(print_time_diff(10.0, 5.0), "00:00");
    }

    #[test]
    fn test_print_time_absolute() {
        let config = Config::default();
        // 2024-01-15T12:34:56Z
        let t = at(1_705_322_096);
        assert_eq!(print_time(&t, None, None, &config), "12:34");
        assert_eq!(print_time(&t, Some("%Y-%m-%d"), None, &config), "2024-01-15");
    }

    #[test]
    fn test_print_time_invalid_format_falls_back() {
        let config = Config::default();
        let t = at(1_705_322_096);
        assert_eq!(print_time(&t, Some("%Q%"), None, &config), "12:34");
    }

    #[test]
    fn test_print_time_relative_to_contest() {
        let config = relative_config();
        let start = at(1_000_000);
        assert_eq!(print_time(&at(1_000_000 + 3725), None, Some(&start), &config), "1:02");
        assert_eq!(print_time(&at(1_000_000 - 10), None, Some(&start), &config), "-0:01");
        assert_eq!(print_time(&at(1_000_000 - 120), None, Some(&start), &config), "-0:02");
        assert_eq!(print_time(&at(1_000_000 - 121), None, Some(&start), &config), "-0:03");
    }

    #[test]
    fn test_relative_time_needs_toggle() {
        let config = Config::default();
        let start = at(0);
        assert_eq!(print_time(&at(3600), None, Some(&start), &config), "01:00");
    }

    #[test]
    fn test_print_time_relative() {
        assert_eq!(print_time_relative(3723.0, false), "1:02:03");
        assert_eq!(print_time_relative(-61.5, false), "-0:01:02");
        assert_eq!(print_time_relative(5.25, true), "0:00:05.250000");
        assert_eq!(print_time_relative(0.0, false), "0:00:00");
    }

    #[test]
    fn test_score_and_penalty() {
        let minutes = ScoringConfig::default();
        let seconds = ScoringConfig {
            score_in_seconds: true,
            ..ScoringConfig::default()
        };
        assert_eq!(score_time(125.7, &minutes), 2);
        assert_eq!(score_time(125.7, &seconds), 125);
        assert_eq!(calculate_penalty_time(true, 3, &minutes), 40);
        assert_eq!(calculate_penalty_time(true, 3, &seconds), 2400);
        assert_eq!(calculate_penalty_time(false, 3, &minutes), 0);
    }

    #[test]
    fn test_from_unix_seconds() {
        let dt = from_unix_seconds(1.5).unwrap();
        assert_eq!(dt.timestamp(), 1);
        assert_eq!(dt.timestamp_subsec_millis(), 500);
        assert!(from_unix_seconds(f64::NAN).is_none());
    }
}
