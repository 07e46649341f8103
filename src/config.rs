//! Rendering configuration
//!
//! Time format, relative contest time, scoring mode and the external CCS link
//! are gathered here and passed explicitly to the helpers that need them.

use std::env;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_DIFF_CONTEXT_LINES, DEFAULT_PENALTY_TIME_MINUTES, DEFAULT_RUST_LOG,
    DEFAULT_TIME_FORMAT, DEFAULT_WRAP_WIDTH,
};

/// Main rendering configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub display: DisplayConfig,
    pub scoring: ScoringConfig,
    pub diff: DiffConfig,
    pub log: LogConfig,
}

/// How times, links and text are shown
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// strftime format used for absolute times
    pub time_format: String,
    /// Show times relative to contest start when a contest is given
    pub show_relative_time: bool,
    /// Base URL of an external contest control system
    pub ext_ccs_url: Option<String>,
    /// Column width for `wrap_unquoted`
    pub wrap_width: usize,
}

/// Scoreboard arithmetic
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub score_in_seconds: bool,
    /// Penalty per rejected submission, in minutes
    pub penalty_time_minutes: i64,
}

/// Run diff rendering
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Lines shown around the first and last mismatch
    pub context_lines: usize,
}

/// Logging configuration for the CLI
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub rust_log: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            show_relative_time: false,
            ext_ccs_url: None,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            score_in_seconds: false,
            penalty_time_minutes: DEFAULT_PENALTY_TIME_MINUTES,
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_DIFF_CONTEXT_LINES,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            rust_log: DEFAULT_RUST_LOG.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and a `.env` file if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            display: DisplayConfig {
                time_format: lookup("HERMES_TIME_FORMAT")
                    .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string()),
                show_relative_time: parse_flag(&lookup, "HERMES_SHOW_RELATIVE_TIME", false)?,
                ext_ccs_url: lookup("HERMES_EXT_CCS_URL").filter(|url| !url.is_empty()),
                wrap_width: parse_var(&lookup, "HERMES_WRAP_WIDTH", DEFAULT_WRAP_WIDTH)?,
            },
            scoring: ScoringConfig {
                score_in_seconds: parse_flag(&lookup, "HERMES_SCORE_IN_SECONDS", false)?,
                penalty_time_minutes: parse_var(
                    &lookup,
                    "HERMES_PENALTY_TIME",
                    DEFAULT_PENALTY_TIME_MINUTES,
                )?,
            },
            diff: DiffConfig {
                context_lines: parse_var(
                    &lookup,
                    "HERMES_DIFF_CONTEXT_LINES",
                    DEFAULT_DIFF_CONTEXT_LINES,
                )?,
            },
            log: LogConfig {
                rust_log: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_RUST_LOG.to_string()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the helpers misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.time_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue("HERMES_TIME_FORMAT".to_string()));
        }
        if self.display.wrap_width == 0 {
            return Err(ConfigError::InvalidValue("HERMES_WRAP_WIDTH".to_string()));
        }
        if self.scoring.penalty_time_minutes < 0 {
            return Err(ConfigError::InvalidValue("HERMES_PENALTY_TIME".to_string()));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off" | "") => Ok(false),
        Some(_) => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
