//! Application-wide constants
//!
//! Constants are grouped by the renderer or helper that uses them.

// =============================================================================
// CONFIGURATION DEFAULTS
// =============================================================================

/// Default strftime format for absolute times
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Default penalty minutes per rejected submission
pub const DEFAULT_PENALTY_TIME_MINUTES: i64 = 20;

/// Default log filter for the CLI
pub const DEFAULT_RUST_LOG: &str = "hermes=info";

/// Default column width used by `wrap_unquoted`
pub const DEFAULT_WRAP_WIDTH: usize = 75;

// =============================================================================
// INTERACTIVE LOG
// =============================================================================

/// Direction byte marking a validator-authored frame
pub const VALIDATOR_DIRECTION: u8 = b'>';

/// Bytes between the direction marker and the payload
pub const FRAME_SEPARATOR_LEN: usize = 2;

/// Bytes after the payload that close a frame
pub const FRAME_TERMINATOR_LEN: usize = 1;

/// Glyph shown in place of a newline inside a payload cell
pub const LINE_BREAK_GLYPH: &str = "\u{21B5}<br/>";

// =============================================================================
// RUN DIFF
// =============================================================================

/// Lines of context shown around the first and last mismatch
pub const DEFAULT_DIFF_CONTEXT_LINES: usize = 5;

/// Maximum tokens per line fed into the LCS alignment
pub const LCS_TOKEN_CUTOFF: usize = 100;

/// Notice appended to lines whose tokens exceed the cutoff
pub const CUT_OFF_NOTICE: &str = "[cut off rest of line...]";

/// Marker rendered where an end-of-line difference occurs
pub const END_OF_LINE_MARKER: &str = "$";

/// Header prefix of a judge-produced diff report
pub const JUDGE_DIFF_HEADER: &str = "### DIFFERENCES FROM LINE ";

// =============================================================================
// VIEW HELPERS
// =============================================================================

/// Lines of a description shown before it collapses
pub const DESCRIPTION_COLLAPSED_LINES: usize = 3;

/// Units used by `print_size`
pub const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB"];

/// Judging result string for accepted runs
pub const RESULT_CORRECT: &str = "correct";

/// Host status strings reported by judgehosts and teams
pub mod statuses {
    pub const NO_CONNECTION: &str = "noconn";
    pub const CRITICAL: &str = "crit";
    pub const WARNING: &str = "warn";
    pub const OK: &str = "ok";
}
