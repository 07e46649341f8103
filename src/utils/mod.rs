//! Utility functions

pub mod color;
pub mod format;
pub mod html;
pub mod time;
pub mod wrap;

pub use html::escape;
pub use time::{now_utc, print_time, print_time_diff};
