//! hermes - Judge Output Rendering
//!
//! This library turns raw judge artifacts into HTML fragments for the web
//! interface of a programming contest judge.
//!
//! # Features
//!
//! - Interactive logs rendered as validator/submission tables
//! - Token-level diffs of team output against reference output
//! - Styled unified diffs between submission sources
//! - Comparator diff reports, result badges and other view helpers
//! - A named filter registry for template engines
//!
//! # Architecture
//!
//! - **Models**: Serializable records produced by the parsers
//! - **Render**: Parsers and renderers for judge output
//! - **Views**: Small HTML helpers
//! - **Filters**: Name-based dispatch over all of the above

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod filters;
pub mod models;
pub mod render;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use error::{RenderError, RenderResult};
pub use render::{parse_interactive_log, render_run_diff, render_source_diff};
