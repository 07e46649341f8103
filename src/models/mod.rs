//! Domain models
//!
//! Structured records produced by the renderers and consumed by the views.

pub mod diff;
pub mod log;
pub mod test_case;

pub use diff::*;
pub use log::*;
pub use test_case::*;
