//! HTML view helpers used alongside the renderers

pub mod markup;
pub mod results;

pub use markup::*;
pub use results::*;
