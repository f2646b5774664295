//! File discovery and the per-file format, fix and analyze passes.

mod discovery;
mod processing;

pub use discovery::*;
pub use processing::*;
