//! Format fenced code blocks inside text documents with an external formatter.
//!
//! The library is organized leaves first:
//!
//! - [`scanner`] finds opening fences, closing fences and error markers.
//! - [`indent`] strips and reapplies a block's indentation.
//! - [`formatter`] maps languages to parser profiles and runs the formatter.
//! - [`rewriter`] replaces a block's interior lines.
//! - [`annotator`] inserts and recognizes error markers and decides what to do
//!   with each block.
//! - [`processor`] runs the format and analyze passes over a [`Document`].
//! - [`fix_loop`] drives the interactive resolution of flagged blocks.

pub mod annotator;
pub mod config;
pub mod document;
pub mod editor;
pub mod exit_codes;
pub mod fix_loop;
pub mod formatter;
pub mod indent;
pub mod processor;
pub mod prompt;
pub mod rewriter;
pub mod scanner;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::annotator::FormatOutcome;
pub use crate::config::{Config, ConfigError};
pub use crate::document::Document;
pub use crate::fix_loop::{Decision, FixLoop, FixOutcome, FixSummary};
pub use crate::processor::{BlockReport, CodeBlockProcessor, FlaggedBlock, ProcessorError};
pub use crate::scanner::{BlockScanner, CodeBlock};
