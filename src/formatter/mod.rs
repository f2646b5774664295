//! Dispatching block content to an external formatter.
//!
//! # Overview
//!
//! The formatter is a black box reached through the [`Formatter`] trait. The
//! production implementation, [`ExternalFormatter`], runs a prettier-compatible
//! command line:
//!
//! ```text
//! <command...> --parser <profile> --print-width <width> [--check]
//! ```
//!
//! with the block content on stdin. In write mode the canonical text comes back
//! on stdout; in check mode only the exit status matters. A non-zero exit is a
//! [`FormatterError::Rejected`] carrying the first diagnostic line. Every other
//! variant means the formatter could not be run at all.
//!
//! Each call is a single invocation. Nothing is retried.

pub mod executor;
pub mod profile;

pub use executor::{ToolExecutor, ToolOutput};
pub use profile::{Profile, ProfileResolver};

use thiserror::Error;

/// How the formatter is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Produce canonical text.
    Write,
    /// Only report whether the input is already canonical.
    Check,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatterError {
    /// The formatter ran and refused the input.
    #[error("{diagnostic}")]
    Rejected { diagnostic: String },
    #[error("Formatter '{tool}' not found in PATH")]
    NotFound { tool: String },
    #[error("Formatter command is empty")]
    EmptyCommand,
    #[error("Formatter '{tool}' failed: {message}")]
    Io { tool: String, message: String },
}

impl FormatterError {
    /// Rejections are recorded in the document; everything else aborts the run.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// A formatter for block content.
pub trait Formatter {
    /// Format `text` with `profile`.
    ///
    /// Returns `Some(canonical)` in [`FormatMode::Write`] and `None` in
    /// [`FormatMode::Check`] when the text is already canonical.
    fn format_text(&self, profile: &Profile, text: &str, mode: FormatMode) -> Result<Option<String>, FormatterError>;
}

/// Formatter backed by an external command.
#[derive(Debug, Clone)]
pub struct ExternalFormatter {
    command: Vec<String>,
    print_width: usize,
    executor: ToolExecutor,
}

impl ExternalFormatter {
    pub fn new(command: Vec<String>, print_width: usize) -> Self {
        Self {
            command,
            print_width,
            executor: ToolExecutor::new(),
        }
    }

    fn args(&self, profile: &Profile, mode: FormatMode) -> Vec<String> {
        let mut args = vec![
            "--parser".to_string(),
            profile.parser.clone(),
            "--print-width".to_string(),
            self.print_width.to_string(),
        ];
        if mode == FormatMode::Check {
            args.push("--check".to_string());
        }
        args
    }
}

impl Formatter for ExternalFormatter {
    fn format_text(&self, profile: &Profile, text: &str, mode: FormatMode) -> Result<Option<String>, FormatterError> {
        let output = self.executor.execute(&self.command, &self.args(profile, mode), text)?;
        if !output.success {
            return Err(FormatterError::Rejected {
                diagnostic: output.diagnostic(),
            });
        }
        Ok(match mode {
            FormatMode::Write => Some(output.stdout),
            FormatMode::Check => None,
        })
    }
}
