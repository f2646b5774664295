//! Main processor for the format and analyze passes over one document.
//!
//! This module wires the scanner, profile resolution and formatter together and
//! walks a document block by block.

use crate::annotator::{FormatOutcome, disposition_block, is_annotated, marker_diagnostic};
use crate::config::Config;
use crate::document::{Document, DocumentError};
use crate::formatter::{ExternalFormatter, Formatter, FormatterError, ProfileResolver};
use crate::rewriter::RewriteError;
use crate::scanner::BlockScanner;
use thiserror::Error;

/// Error during block processing. All of these abort the run.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error(transparent)]
    Formatter(#[from] FormatterError),
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("Invalid language pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Outcome for one block of a format pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    /// Line of the opening fence when the block was visited.
    pub line: usize,
    pub language: String,
    pub outcome: FormatOutcome,
}

/// A block carrying an error marker, as found by [`CodeBlockProcessor::flagged_blocks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedBlock {
    /// Line of the marker.
    pub line: usize,
    pub language: String,
    pub diagnostic: String,
}

/// Processor for fenced code blocks of the configured languages.
pub struct CodeBlockProcessor {
    scanner: BlockScanner,
    profiles: ProfileResolver,
    formatter: Box<dyn Formatter>,
}

impl CodeBlockProcessor {
    /// Build a processor running the configured external formatter.
    pub fn new(config: &Config) -> Result<Self, ProcessorError> {
        let formatter = ExternalFormatter::new(config.formatter.clone(), config.print_width);
        Self::with_formatter(config, Box::new(formatter))
    }

    /// Build a processor around an arbitrary formatter.
    pub fn with_formatter(config: &Config, formatter: Box<dyn Formatter>) -> Result<Self, ProcessorError> {
        Ok(Self {
            scanner: BlockScanner::new(config.languages.as_slice())?,
            profiles: ProfileResolver::new(config.profiles.clone()),
            formatter,
        })
    }

    pub fn scanner(&self) -> &BlockScanner {
        &self.scanner
    }

    pub fn profiles(&self) -> &ProfileResolver {
        &self.profiles
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    /// Format every block in `document`, in order.
    ///
    /// Each block is rescanned from the previous block's opening fence plus one,
    /// since a rewrite or marker insertion moves everything after it.
    pub fn format_document(&self, document: &mut Document) -> Result<Vec<BlockReport>, ProcessorError> {
        let mut reports = Vec::new();
        let mut from = 1;

        while let Some(block) = self.scanner.next_block(document, from) {
            let outcome = disposition_block(document, &block, self.formatter(), &self.profiles)?;
            reports.push(BlockReport {
                line: block.start_line,
                language: block.language.clone(),
                outcome,
            });
            from = block.start_line + 1;
        }

        Ok(reports)
    }

    /// Every configured-language block that carries an error marker.
    ///
    /// Read-only; the formatter is not invoked.
    pub fn flagged_blocks(&self, document: &Document) -> Vec<FlaggedBlock> {
        let mut flagged = Vec::new();
        let mut from = 1;

        while let Some(block) = self.scanner.next_block(document, from) {
            if is_annotated(document, &block) {
                let line = block.content_start();
                let diagnostic = document.line(line).and_then(marker_diagnostic).unwrap_or("").to_string();
                flagged.push(FlaggedBlock {
                    line,
                    language: block.language.clone(),
                    diagnostic,
                });
            }
            from = block.start_line + 1;
        }

        flagged
    }
}
