//!
//! Human-driven resolution of blocks carrying error markers.
//!
//! The loop is an explicit state machine:
//!
//! ```text
//! Scanning -> Editing -> Reformatting -> (resolved) -> Scanning
//!                                     -> (still failing) -> UserDecision -> Scanning | Quit
//! ```
//!
//! The editor and the decision prompt are injected, so the whole loop runs in
//! tests without a terminal. File-backed documents are saved after every
//! mutation; quitting keeps everything done up to that point.
//!
//! Termination depends on the user: accepting the same failing edit forever
//! keeps the loop on that block.

use crate::annotator::{FormatOutcome, block_text, disposition_block, marker_diagnostic};
use crate::document::{Document, DocumentError};
use crate::editor::{Editor, EditorError};
use crate::indent::reapply_indent;
use crate::processor::{CodeBlockProcessor, ProcessorError};
use crate::rewriter::{RewriteError, remove_line, replace_block_contents};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("Failed to read decision: {0}")]
    Prompt(#[from] std::io::Error),
}

/// What to do with a block that still fails after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Edit the block again.
    Accept,
    /// Leave the marker and move on.
    Skip,
    /// Drop the marker, keep the content as is.
    Ignore,
    /// Stop the whole fix run.
    Quit,
}

impl Decision {
    /// Parse a user answer. `y`, `s`, `i`, `q` (any case) and their full words;
    /// `n`/`no` also mean skip. Anything else, including an empty line, is `None`.
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(Self::Accept),
            "s" | "skip" | "n" | "no" => Some(Self::Skip),
            "i" | "ignore" => Some(Self::Ignore),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Context shown to the user when asking for a [`Decision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    pub path: Option<PathBuf>,
    /// Line of the marker.
    pub line: usize,
    pub language: String,
    pub diagnostic: String,
}

/// Source of user decisions.
pub trait DecisionSource {
    fn decide(&mut self, request: &DecisionRequest) -> Result<Decision, FixError>;
}

/// How a fix run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// No markers left to visit.
    Completed,
    /// The user chose to quit.
    Quit,
}

/// Counters for one fix run over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixSummary {
    pub outcome: FixOutcome,
    /// Editor sessions started.
    pub edits: usize,
    /// Blocks that formatted cleanly after an edit.
    pub resolved: usize,
    pub skipped: usize,
    pub ignored: usize,
}

impl FixSummary {
    fn new() -> Self {
        Self {
            outcome: FixOutcome::Completed,
            edits: 0,
            resolved: 0,
            skipped: 0,
            ignored: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Scanning { from: usize },
    Editing { marker: usize },
    Reformatting { start: usize },
    UserDecision { start: usize, request: DecisionRequest },
    Finished(FixOutcome),
}

/// Interactive fix loop over one document.
pub struct FixLoop<'a> {
    processor: &'a CodeBlockProcessor,
    editor: &'a mut dyn Editor,
    decisions: &'a mut dyn DecisionSource,
}

impl<'a> FixLoop<'a> {
    pub fn new(
        processor: &'a CodeBlockProcessor,
        editor: &'a mut dyn Editor,
        decisions: &'a mut dyn DecisionSource,
    ) -> Self {
        Self {
            processor,
            editor,
            decisions,
        }
    }

    /// Visit every marker in `document` until none is left or the user quits.
    pub fn run(&mut self, document: &mut Document) -> Result<FixSummary, FixError> {
        let mut summary = FixSummary::new();
        let mut state = State::Scanning { from: 1 };

        loop {
            state = match state {
                State::Finished(outcome) => {
                    summary.outcome = outcome;
                    return Ok(summary);
                }
                State::Scanning { from } => self.scan(document, from),
                State::Editing { marker } => self.edit(document, marker, &mut summary)?,
                State::Reformatting { start } => self.reformat(document, start, &mut summary)?,
                State::UserDecision { start, request } => self.decide(document, start, request, &mut summary)?,
            };
        }
    }

    fn scan(&self, document: &Document, from: usize) -> State {
        match self.processor.scanner().find_error(document, from) {
            Some(marker) => State::Editing { marker },
            None => State::Finished(FixOutcome::Completed),
        }
    }

    fn edit(&mut self, document: &mut Document, marker: usize, summary: &mut FixSummary) -> Result<State, FixError> {
        let block = match marker
            .checked_sub(1)
            .and_then(|fence| self.processor.scanner().block_at(document, fence))
        {
            Some(block) => block,
            None => {
                log::warn!("Line {marker}: error marker is not the first line of a code block, skipping");
                return Ok(State::Scanning { from: marker + 1 });
            }
        };

        // Content without the marker line.
        let mut content_block = block.clone();
        content_block.start_line = marker;
        let text = block_text(document, &content_block);

        log::info!("Line {}: editing {} block", block.start_line, block.language);
        let edited = self.editor.edit(&block.language, &text)?;
        summary.edits += 1;

        let edited_lines: Vec<String> = edited.lines().map(str::to_string).collect();
        replace_block_contents(document, &block, reapply_indent(&edited_lines, &block.indent))?;
        persist(document)?;

        Ok(State::Reformatting {
            start: block.start_line,
        })
    }

    fn reformat(&mut self, document: &mut Document, start: usize, summary: &mut FixSummary) -> Result<State, FixError> {
        // The old closing fence is still below `start`. An edit containing a bare
        // fence line just closes the block earlier.
        let block = self
            .processor
            .scanner()
            .block_at(document, start)
            .ok_or(RewriteError::StaleBlock { line: start })?;

        let outcome = disposition_block(
            document,
            &block,
            self.processor.formatter(),
            self.processor.profiles(),
        )?;
        persist(document)?;

        let diagnostic = match outcome {
            FormatOutcome::Ok | FormatOutcome::Changed => {
                log::info!("Line {start}: block resolved");
                summary.resolved += 1;
                return Ok(State::Scanning { from: start });
            }
            FormatOutcome::FormatterRejected { diagnostic } => diagnostic,
            // The edit itself left a marker as the first line.
            FormatOutcome::AlreadyFlagged => document
                .line(block.content_start())
                .and_then(marker_diagnostic)
                .unwrap_or("")
                .to_string(),
        };

        Ok(State::UserDecision {
            start,
            request: DecisionRequest {
                path: document.path().map(|p| p.to_path_buf()),
                line: block.content_start(),
                language: block.language.clone(),
                diagnostic,
            },
        })
    }

    fn decide(
        &mut self,
        document: &mut Document,
        start: usize,
        request: DecisionRequest,
        summary: &mut FixSummary,
    ) -> Result<State, FixError> {
        let marker = request.line;
        Ok(match self.decisions.decide(&request)? {
            Decision::Accept => State::Scanning { from: marker },
            Decision::Skip => {
                summary.skipped += 1;
                State::Scanning { from: marker + 1 }
            }
            Decision::Ignore => {
                remove_line(document, marker)?;
                persist(document)?;
                summary.ignored += 1;
                State::Scanning { from: start }
            }
            Decision::Quit => State::Finished(FixOutcome::Quit),
        })
    }
}

fn persist(document: &mut Document) -> Result<(), DocumentError> {
    if document.path().is_some() && document.is_modified() {
        document.save()?;
    }
    Ok(())
}
