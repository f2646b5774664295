//! In-process fakes for the formatter, editor and decision prompt.

use crate::editor::{Editor, EditorError};
use crate::fix_loop::{Decision, DecisionRequest, DecisionSource, FixError};
use crate::formatter::{FormatMode, Formatter, FormatterError, Profile};
use std::cell::RefCell;
use std::collections::VecDeque;

/// A tiny "key: value" formatter.
///
/// Canonical form puts exactly one space after the first colon of a line and
/// trims trailing whitespace. Text with an unclosed `[` is rejected.
pub struct FakeFormatter {
    available: bool,
    parsers: RefCell<Vec<String>>,
}

impl FakeFormatter {
    pub fn new() -> Self {
        Self {
            available: true,
            parsers: RefCell::new(Vec::new()),
        }
    }

    /// A formatter whose binary cannot be found.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            parsers: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.parsers.borrow().len()
    }

    pub fn parsers(&self) -> Vec<String> {
        self.parsers.borrow().clone()
    }

    pub fn canonicalize(text: &str) -> String {
        let mut out = String::new();
        for line in text.lines() {
            let line = line.trim_end();
            match line.split_once(':') {
                Some((key, value)) if value.trim().is_empty() => out.push_str(&format!("{key}:")),
                Some((key, value)) => out.push_str(&format!("{key}: {}", value.trim())),
                None => out.push_str(line),
            }
            out.push('\n');
        }
        out
    }
}

impl Formatter for FakeFormatter {
    fn format_text(&self, profile: &Profile, text: &str, mode: FormatMode) -> Result<Option<String>, FormatterError> {
        if !self.available {
            return Err(FormatterError::NotFound {
                tool: "fake".to_string(),
            });
        }
        self.parsers.borrow_mut().push(profile.parser.clone());

        if text.matches('[').count() > text.matches(']').count() {
            return Err(FormatterError::Rejected {
                diagnostic: "SyntaxError: unclosed bracket".to_string(),
            });
        }
        let canonical = Self::canonicalize(text);
        match mode {
            FormatMode::Write => Ok(Some(canonical)),
            FormatMode::Check if canonical == text => Ok(None),
            FormatMode::Check => Err(FormatterError::Rejected {
                diagnostic: "(stdin)".to_string(),
            }),
        }
    }
}

/// Editor returning canned edits in order and recording what it was shown.
pub struct ScriptedEditor {
    edits: VecDeque<String>,
    pub seen: Vec<String>,
}

impl ScriptedEditor {
    pub fn new<S: Into<String>>(edits: impl IntoIterator<Item = S>) -> Self {
        Self {
            edits: edits.into_iter().map(Into::into).collect(),
            seen: Vec::new(),
        }
    }
}

impl Editor for ScriptedEditor {
    fn edit(&mut self, _language: &str, content: &str) -> Result<String, EditorError> {
        self.seen.push(content.to_string());
        // Out of script: hand the content back unchanged.
        Ok(self.edits.pop_front().unwrap_or_else(|| content.to_string()))
    }
}

/// Decision source answering from a script; quits once the script runs out.
pub struct ScriptedDecisions {
    decisions: VecDeque<Decision>,
    pub requests: Vec<DecisionRequest>,
}

impl ScriptedDecisions {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
            requests: Vec::new(),
        }
    }
}

impl DecisionSource for ScriptedDecisions {
    fn decide(&mut self, request: &DecisionRequest) -> Result<Decision, FixError> {
        self.requests.push(request.clone());
        Ok(self.decisions.pop_front().unwrap_or(Decision::Quit))
    }
}

/// Always answers `Ignore`.
pub struct AlwaysIgnore {
    pub asked: usize,
}

impl DecisionSource for AlwaysIgnore {
    fn decide(&mut self, _request: &DecisionRequest) -> Result<Decision, FixError> {
        self.asked += 1;
        Ok(Decision::Ignore)
    }
}
