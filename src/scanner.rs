//!
//! Line-based scanning for fenced code blocks and error markers.
//!
//! Every search runs forward from an explicit starting line. Nothing here caches a
//! position: after the document is mutated the caller simply scans again.

use crate::document::Document;
use regex::Regex;
use std::sync::LazyLock;

/// A bare closing fence: optional indentation, three backticks, optional trailing space.
pub static CLOSE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*```\s*$").unwrap());

/// The error marker placed as the first line inside a flagged block.
pub static ERROR_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\[error\]").unwrap());

/// Location of a fenced block of one of the configured languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// 1-indexed line of the opening fence.
    pub start_line: usize,
    /// 1-indexed line of the closing fence.
    pub end_line: usize,
    /// Language tag from the opening fence.
    pub language: String,
    /// Literal leading whitespace of the opening fence.
    pub indent: String,
}

impl CodeBlock {
    /// First content line (may equal `end_line` for an empty block).
    pub fn content_start(&self) -> usize {
        self.start_line + 1
    }

    pub fn content_len(&self) -> usize {
        self.end_line - self.start_line - 1
    }
}

/// Return the first line at or after `start_line` whose text matches `pattern`.
pub fn find_next(start_line: usize, document: &Document, pattern: &Regex) -> Option<usize> {
    (start_line.max(1)..=document.len()).find(|&n| document.line(n).is_some_and(|text| pattern.is_match(text)))
}

/// Scanner bound to one set of languages.
#[derive(Debug, Clone)]
pub struct BlockScanner {
    open_fence: Regex,
}

impl BlockScanner {
    /// Build a scanner recognizing opening fences tagged with any of `languages`.
    pub fn new<S: AsRef<str>>(languages: &[S]) -> Result<Self, regex::Error> {
        let alternation = languages
            .iter()
            .map(|lang| regex::escape(lang.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let open_fence = Regex::new(&format!(r"^(\s*)```({alternation})\s*$"))?;
        Ok(Self { open_fence })
    }

    pub fn find_block_start(&self, document: &Document, from: usize) -> Option<usize> {
        find_next(from, document, &self.open_fence)
    }

    pub fn find_block_end(&self, document: &Document, from: usize) -> Option<usize> {
        find_next(from, document, &CLOSE_FENCE)
    }

    pub fn find_error(&self, document: &Document, from: usize) -> Option<usize> {
        find_next(from, document, &ERROR_MARKER)
    }

    /// Interpret `line` as an opening fence of a configured language and pair it
    /// with the next closing fence.
    pub fn block_at(&self, document: &Document, line: usize) -> Option<CodeBlock> {
        let caps = self.open_fence.captures(document.line(line)?)?;
        let end_line = self.find_block_end(document, line + 1)?;
        Some(CodeBlock {
            start_line: line,
            end_line,
            language: caps[2].to_string(),
            indent: caps[1].to_string(),
        })
    }

    /// The next complete block whose opening fence is at or after `from`.
    ///
    /// An opening fence without a closing fence ends the scan.
    pub fn next_block(&self, document: &Document, from: usize) -> Option<CodeBlock> {
        let start = self.find_block_start(document, from)?;
        let block = self.block_at(document, start);
        if block.is_none() {
            log::warn!("Unterminated code block starting at line {start}");
        }
        block
    }
}
