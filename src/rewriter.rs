//! In-place replacement of a block's interior lines.
//!
//! # Invalidation contract
//!
//! A successful rewrite changes the number of lines after the opening fence, so
//! every line number at or after `block.start_line` computed before the call is
//! stale afterwards. Callers resume scanning from `block.start_line` itself; the
//! opening fence is the only position guaranteed to survive.

use crate::document::Document;
use crate::scanner::{CLOSE_FENCE, CodeBlock};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("Block {start}..{end} is not a valid range")]
    InvalidRange { start: usize, end: usize },
    #[error("Block {start}..{end} extends past the end of the document ({len} lines)")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("Line {line} is not a closing fence; the block is stale")]
    StaleBlock { line: usize },
    #[error("Line {line} does not exist")]
    NoSuchLine { line: usize },
}

fn validate(document: &Document, block: &CodeBlock) -> Result<(), RewriteError> {
    if block.start_line == 0 || block.start_line >= block.end_line {
        return Err(RewriteError::InvalidRange {
            start: block.start_line,
            end: block.end_line,
        });
    }
    if block.end_line > document.len() {
        return Err(RewriteError::OutOfBounds {
            start: block.start_line,
            end: block.end_line,
            len: document.len(),
        });
    }
    if !document.line(block.end_line).is_some_and(|l| CLOSE_FENCE.is_match(l)) {
        return Err(RewriteError::StaleBlock { line: block.end_line });
    }
    Ok(())
}

/// Replace every line strictly between the fences of `block` with `new_lines`.
///
/// The block is validated against the document first; on error nothing has been
/// changed. See the module docs for which line numbers survive.
pub fn replace_block_contents(
    document: &mut Document,
    block: &CodeBlock,
    new_lines: Vec<String>,
) -> Result<(), RewriteError> {
    validate(document, block)?;
    document.splice_lines(block.start_line + 1, block.end_line - 1, new_lines);
    Ok(())
}

/// Delete a single line. Invalidates every line number after it.
pub fn remove_line(document: &mut Document, line: usize) -> Result<String, RewriteError> {
    if line == 0 || line > document.len() {
        return Err(RewriteError::NoSuchLine { line });
    }
    Ok(document.remove_line(line))
}
