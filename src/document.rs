//!
//! This module defines the line-oriented document model that every pass operates on.
//!
//! Line numbers are 1-indexed and only meaningful until the next mutation: any
//! insertion or removal invalidates every number at or after the edited line, so
//! callers rescan instead of reusing positions they computed earlier.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {path}: {source}")]
    Read { source: io::Error, path: String },
    #[error("Failed to write {path}: {source}")]
    Write { source: io::Error, path: String },
    #[error("Document has no backing file")]
    NoPath,
}

/// A text document held as a vector of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    lines: Vec<String>,
    trailing_newline: bool,
    modified: bool,
}

impl Document {
    /// Read a document from disk.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            source,
            path: path.display().to_string(),
        })?;
        let mut doc = Self::from_content(&content);
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Build an in-memory document with no backing file.
    pub fn from_content(content: &str) -> Self {
        // `lines()` also strips a trailing '\r', which keeps CRLF files from
        // leaking carriage returns into formatter input.
        let lines = content.lines().map(str::to_string).collect();
        Self {
            path: None,
            lines,
            trailing_newline: content.ends_with('\n'),
            modified: false,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of lines; also the number of the last line.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of line `number` (1-indexed).
    pub fn line(&self, number: usize) -> Option<&str> {
        number.checked_sub(1).and_then(|i| self.lines.get(i)).map(String::as_str)
    }

    /// Lines strictly between `after` and `before`, both 1-indexed.
    pub fn lines_between(&self, after: usize, before: usize) -> &[String] {
        let start = after.min(self.lines.len());
        let end = before.saturating_sub(1).clamp(start, self.lines.len());
        &self.lines[start..end]
    }

    /// Whether any mutation happened since the document was loaded or last saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Replace lines `first..=last` with `replacement`, or insert before `first`
    /// when `last < first`. Bounds are the caller's responsibility.
    pub(crate) fn splice_lines(&mut self, first: usize, last: usize, replacement: Vec<String>) {
        let start = first - 1;
        let end = last.max(start);
        self.lines.splice(start..end, replacement);
        self.modified = true;
    }

    pub(crate) fn insert_line(&mut self, after: usize, text: String) {
        self.lines.insert(after, text);
        self.modified = true;
    }

    pub(crate) fn remove_line(&mut self, number: usize) -> String {
        self.modified = true;
        self.lines.remove(number - 1)
    }

    /// Render the document back to text.
    pub fn content(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Write the document back to its file.
    ///
    /// The content goes to a temporary file next to the target which is then
    /// renamed over it, so a failed write never leaves a half-written document.
    /// Symlinks are followed and the file keeps its permissions.
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let path = self.path.clone().ok_or(DocumentError::NoPath)?;
        let write_err = |source: io::Error| DocumentError::Write {
            source,
            path: path.display().to_string(),
        };
        let target = match fs::canonicalize(&path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => path.clone(),
            Err(e) => return Err(write_err(e)),
        };
        let permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(self.content().as_bytes()).map_err(write_err)?;
        if let Some(permissions) = permissions {
            tmp.as_file().set_permissions(permissions).map_err(write_err)?;
        }
        tmp.persist(&target).map_err(|e| write_err(e.error))?;
        self.modified = false;
        log::debug!("Saved {}", path.display());
        Ok(())
    }
}
