//! Handing block content to a human for editing.
//!
//! [`ExternalEditor`] writes the content to a temporary file named after the
//! block's language, runs the user's editor on it, and reads the file back once
//! the editor exits.

use std::io::{self, Write};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Editor command is empty")]
    EmptyCommand,
    #[error("Cannot parse editor command '{0}'")]
    BadCommand(String),
    #[error("Failed to start editor '{command}': {source}")]
    Spawn { command: String, source: io::Error },
    #[error("Editor '{command}' exited with {status}; edit discarded")]
    Failed { command: String, status: String },
    #[error("Temporary file error: {0}")]
    Io(#[from] io::Error),
}

/// Something that lets a human change a block's content.
pub trait Editor {
    /// Return the edited version of `content`. Blocks until the edit is done.
    fn edit(&mut self, language: &str, content: &str) -> Result<String, EditorError>;
}

/// Editor backed by an interactive program such as `vi` or `code --wait`.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    program: String,
    args: Vec<String>,
}

impl ExternalEditor {
    /// Parse a shell-style command line, e.g. `"code --wait"`.
    pub fn new(command: &str) -> Result<Self, EditorError> {
        let words = shlex::split(command).ok_or_else(|| EditorError::BadCommand(command.to_string()))?;
        let (program, args) = words.split_first().ok_or(EditorError::EmptyCommand)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Pick the editor: configured command, then `$VISUAL`, then `$EDITOR`, then `vi`.
    pub fn resolve(configured: Option<&str>) -> Result<Self, EditorError> {
        let command = configured
            .map(str::to_string)
            .or_else(|| std::env::var("VISUAL").ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| std::env::var("EDITOR").ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| "vi".to_string());
        log::debug!("Using editor '{command}'");
        Self::new(&command)
    }

    fn display(&self) -> String {
        std::iter::once(&self.program).chain(&self.args).cloned().collect::<Vec<_>>().join(" ")
    }
}

impl Editor for ExternalEditor {
    fn edit(&mut self, language: &str, content: &str) -> Result<String, EditorError> {
        let suffix: String = language.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        let mut file = tempfile::Builder::new()
            .prefix("fencefmt-")
            .suffix(&format!(".{suffix}"))
            .tempfile()?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(file.path())
            .status()
            .map_err(|source| EditorError::Spawn {
                command: self.display(),
                source,
            })?;
        if !status.success() {
            return Err(EditorError::Failed {
                command: self.display(),
                status: status.to_string(),
            });
        }

        // Re-read by path: many editors replace the file instead of writing in place.
        Ok(std::fs::read_to_string(file.path())?)
    }
}
