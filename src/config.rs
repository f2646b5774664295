//!
//! This module defines the configuration structure and its loading and validation.
//!
//! Configuration is an explicit immutable value: it is loaded once, merged with
//! command-line overrides, validated, and then passed into the processor. Nothing
//! reads process-wide state after that.
//!
//! ```toml
//! languages = ["yaml", "json"]
//! formatter = ["prettier"]
//! print-width = 80
//! editor = "code --wait"
//! extensions = ["md", "markdown"]
//! respect-gitignore = true
//!
//! [profiles]
//! jsonl = "json"
//! ```

use crate::formatter::ProfileResolver;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".fencefmt.toml";

/// Complete configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Language tags whose fenced blocks are processed
    pub languages: Vec<String>,

    /// Formatter command (first element is the binary)
    pub formatter: Vec<String>,

    /// Maximum line width passed to the formatter
    pub print_width: usize,

    /// Editor command for the fix pass; falls back to $VISUAL / $EDITOR
    pub editor: Option<String>,

    /// File extensions searched for documents
    pub extensions: Vec<String>,

    /// Respect .gitignore files when searching
    pub respect_gitignore: bool,

    /// Language tag -> formatter parser overrides
    pub profiles: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: vec!["yaml".to_string(), "yml".to_string()],
            formatter: vec!["prettier".to_string()],
            print_width: 80,
            editor: None,
            extensions: vec!["md".to_string(), "markdown".to_string(), "mdx".to_string()],
            respect_gitignore: true,
            profiles: HashMap::new(),
        }
    }
}

/// Errors that can occur when loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Unsupported language '{language}'. Supported: {supported}")]
    UnsupportedLanguage { language: String, supported: String },

    #[error("No languages configured")]
    NoLanguages,

    #[error("Formatter command is empty")]
    EmptyFormatter,

    #[error("print-width must be greater than zero")]
    InvalidPrintWidth,

    #[error("Search path '{path}' does not exist")]
    BadSearchPath { path: String },
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Parse configuration text; `origin` names the source in errors.
    pub fn from_toml(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load the explicit file if given, else `.fencefmt.toml` from `dir` if it
    /// exists, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::debug!("Loading config from {}", path.display());
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            log::debug!("Found config at {}", candidate.display());
            Self::load(&candidate)
        } else {
            log::debug!("No {CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replace the language list with a comma-separated command-line value.
    pub fn with_languages(mut self, list: &str) -> Self {
        self.languages = parse_language_list(list);
        self
    }

    /// Check the configuration before any document is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::NoLanguages);
        }
        let resolver = ProfileResolver::new(self.profiles.clone());
        if let Some(language) = self.languages.iter().find(|lang| !resolver.is_supported(lang)) {
            return Err(ConfigError::UnsupportedLanguage {
                language: language.clone(),
                supported: resolver.supported_languages().join(", "),
            });
        }
        if self.formatter.first().is_none_or(|bin| bin.trim().is_empty()) {
            return Err(ConfigError::EmptyFormatter);
        }
        if self.print_width == 0 {
            return Err(ConfigError::InvalidPrintWidth);
        }
        Ok(())
    }
}

/// Split a comma-separated language list, dropping blanks and duplicates.
pub fn parse_language_list(list: &str) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for lang in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !languages.iter().any(|l| l == lang) {
            languages.push(lang.to_string());
        }
    }
    languages
}
