//! Document discovery and path display

use fencefmt_lib::config::{Config, ConfigError};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Find candidate documents under `search_path`.
///
/// A file is returned as is, whatever its extension. Directories are walked
/// for files with one of the configured extensions, honoring `.gitignore` when
/// configured. The result is sorted so runs are deterministic.
pub fn find_documents(search_path: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    if !search_path.exists() {
        return Err(ConfigError::BadSearchPath {
            path: search_path.display().to_string(),
        }
        .into());
    }
    if search_path.is_file() {
        return Ok(vec![search_path.to_path_buf()]);
    }

    let mut types_builder = ignore::types::TypesBuilder::new();
    for ext in &config.extensions {
        types_builder.add("document", &format!("*.{}", ext.trim_start_matches('.')))?;
    }
    types_builder.select("document");

    let mut walk_builder = WalkBuilder::new(search_path);
    walk_builder
        .types(types_builder.build()?)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .ignore(config.respect_gitignore)
        .require_git(false);

    let mut file_paths = Vec::new();
    for entry in walk_builder.build() {
        match entry {
            Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                file_paths.push(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => log::warn!("Error walking directory: {err}"),
        }
    }

    file_paths.sort();
    file_paths.dedup();
    log::debug!("Found {} documents under {}", file_paths.len(), search_path.display());
    Ok(file_paths)
}

/// Path as shown to the user: relative to the working directory when possible.
pub fn to_display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.strip_prefix("./").unwrap_or(path).to_path_buf())
        .display()
        .to_string()
}
