//! Running the format, fix and analyze passes over a set of files.

use anyhow::Context;
use colored::*;
use fencefmt_lib::document::Document;
use fencefmt_lib::fix_loop::{DecisionSource, FixLoop, FixOutcome};
use fencefmt_lib::editor::Editor;
use fencefmt_lib::{CodeBlockProcessor, FormatOutcome};
use std::path::PathBuf;

use super::discovery::to_display_path;

/// Totals of a format run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormatStats {
    pub files: usize,
    pub blocks: usize,
    pub changed: usize,
    pub rejected: usize,
    pub flagged: usize,
    pub files_modified: usize,
}

impl FormatStats {
    /// Whether `--check` should fail.
    pub fn needs_attention(&self) -> bool {
        self.changed + self.rejected + self.flagged > 0
    }
}

/// Format every block in `paths`. With `check`, nothing is written.
pub fn format_files(
    paths: &[PathBuf],
    processor: &CodeBlockProcessor,
    check: bool,
    quiet: bool,
) -> anyhow::Result<FormatStats> {
    let mut stats = FormatStats::default();

    for path in paths {
        let display = to_display_path(path);
        let mut document = Document::load(path)?;
        let reports = processor
            .format_document(&mut document)
            .with_context(|| format!("Failed to format {display}"))?;

        stats.files += 1;
        stats.blocks += reports.len();
        for report in &reports {
            match &report.outcome {
                FormatOutcome::Ok => {}
                FormatOutcome::Changed => {
                    stats.changed += 1;
                    if !quiet {
                        let verb = if check { "would be reformatted" } else { "reformatted" };
                        println!("{}:{}: {} block {verb}", display.bold(), report.line, report.language);
                    }
                }
                FormatOutcome::FormatterRejected { diagnostic } => {
                    stats.rejected += 1;
                    if !quiet {
                        println!(
                            "{}:{}: {} block {}: {diagnostic}",
                            display.bold(),
                            report.line,
                            report.language,
                            "rejected".red()
                        );
                    }
                }
                FormatOutcome::AlreadyFlagged => {
                    stats.flagged += 1;
                    log::info!("{display}:{}: block still flagged, run `fencefmt fix`", report.line);
                }
            }
        }

        if document.is_modified() && !check {
            document.save()?;
            stats.files_modified += 1;
        }
    }

    if !quiet {
        print_format_summary(&stats, check);
    }
    Ok(stats)
}

fn print_format_summary(stats: &FormatStats, check: bool) {
    let verb = if check { "would reformat" } else { "reformatted" };
    let mut summary = format!(
        "Checked {} blocks in {} files: {verb} {}",
        stats.blocks, stats.files, stats.changed
    );
    if stats.rejected > 0 {
        summary.push_str(&format!(", {} newly rejected", stats.rejected));
    }
    if stats.flagged > 0 {
        summary.push_str(&format!(", {} still flagged", stats.flagged));
    }
    if stats.rejected + stats.flagged > 0 {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.green());
    }
}

/// Totals of a fix run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixStats {
    pub files: usize,
    pub edits: usize,
    pub resolved: usize,
    pub skipped: usize,
    pub ignored: usize,
    pub quit: bool,
}

/// Run the interactive fix loop over each document holding a marker.
///
/// Stops at the first document where the user quits.
pub fn fix_files(
    paths: &[PathBuf],
    processor: &CodeBlockProcessor,
    editor: &mut dyn Editor,
    decisions: &mut dyn DecisionSource,
    quiet: bool,
) -> anyhow::Result<FixStats> {
    let mut stats = FixStats::default();

    for path in paths {
        let display = to_display_path(path);
        let mut document = Document::load(path)?;
        if processor.scanner().find_error(&document, 1).is_none() {
            continue;
        }

        log::info!("Fixing {display}");
        let summary = FixLoop::new(processor, editor, decisions)
            .run(&mut document)
            .with_context(|| format!("Fix run aborted in {display}"))?;

        stats.files += 1;
        stats.edits += summary.edits;
        stats.resolved += summary.resolved;
        stats.skipped += summary.skipped;
        stats.ignored += summary.ignored;
        if summary.outcome == FixOutcome::Quit {
            stats.quit = true;
            break;
        }
    }

    if !quiet {
        let summary = format!(
            "Fixed {} blocks in {} files ({} skipped, {} ignored)",
            stats.resolved, stats.files, stats.skipped, stats.ignored
        );
        if stats.quit {
            println!("{} {}", summary.yellow(), "(quit early)".dimmed());
        } else {
            println!("{}", summary.green());
        }
    }
    Ok(stats)
}

/// Print every flagged block. Returns how many were found.
pub fn analyze_files(paths: &[PathBuf], processor: &CodeBlockProcessor, quiet: bool) -> anyhow::Result<usize> {
    let mut total = 0;
    let mut files = 0;

    for path in paths {
        let display = to_display_path(path);
        let document = Document::load(path)?;
        let flagged = processor.flagged_blocks(&document);
        if flagged.is_empty() {
            continue;
        }
        files += 1;
        total += flagged.len();
        for block in &flagged {
            println!(
                "{}:{}: [{}] {}",
                display.bold(),
                block.line,
                block.language,
                block.diagnostic.red()
            );
        }
    }

    if !quiet {
        let summary = format!("{total} flagged blocks in {files} files");
        if total == 0 {
            println!("{}", summary.green());
        } else {
            println!("{}", summary.yellow());
        }
    }
    Ok(total)
}
