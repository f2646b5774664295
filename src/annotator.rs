//!
//! Error markers and per-block dispositioning.
//!
//! A block the formatter rejects gets one marker line directly under its opening
//! fence, `[error] <first diagnostic line>`, indented like the fence. The marker
//! is the durable record of the failure: later format passes leave the block
//! alone until the fix pass removes it.

use crate::document::Document;
use crate::formatter::{FormatMode, Formatter, FormatterError, ProfileResolver};
use crate::indent::{reapply_indent, strip_indent};
use crate::processor::ProcessorError;
use crate::rewriter::replace_block_contents;
use crate::scanner::{CodeBlock, ERROR_MARKER};

/// Literal prefix of every marker line.
pub const MARKER_PREFIX: &str = "[error]";

/// What a format pass did with one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// Already canonical.
    Ok,
    /// Contents replaced with the formatter's output.
    Changed,
    /// The formatter failed; a marker carrying the diagnostic was inserted.
    FormatterRejected { diagnostic: String },
    /// A marker was already present; the formatter was not run.
    AlreadyFlagged,
}

/// Text of the marker line for `block`.
pub fn marker_line(block: &CodeBlock, diagnostic: &str) -> String {
    let diagnostic = diagnostic.lines().next().unwrap_or("").trim();
    format!("{}{MARKER_PREFIX} {diagnostic}", block.indent)
}

/// Insert a marker directly after the opening fence of `block`.
///
/// Shifts every following line down by one.
pub fn annotate(document: &mut Document, block: &CodeBlock, diagnostic: &str) {
    document.insert_line(block.start_line, marker_line(block, diagnostic));
}

/// Whether the first line inside `block` is a marker.
pub fn is_annotated(document: &Document, block: &CodeBlock) -> bool {
    block.content_len() > 0
        && document
            .line(block.content_start())
            .is_some_and(|line| ERROR_MARKER.is_match(line))
}

/// Diagnostic text carried by a marker line, if it is one.
pub fn marker_diagnostic(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed.strip_prefix(MARKER_PREFIX).map(str::trim)
}

/// Indent-stripped content of `block`, as handed to the formatter or editor.
pub fn block_text(document: &Document, block: &CodeBlock) -> String {
    let content = document.lines_between(block.start_line, block.end_line);
    join_lines(&strip_indent(content, &block.indent))
}

pub(crate) fn join_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Run the formatter over `block` and apply the result to the document.
///
/// Rejections become markers; any other formatter failure is returned. After a
/// `Changed` or `FormatterRejected` outcome the block's `end_line` is stale.
pub fn disposition_block(
    document: &mut Document,
    block: &CodeBlock,
    formatter: &dyn Formatter,
    profiles: &ProfileResolver,
) -> Result<FormatOutcome, ProcessorError> {
    if is_annotated(document, block) {
        log::debug!("Line {}: block already flagged, skipping", block.start_line);
        return Ok(FormatOutcome::AlreadyFlagged);
    }
    if block.content_len() == 0 {
        return Ok(FormatOutcome::Ok);
    }

    let profile = profiles.profile_for(&block.language);
    let text = block_text(document, block);

    let formatted = match formatter.format_text(&profile, &text, FormatMode::Write) {
        Ok(formatted) => formatted.unwrap_or_else(|| text.clone()),
        Err(FormatterError::Rejected { diagnostic }) => {
            log::info!("Line {}: {} block rejected: {diagnostic}", block.start_line, block.language);
            annotate(document, block, &diagnostic);
            return Ok(FormatOutcome::FormatterRejected { diagnostic });
        }
        Err(e) => return Err(e.into()),
    };

    match formatter.format_text(&profile, &text, FormatMode::Check) {
        Ok(_) => return Ok(FormatOutcome::Ok),
        Err(e) if e.is_rejection() => {}
        Err(e) => return Err(e.into()),
    }

    let new_lines: Vec<String> = formatted.lines().map(str::to_string).collect();
    let new_lines = reapply_indent(&new_lines, &block.indent);
    if new_lines.as_slice() == document.lines_between(block.start_line, block.end_line) {
        log::debug!(
            "Line {}: check mode reported a difference but the output is identical",
            block.start_line
        );
        return Ok(FormatOutcome::Ok);
    }

    replace_block_contents(document, block, new_lines)?;
    log::debug!("Line {}: {} block reformatted", block.start_line, block.language);
    Ok(FormatOutcome::Changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::BlockScanner;
    use crate::formatter::{FormatMode, Profile};
    use crate::test_support::FakeFormatter;
    use pretty_assertions::assert_eq;

    /// Echoes its input in write mode but always reports a difference in check mode.
    struct DisagreeingFormatter;

    impl Formatter for DisagreeingFormatter {
        fn format_text(&self, _: &Profile, text: &str, mode: FormatMode) -> Result<Option<String>, FormatterError> {
            match mode {
                FormatMode::Write => Ok(Some(text.to_string())),
                FormatMode::Check => Err(FormatterError::Rejected {
                    diagnostic: "(stdin)".to_string(),
                }),
            }
        }
    }

    fn first_block(doc: &Document) -> CodeBlock {
        BlockScanner::new(&["yaml"]).unwrap().next_block(doc, 1).unwrap()
    }

    #[test]
    fn test_marker_line_uses_block_indent() {
        let block = CodeBlock {
            start_line: 1,
            end_line: 3,
            language: "yaml".to_string(),
            indent: "  ".to_string(),
        };
        assert_eq!(marker_line(&block, "bad thing\nsecond line"), "  [error] bad thing");
    }

    #[test]
    fn test_marker_diagnostic() {
        assert_eq!(marker_diagnostic("  [error] oops (1:2)"), Some("oops (1:2)"));
        assert_eq!(marker_diagnostic("a: 1"), None);
    }

    #[test]
    fn test_annotate_then_is_annotated() {
        let mut doc = Document::from_content("```yaml\na: [\n```\n");
        let block = first_block(&doc);
        assert!(!is_annotated(&doc, &block));

        annotate(&mut doc, &block, "SyntaxError");
        assert_eq!(doc.content(), "```yaml\n[error] SyntaxError\na: [\n```\n");
        let block = first_block(&doc);
        assert!(is_annotated(&doc, &block));
    }

    #[test]
    fn test_empty_block_is_not_annotated() {
        let doc = Document::from_content("```yaml\n```\n[error] outside\n");
        assert!(!is_annotated(&doc, &first_block(&doc)));
    }

    #[test]
    fn test_block_text_strips_indent() {
        let doc = Document::from_content("  ```yaml\n  a: 1\n    b: 2\n  ```\n");
        assert_eq!(block_text(&doc, &first_block(&doc)), "a: 1\n  b: 2\n");
    }

    #[test]
    fn test_disposition_changed_preserves_indent() {
        let mut doc = Document::from_content("- item\n\n  ```yaml\n  a:1\n  b:   2\n  ```\n");
        let block = first_block(&doc);
        let formatter = FakeFormatter::new();

        let outcome = disposition_block(&mut doc, &block, &formatter, &ProfileResolver::default()).unwrap();

        assert_eq!(outcome, FormatOutcome::Changed);
        assert_eq!(doc.content(), "- item\n\n  ```yaml\n  a: 1\n  b: 2\n  ```\n");
    }

    #[test]
    fn test_disposition_ok_does_not_mutate() {
        let mut doc = Document::from_content("```yaml\na: 1\n```\n");
        let block = first_block(&doc);
        let formatter = FakeFormatter::new();

        let outcome = disposition_block(&mut doc, &block, &formatter, &ProfileResolver::default()).unwrap();

        assert_eq!(outcome, FormatOutcome::Ok);
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_disposition_rejected_adds_single_marker() {
        let mut doc = Document::from_content("```yaml\na: [\nb: 1\n```\n");
        let block = first_block(&doc);
        let formatter = FakeFormatter::new();

        let outcome = disposition_block(&mut doc, &block, &formatter, &ProfileResolver::default()).unwrap();

        assert!(matches!(outcome, FormatOutcome::FormatterRejected { .. }));
        assert_eq!(
            doc.content(),
            "```yaml\n[error] SyntaxError: unclosed bracket\na: [\nb: 1\n```\n"
        );
    }

    #[test]
    fn test_disposition_already_flagged_skips_formatter() {
        let mut doc = Document::from_content("```yaml\n[error] earlier\na: [\n```\n");
        let block = first_block(&doc);
        let formatter = FakeFormatter::new();

        let outcome = disposition_block(&mut doc, &block, &formatter, &ProfileResolver::default()).unwrap();

        assert_eq!(outcome, FormatOutcome::AlreadyFlagged);
        assert_eq!(formatter.calls(), 0);
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_disposition_passes_profile() {
        let mut doc = Document::from_content("```yml\na:1\n```\n");
        let block = BlockScanner::new(&["yml"]).unwrap().next_block(&doc, 1).unwrap();
        let formatter = FakeFormatter::new();

        disposition_block(&mut doc, &block, &formatter, &ProfileResolver::default()).unwrap();

        assert_eq!(formatter.parsers(), vec!["yaml", "yaml"]);
    }

    #[test]
    fn test_disposition_propagates_fatal_errors() {
        let mut doc = Document::from_content("```yaml\na: 1\n```\n");
        let block = first_block(&doc);
        let formatter = FakeFormatter::unavailable();

        let err = disposition_block(&mut doc, &block, &formatter, &ProfileResolver::default()).unwrap_err();

        assert!(matches!(err, ProcessorError::Formatter(FormatterError::NotFound { .. })));
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_disposition_check_disagreement_with_identical_output_is_ok() {
        let mut doc = Document::from_content("  ```yaml
  a: 1
  ```
");
        let block = first_block(&doc);

        let outcome =
            disposition_block(&mut doc, &block, &DisagreeingFormatter, &ProfileResolver::default()).unwrap();

        assert_eq!(outcome, FormatOutcome::Ok);
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_disposition_empty_block_skips_formatter() {
        let mut doc = Document::from_content("```yaml
```
");
        let block = first_block(&doc);
        let formatter = FakeFormatter::new();

        let outcome = disposition_block(&mut doc, &block, &formatter, &ProfileResolver::default()).unwrap();

        assert_eq!(outcome, FormatOutcome::Ok);
        assert_eq!(formatter.calls(), 0);
        assert!(!doc.is_modified());
    }
}
