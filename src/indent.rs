//! Removing and restoring the literal indentation of a fenced block.
//!
//! A block carries a single prefix, taken from its opening fence. There is no
//! per-line indent detection: lines that do not start with the prefix are passed
//! through as they are.

/// Strip `prefix` from every line that starts with it.
pub fn strip_indent<S: AsRef<str>>(lines: &[S], prefix: &str) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            line.strip_prefix(prefix).unwrap_or(line).to_string()
        })
        .collect()
}

/// Prepend `prefix` to every line.
pub fn reapply_indent<S: AsRef<str>>(lines: &[S], prefix: &str) -> Vec<String> {
    lines.iter().map(|line| format!("{prefix}{}", line.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_indent() {
        let lines = ["    a: 1", "    b:", "      - c"];
        assert_eq!(strip_indent(&lines, "    "), vec!["a: 1", "b:", "  - c"]);
    }

    #[test]
    fn test_strip_indent_tolerates_ragged_lines() {
        let lines = ["  a: 1", "b: 2", " c: 3", ""];
        assert_eq!(strip_indent(&lines, "  "), vec!["a: 1", "b: 2", " c: 3", ""]);
    }

    #[test]
    fn test_strip_indent_is_literal() {
        // A tab is not two spaces.
        let lines = ["\ta: 1"];
        assert_eq!(strip_indent(&lines, "  "), vec!["\ta: 1"]);
    }

    #[test]
    fn test_reapply_indent_is_unconditional() {
        let lines = ["a: 1", "", "b: 2"];
        assert_eq!(reapply_indent(&lines, "> "), vec!["> a: 1", "> ", "> b: 2"]);
    }

    #[test]
    fn test_empty_prefix_is_identity() {
        let lines = ["  a", "b"];
        assert_eq!(strip_indent(&lines, ""), vec!["  a", "b"]);
        assert_eq!(reapply_indent(&lines, ""), vec!["  a", "b"]);
    }

    proptest! {
        #[test]
        fn prop_reapply_then_strip_restores_lines(
            prefix in "[ \t]{0,6}",
            lines in proptest::collection::vec("[^\n]{0,20}", 0..8),
        ) {
            let indented = reapply_indent(&lines, &prefix);
            prop_assert_eq!(strip_indent(&indented, &prefix), lines);
        }

        #[test]
        fn prop_strip_then_reapply_restores_uniformly_indented_lines(
            prefix in "[ ]{0,6}",
            body in proptest::collection::vec("[a-z:0-9 ]{0,20}", 0..8),
        ) {
            let original: Vec<String> = body.iter().map(|l| format!("{prefix}{l}")).collect();
            let round_trip = reapply_indent(&strip_indent(&original, &prefix), &prefix);
            prop_assert_eq!(round_trip, original);
        }
    }
}
