//! Property-based tests for the sanitizer using proptest.

use modoc_render::sanitize;
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

// Text built from the characters the sanitizer cares about, plus a few words.
fn markdown_like() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(" ".to_string()),
            Just("  ".to_string()),
            Just("   ".to_string()),
            Just("\r".to_string()),
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            Just("\n\n\n".to_string()),
            Just("- ".to_string()),
            Just("`x`".to_string()),
            "[a-z|#]{1,6}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn non_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn line_count(text: &str) -> usize {
    text.lines().filter(|l| !l.trim().is_empty()).count()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Sanitizing twice is the same as sanitizing once.
    #[test]
    fn sanitize_is_idempotent(text in markdown_like()) {
        let once = sanitize(&text);
        prop_assert_eq!(sanitize(&once), once);
    }

    /// Arbitrary unicode input is handled the same way.
    #[test]
    fn sanitize_is_idempotent_on_any_string(text in any::<String>()) {
        let once = sanitize(&text);
        prop_assert_eq!(sanitize(&once), once);
    }

    /// Only whitespace is ever removed.
    #[test]
    fn sanitize_preserves_non_whitespace(text in markdown_like()) {
        prop_assert_eq!(non_whitespace(&sanitize(&text)), non_whitespace(&text));
    }

    /// Lines with content are neither dropped nor merged.
    #[test]
    fn sanitize_keeps_content_lines(text in markdown_like()) {
        prop_assert_eq!(line_count(&sanitize(&text)), line_count(&text));
    }

    /// No line ends in a single space or in three or more.
    #[test]
    fn sanitize_leaves_only_hard_breaks(text in markdown_like()) {
        let out = sanitize(&text);
        for line in out.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let trailing = line.len() - line.trim_end_matches(' ').len();
            prop_assert!(trailing == 0 || trailing == 2, "line {:?}", line);
        }
    }

    /// Never more than one blank line in a row.
    #[test]
    fn sanitize_caps_blank_lines(text in "[a-z \n]{0,60}") {
        prop_assert!(!sanitize(&text).contains("\n\n\n"));
    }
}
