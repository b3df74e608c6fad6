//! Whitespace normalization of rendered documents.
//!
//! Fragment expansion leaves whitespace artifacts behind: trailing spaces,
//! runs of blank lines where sections rendered empty, stray hard-break
//! markers. [`sanitize`] removes them in a fixed sequence of passes. Each
//! pass is a pure text transform and is usable on its own:
//!
//! 1. [`protect_hard_breaks`] - swap the two spaces of a hard break for a marker
//! 2. [`strip_trailing_spaces`] - drop every other trailing space
//! 3. [`restore_hard_breaks`] - turn the marker back into two spaces
//! 4. [`drop_marker_lines`] - delete lines holding nothing but a hard break
//! 5. [`collapse_blank_lines`] - allow at most one blank line in a row
//! 6. [`trim_trailing_blank_lines`] - end the document with a single line break
//!
//! The order matters: hard breaks must be protected before trailing spaces
//! are stripped, and blank lines are only counted once marker-only lines are
//! gone.
//!
//! `sanitize` never fails, never reorders lines and never touches anything
//! but spaces and line breaks. Applying it twice gives the same result as
//! applying it once.
//!
//! Both `\n` and `\r\n` are recognized as line breaks.

/// Base of the hard-break placeholder. Extended until it does not occur in
/// the text being sanitized.
const MARKER_BASE: &str = "\u{2021}\u{2021}\u{2021}HARDBREAK\u{2021}\u{2021}\u{2021}";

/// The two spaces that make a hard break.
const HARD_BREAK: &str = "  ";

/// Normalizes the whitespace of a rendered Markdown document.
///
/// ```rust
/// use modoc_render::sanitize;
///
/// assert_eq!(sanitize("foo  \nbar"), "foo  \nbar");
/// assert_eq!(sanitize("foo   \nbar"), "foo\nbar");
/// assert_eq!(sanitize("a\n\n\n\nb\n\n\n"), "a\n\nb\n");
/// ```
pub fn sanitize(text: &str) -> String {
    let marker = unique_marker(text);

    let result = protect_hard_breaks(text, &marker);
    let result = strip_trailing_spaces(&result);
    let result = restore_hard_breaks(&result, &marker);
    let result = drop_marker_lines(&result);
    let result = collapse_blank_lines(&result);
    let result = trim_trailing_blank_lines(&result);

    tracing::debug!(
        input_len = text.len(),
        output_len = result.len(),
        "sanitized document"
    );
    result
}

/// A hard-break placeholder that does not occur anywhere in `text`.
pub fn unique_marker(text: &str) -> String {
    let mut marker = MARKER_BASE.to_string();
    while text.contains(&marker) {
        marker.push('\u{2021}');
    }
    marker
}

/// Replaces exactly two trailing spaces before a line break with `marker`.
///
/// Three or more trailing spaces are not a hard break and are left for
/// [`strip_trailing_spaces`].
pub fn protect_hard_breaks(text: &str, marker: &str) -> String {
    map_lines(text, |content, ending| {
        if !ending.is_empty() && is_hard_break(content) {
            let kept = &content[..content.len() - HARD_BREAK.len()];
            Some(format!("{}{}{}", kept, marker, ending))
        } else {
            None
        }
    })
}

/// Removes trailing spaces from every line, including the last one.
///
/// Spaces interleaved with stray carriage returns at the end of a line are
/// removed too; the carriage returns stay.
pub fn strip_trailing_spaces(text: &str) -> String {
    map_lines(text, |content, ending| {
        let kept = content.trim_end_matches([' ', '\r']);
        let tail = &content[kept.len()..];
        if !tail.contains(' ') {
            return None;
        }
        let returns: String = tail.chars().filter(|&c| c == '\r').collect();
        Some(format!("{}{}{}", kept, returns, ending))
    })
}

/// Replaces `marker` at the end of a line with two spaces.
pub fn restore_hard_breaks(text: &str, marker: &str) -> String {
    map_lines(text, |content, ending| {
        if ending.is_empty() {
            return None;
        }
        content
            .strip_suffix(marker)
            .map(|kept| format!("{}{}{}", kept, HARD_BREAK, ending))
    })
}

/// Deletes lines consisting of nothing but a hard break.
pub fn drop_marker_lines(text: &str) -> String {
    map_lines(text, |content, ending| {
        (!ending.is_empty() && content == HARD_BREAK).then(String::new)
    })
}

/// Shortens every run of three or more line breaks to two, in the style of
/// the first break of the run.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Breaks(breaks) if breaks.len() >= 3 => {
                out.push_str(breaks[0]);
                out.push_str(breaks[0]);
            }
            Segment::Breaks(breaks) => breaks.iter().for_each(|b| out.push_str(b)),
        }
    }
    out
}

/// Shortens a run of two or more line breaks at the end of the document to
/// a single line break.
pub fn trim_trailing_blank_lines(text: &str) -> String {
    let mut segments = segments(text);
    if let Some(Segment::Breaks(breaks)) = segments.last_mut() {
        breaks.truncate(1);
    }

    let mut out = String::with_capacity(text.len());
    for segment in &segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Breaks(breaks) => breaks.iter().for_each(|b| out.push_str(b)),
        }
    }
    out
}

// Exactly two trailing spaces.
fn is_hard_break(content: &str) -> bool {
    content.ends_with(HARD_BREAK) && !content.ends_with("   ")
}

/// Splits text into lines as `(content, ending)` pairs. The ending is
/// `"\r\n"`, `"\n"`, or empty for a final line without a break.
fn lines(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.split_inclusive('\n').map(|piece| {
        if let Some(content) = piece.strip_suffix("\r\n") {
            (content, "\r\n")
        } else if let Some(content) = piece.strip_suffix('\n') {
            (content, "\n")
        } else {
            (piece, "")
        }
    })
}

/// Rebuilds `text` line by line. `f` returns the replacement for a whole
/// line (content and ending), or `None` to keep it unchanged.
fn map_lines<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    for (content, ending) in lines(text) {
        match f(content, ending) {
            Some(replacement) => out.push_str(&replacement),
            None => {
                out.push_str(content);
                out.push_str(ending);
            }
        }
    }
    out
}

enum Segment<'a> {
    Text(&'a str),
    Breaks(Vec<&'a str>),
}

/// Splits text into alternating runs of line breaks and other text.
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut breaks = Vec::new();
        while let Some(br) = leading_break(rest) {
            breaks.push(br);
            rest = &rest[br.len()..];
        }
        if !breaks.is_empty() {
            out.push(Segment::Breaks(breaks));
            continue;
        }
        let end = next_break(rest).unwrap_or(rest.len());
        out.push(Segment::Text(&rest[..end]));
        rest = &rest[end..];
    }
    out
}

fn leading_break(text: &str) -> Option<&'static str> {
    if text.starts_with("\r\n") {
        Some("\r\n")
    } else if text.starts_with('\n') {
        Some("\n")
    } else {
        None
    }
}

fn next_break(text: &str) -> Option<usize> {
    let newline = text.find('\n')?;
    if newline > 0 && text.as_bytes()[newline - 1] == b'\r' {
        Some(newline - 1)
    } else {
        Some(newline)
    }
}
