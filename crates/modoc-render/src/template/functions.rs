//! Rendering function library.
//!
//! Pure helpers that fragment expressions call while a document is expanded:
//! code fencing, anchors, value blocks, labels, conditionals and defaults.
//!
//! ## Functions
//!
//! - [`code_block`] - inline code, or an indented fenced block for multi-line text
//! - [`anchored_code`] - [`code_block`] wrapped in an HTML anchor
//! - [`json_value_block`] - [`code_block`] tagged `json`, passing `n/a` through
//! - [`required_label`] - `(Optional)` / `(Required)` from a has-default flag
//! - [`required_mode_enabled`] - whether inputs are grouped by requiredness
//! - [`choose`] / [`or_default`] - conditional selection and fallbacks
//! - [`multiline_text`], [`description_text`], [`header_text`] - free text to Markdown
//!
//! Nothing here reads ambient state; settings are always passed in. An absent
//! value where text is expected yields empty text, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::settings::Settings;

/// Placeholder rendered for values that do not exist.
pub const NOT_AVAILABLE: &str = "n/a";

/// Language tag for type expressions.
pub const HCL: &str = "hcl";

/// Language tag for values.
pub const JSON: &str = "json";

/// Indentation applied to every line of a fenced block.
const CODE_INDENT: &str = "    ";

// A line break followed by a word continues the paragraph.
static SOFT_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\S*)(\r?\n)(\s*)([0-9A-Za-z_]+)").expect("soft break pattern is valid")
});

/// Which namespace an anchor id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Input,
    Output,
}

impl AnchorKind {
    pub fn prefix(self) -> &'static str {
        match self {
            AnchorKind::Input => "input",
            AnchorKind::Output => "output",
        }
    }
}

/// Renders `value` as code.
///
/// Single-line text becomes inline code (`` `value` ``). Text containing a
/// line break becomes a fenced block tagged with `language`, every line
/// indented one level, with a blank line before and after.
///
/// ```rust
/// use modoc_render::template::functions::code_block;
///
/// assert_eq!(code_block(Some("string"), "hcl"), "`string`");
/// assert_eq!(
///     code_block(Some("object({\n  a = string\n})"), "hcl"),
///     "\n\n    ```hcl\n    object({\n      a = string\n    })\n    ```\n\n"
/// );
/// assert_eq!(code_block(None, "hcl"), "");
/// ```
pub fn code_block(value: Option<&str>, language: &str) -> String {
    let Some(code) = value.filter(|v| !v.is_empty()) else {
        return String::new();
    };
    if !code.contains('\n') {
        return format!("`{}`", code);
    }

    let fenced = format!("```{}\n{}\n```", language, code);
    let indented: Vec<String> = fenced
        .split('\n')
        .map(|line| format!("{}{}", CODE_INDENT, line))
        .collect();
    format!("\n\n{}\n\n", indented.join("\n"))
}

/// Wraps the `hcl` code rendering of `value` in an anchor.
///
/// The anchor id is `input_<value>` or `output_<value>` and its target is
/// `#<value>`.
///
/// ```rust
/// use modoc_render::template::functions::{anchored_code, AnchorKind};
///
/// assert_eq!(
///     anchored_code(Some("region"), AnchorKind::Input),
///     "<a id='input_region' href='#region'>`region`</a>"
/// );
/// ```
pub fn anchored_code(value: Option<&str>, kind: AnchorKind) -> String {
    let code = code_block(value, HCL);
    match value {
        Some(value) if !code.is_empty() => format!(
            "<a id='{}_{}' href='#{}'>{}</a>",
            kind.prefix(),
            value,
            value,
            code
        ),
        _ => code,
    }
}

/// Renders a value as code tagged `json`. The `n/a` sentinel is left as is.
pub fn json_value_block(value: Option<&str>) -> String {
    match value {
        Some(NOT_AVAILABLE) => NOT_AVAILABLE.to_string(),
        other => code_block(other, JSON),
    }
}

/// Label for an input: having a default makes it optional to supply.
pub fn required_label(has_default: bool) -> &'static str {
    if has_default {
        "(Optional)"
    } else {
        "(Required)"
    }
}

/// Whether inputs are grouped into required and optional lists.
///
/// When this is off, every input shows a `Default:` line, whether or not it
/// has a default.
pub fn required_mode_enabled(settings: &Settings) -> bool {
    settings.show_required
}

pub fn choose<T>(condition: bool, if_true: T, if_false: T) -> T {
    if condition {
        if_true
    } else {
        if_false
    }
}

/// Returns `fallback` when `value` is absent or empty.
pub fn or_default<'a>(fallback: &'a str, value: Option<&'a str>) -> &'a str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => fallback,
    }
}

/// Converts multi-line free text into Markdown.
///
/// Blank-line separated paragraphs are kept apart, and a line break followed
/// by a word becomes a hard break so the paragraph keeps its shape. Inside a
/// table cell (`in_table`) the text is trimmed and every remaining break
/// becomes `<br>`.
pub fn multiline_text(text: Option<&str>, in_table: bool) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let text = if in_table { text.trim() } else { text };

    let text = text.replace("\n\n", "<br><br>");
    let text = SOFT_BREAK.replace_all(&text, "${1}  ${2}${3}${4}");
    let text = text.replace("    \n", "  \n").replace("<br>  \n", "\n\n");

    if in_table {
        text.replace("  \n", "<br>").replace('\n', "<br>")
    } else {
        text.replace("<br>", "\n")
    }
}

/// Description of an input or output, flattened to one line.
pub fn description_text(text: Option<&str>) -> String {
    let escaped = text.map(|t| t.replace('|', "\\|"));
    multiline_text(escaped.as_deref(), true)
}

/// The module header as a Markdown block.
pub fn header_text(text: Option<&str>) -> String {
    multiline_text(text.map(str::trim), false)
}

/// The run of `#` characters opening a section heading.
pub fn heading(settings: &Settings, extra: usize) -> String {
    "#".repeat(settings.indent_level + extra)
}

/// Indentation preceding the detail lines of a list item.
pub fn detail_indent(settings: &Settings) -> String {
    " ".repeat(settings.indent_level + 1)
}
