//! Whitespace and line clean-up shared by the transforms.

use std::sync::LazyLock;

use regex::Regex;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\r?\n").expect("blank-line pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-run pattern is valid"));

/// Drop whitespace-only lines and trim the result.
pub(crate) fn drop_blank_lines(text: &str) -> String {
    BLANK_LINE.replace_all(text, "").trim().to_string()
}

/// Collapse every whitespace run (line breaks included) to a single space
/// and trim the result.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Collapse runs of blank lines into one blank line. Expects `\n` breaks and
/// empty blank lines.
pub(crate) fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

/// Remove trailing spaces and tabs from `out`.
pub(crate) fn trim_trailing_blanks(out: &mut String) {
    let kept = out.trim_end_matches([' ', '\t']).len();
    out.truncate(kept);
}
