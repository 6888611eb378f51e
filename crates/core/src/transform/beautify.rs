//! Heuristic indentation formatter.
//!
//! Not a parser: a line-oriented indent estimator driven by keywords. Lines
//! are first split at statement-like boundaries so one-liners open up, then
//! each line is indented by a running block level. Code that uses keywords
//! as field names (`t.end`) can be mis-indented.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexer::SegKind;
use crate::literal::{
    COMMENT_PLACEHOLDER_PREFIX, escape_prefix, protect, restore_tokens, substitute,
};
use crate::text::collapse_blank_runs;

/// Indentation unit for [`beautify_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// This many spaces per level.
    Spaces(u8),
    /// One tab per level.
    Tab,
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(4)
    }
}

impl Indent {
    fn unit(self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat(usize::from(n)),
            Indent::Tab => "\t".to_string(),
        }
    }
}

/// Configuration for the beautifier.
#[derive(Debug, Clone, Default)]
pub struct BeautifyConfig {
    /// Indentation unit.
    pub indent: Indent,
}

// ── Keyword tables ──────────────────────────────────────────────────────

/// First words that open a block.
const OPENERS: [&str; 6] = ["function", "if", "while", "for", "repeat", "do"];
/// First words that close (or split) the enclosing block.
const DEDENTS: [&str; 4] = ["end", "until", "else", "elseif"];
/// Last words that leave a block open.
const TRAILING_OPENERS: [&str; 3] = ["then", "do", "else"];
/// Words that continue the expression before them; no break after `)`.
const CONTINUATIONS: [&str; 7] = ["then", "do", "and", "or", "end", "else", "elseif"];

static CLOSE_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)[ \t]*").expect("paren pattern is valid"));
static THEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bthen\b[ \t]*").expect("then pattern is valid"));
static ELSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\belse\b[ \t]*").expect("else pattern is valid"));
static ELSEIF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\belseif\b").expect("elseif pattern is valid"));
static END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bend\b").expect("end pattern is valid"));
static SEMICOLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";[ \t]*").expect("semicolon pattern is valid"));

// ── Public API ──────────────────────────────────────────────────────────

/// Re-indent `text` with the default configuration (four spaces).
pub fn beautify(text: &str) -> String {
    beautify_with(text, &BeautifyConfig::default())
}

/// Re-indent `text`.
///
/// Blank lines are kept (runs collapse to one), the result is trimmed, and
/// string literals and comments come back verbatim. Lines inside multi-line
/// literals and block comments are not re-indented.
pub fn beautify_with(text: &str, config: &BeautifyConfig) -> String {
    let protected = protect(text);
    let mut comments = Vec::new();
    let escaped = escape_prefix(&protected.text, COMMENT_PLACEHOLDER_PREFIX, &mut comments);
    let shielded = substitute(
        &escaped,
        SegKind::is_comment,
        COMMENT_PLACEHOLDER_PREFIX,
        &mut comments,
    );

    let unit = config.indent.unit();
    let mut lines: Vec<String> = Vec::new();
    let mut level = 0usize;

    for source_line in shielded.lines() {
        if source_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        for fragment in split_statements(source_line).split('\n') {
            let line = fragment.trim();
            if line.is_empty() {
                continue;
            }
            if DEDENTS.contains(&first_word(line)) {
                level = level.saturating_sub(1);
            }
            lines.push(format!("{}{}", unit.repeat(level), line));
            if opens_block(line) {
                level += 1;
            }
        }
    }

    let joined = collapse_blank_runs(&lines.join("\n"));
    let with_comments = restore_tokens(joined.trim(), &comments, COMMENT_PLACEHOLDER_PREFIX);
    let out = protected.restore(&with_comments);
    log::debug!(
        "beautify: {} -> {} lines, final level {level}",
        text.lines().count(),
        out.lines().count()
    );
    out
}

// ── Line splitting ──────────────────────────────────────────────────────

/// Insert line breaks at statement boundaries within one source line.
///
/// A comment placeholder right after a break point stays on the line it
/// followed.
fn split_statements(line: &str) -> String {
    let s = rewrite(line, &CLOSE_PAREN, |m, rest| {
        let next = first_word(rest);
        if next.is_empty() || CONTINUATIONS.contains(&next) || is_comment_token(rest) {
            m.to_string()
        } else {
            ")\n".to_string()
        }
    });
    let s = rewrite(&s, &THEN, |m, rest| {
        if is_comment_token(rest) {
            m.to_string()
        } else {
            "then\n".to_string()
        }
    });
    let s = rewrite(&s, &ELSE, |m, rest| {
        if is_comment_token(rest) {
            format!("\n{m}")
        } else {
            "\nelse\n".to_string()
        }
    });
    let s = ELSEIF.replace_all(&s, "\nelseif").into_owned();
    let s = END.replace_all(&s, "\nend").into_owned();
    rewrite(&s, &SEMICOLON, |m, rest| {
        if is_comment_token(rest) {
            m.to_string()
        } else {
            ";\n".to_string()
        }
    })
}

/// Replace each match of `re` with `f(matched, rest_after_match)`.
fn rewrite(s: &str, re: &Regex, mut f: impl FnMut(&str, &str) -> String) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut last = 0;
    for m in re.find_iter(s) {
        out.push_str(&s[last..m.start()]);
        out.push_str(&f(m.as_str(), &s[m.end()..]));
        last = m.end();
    }
    out.push_str(&s[last..]);
    out
}

// ── Line classification ─────────────────────────────────────────────────

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn first_word(s: &str) -> &str {
    let end = s.find(|c: char| !is_word_char(c)).unwrap_or(s.len());
    &s[..end]
}

fn last_word(s: &str) -> &str {
    let start = s
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    &s[start..]
}

fn is_comment_token(s: &str) -> bool {
    s.starts_with(COMMENT_PLACEHOLDER_PREFIX)
}

/// Drop a trailing comment placeholder so the last word is real code.
fn strip_trailing_comment(line: &str) -> &str {
    if let Some(pos) = line.rfind(COMMENT_PLACEHOLDER_PREFIX) {
        let tail = &line[pos + COMMENT_PLACEHOLDER_PREFIX.len()..];
        if let Some(digits) = tail.strip_suffix("__")
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            return line[..pos].trim_end();
        }
    }
    line
}

fn opens_block(line: &str) -> bool {
    let code = strip_trailing_comment(line);
    let first = first_word(code);
    let last = last_word(code);
    if first == "do" && last == "end" {
        return false;
    }
    if OPENERS.contains(&first) || TRAILING_OPENERS.contains(&last) {
        return true;
    }
    if last == "end" {
        return false;
    }
    // `local function f()`, `x = function()`, `pcall(function()`
    code.split(|c: char| !is_word_char(c)).any(|w| w == "function")
}
