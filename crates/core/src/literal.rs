//! String literal protection.
//!
//! Comment-oriented rewrites must never reach into string contents, so every
//! transform first swaps each literal for an opaque placeholder token
//! (`__LUA_STRING_<n>__`), works on the protected text, and then puts the
//! literals back.
//!
//! Protection runs in three passes. Any text that already spells the token
//! prefix is swapped for a token first, so every prefix left in the output
//! belongs to a token `protect` created. Long-bracket literals follow, then
//! quoted literals over the result. Restoration is a single left-to-right
//! scan that never looks inside what it inserts.

use crate::lexer::{SegKind, segment};

/// Prefix of the placeholder token that stands in for a string literal.
pub const STRING_PLACEHOLDER_PREFIX: &str = "__LUA_STRING_";

/// Prefix of the placeholder token that stands in for a comment.
pub(crate) const COMMENT_PLACEHOLDER_PREFIX: &str = "__LUA_COMMENT_";

/// Source text with its string literals swapped out for placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Protected {
    /// The rewritten text.
    pub text: String,
    /// Original literals, delimiters included, indexed by placeholder number.
    /// Prefix text found in the source is stored here too.
    pub literals: Vec<String>,
}

impl Protected {
    /// Put the literals back into `text` (usually a rewrite of `self.text`).
    pub fn restore(&self, text: &str) -> String {
        restore(text, &self.literals)
    }
}

/// Replace every string literal in `text` with a placeholder token.
///
/// Unterminated literals are left untouched. Comments are skipped verbatim,
/// so the long bracket of a `--[[ ... ]]` comment is never taken for a string.
pub fn protect(text: &str) -> Protected {
    let mut literals = Vec::new();
    let escaped = escape_prefix(text, STRING_PLACEHOLDER_PREFIX, &mut literals);
    let long_pass = substitute(
        &escaped,
        |k| k == SegKind::LongString,
        STRING_PLACEHOLDER_PREFIX,
        &mut literals,
    );
    let quoted_pass = substitute(
        &long_pass,
        |k| k == SegKind::QuotedString,
        STRING_PLACEHOLDER_PREFIX,
        &mut literals,
    );
    log::trace!(
        "protected {} literal(s) in {} bytes",
        literals.len(),
        text.len()
    );
    Protected {
        text: quoted_pass,
        literals,
    }
}

/// Substitute each placeholder in `text` with its literal.
///
/// Literals are inserted verbatim; escape sequences are not interpreted, and
/// placeholder-like text inside an inserted literal stays as it is.
pub fn restore(text: &str, literals: &[String]) -> String {
    restore_tokens(text, literals, STRING_PLACEHOLDER_PREFIX)
}

/// Build the placeholder token for index `n`.
pub(crate) fn placeholder(prefix: &str, n: usize) -> String {
    format!("{prefix}{n}__")
}

/// Swap every occurrence of `prefix` in `text` for a placeholder that
/// restores to the prefix itself.
///
/// Token text is made of word characters only, so the swap never changes how
/// [`segment`] splits the text.
pub(crate) fn escape_prefix(text: &str, prefix: &str, store: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(prefix) {
        out.push_str(&rest[..pos]);
        out.push_str(&placeholder(prefix, store.len()));
        store.push(prefix.to_string());
        rest = &rest[pos + prefix.len()..];
    }
    out.push_str(rest);
    out
}

/// Swap every segment whose kind passes `select` for a placeholder, appending
/// the original text to `store`. Numbering continues from `store.len()`.
///
/// Tokens already inside a selected segment are expanded before it is
/// stored, so each stored item is original source text.
pub(crate) fn substitute(
    text: &str,
    select: impl Fn(SegKind) -> bool,
    prefix: &str,
    store: &mut Vec<String>,
) -> String {
    let mut out = String::with_capacity(text.len());
    for seg in segment(text) {
        if select(seg.kind) {
            let original = restore_tokens(seg.text, store, prefix);
            out.push_str(&placeholder(prefix, store.len()));
            store.push(original);
        } else {
            out.push_str(seg.text);
        }
    }
    out
}

/// Inverse of [`substitute`] and [`escape_prefix`] for tokens built from
/// `prefix`.
///
/// Scans left to right and replaces each well-formed token whose index is in
/// range. Inserted items are not scanned again.
pub(crate) fn restore_tokens(text: &str, items: &[String], prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(prefix) {
        let after = &rest[pos + prefix.len()..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let item = after[digits..]
            .starts_with("__")
            .then(|| after[..digits].parse::<usize>().ok())
            .flatten()
            .and_then(|n| items.get(n));
        match item {
            Some(item) => {
                out.push_str(&rest[..pos]);
                out.push_str(item);
                rest = &after[digits + 2..];
            }
            None => {
                // Prefixes start with an ASCII `_`, so `pos + 1` is a char boundary.
                out.push_str(&rest[..=pos]);
                rest = &rest[pos + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}
