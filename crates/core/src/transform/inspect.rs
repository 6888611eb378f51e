//! Read-only inspection: reversal and comment listing.

use serde::{Deserialize, Serialize};

use crate::lexer::comment_at;

/// A comment found by [`extract_comments`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// 1-based line of the comment opener.
    pub line: usize,
    /// Full comment text, delimiters included.
    pub content: String,
}

/// Reverse the character sequence of `text`.
///
/// Works on `char`s, not grapheme clusters, so combining marks end up
/// attached to a different base character. Reversing twice gives the input
/// back.
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// List every comment in `text`, in source order.
///
/// Best effort: the scan runs over raw text without literal protection, so a
/// `--` inside a string literal is reported as a comment too.
pub fn extract_comments(text: &str) -> Vec<CommentRecord> {
    let b = text.as_bytes();
    let mut records = Vec::new();
    let mut line = 1usize;
    let mut counted = 0usize;
    let mut pos = 0usize;

    while let Some(offset) = text[pos..].find("--") {
        let start = pos + offset;
        let (_, end) = comment_at(b, start);
        line += count_newlines(&b[counted..start]);
        counted = start;
        records.push(CommentRecord {
            line,
            content: text[start..end].to_string(),
        });
        pos = end;
    }

    log::debug!("extracted {} comment(s)", records.len());
    records
}

fn count_newlines(b: &[u8]) -> usize {
    b.iter().filter(|&&c| c == b'\n').count()
}
