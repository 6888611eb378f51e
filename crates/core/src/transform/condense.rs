//! One-liner condensing.

use serde::{Deserialize, Serialize};

use crate::lexer::{SegKind, segment};
use crate::literal::protect;
use crate::text::{collapse_whitespace, trim_trailing_blanks};
use crate::transform::comments::strip_comments;

/// What happens to comments when code is joined onto one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OneLinerMode {
    /// Keep comments, rewriting line comments into terminated block comments.
    #[default]
    Preserve,
    /// Drop every comment.
    Delete,
}

/// Join `text` onto a single line.
///
/// In [`OneLinerMode::Preserve`] each line comment becomes `--[[ body ]]` so
/// it cannot swallow the code that follows once lines are joined. A comment
/// whose body contains `]]` cannot be wrapped and is dropped instead.
///
/// Whitespace runs collapse to one space. Collapsing runs on the protected
/// text, so literal contents come back unchanged: a multi-line long string
/// keeps its line breaks and the result spans several lines there.
pub fn to_one_liner(text: &str, mode: OneLinerMode) -> String {
    let protected = protect(text);
    let body = match mode {
        OneLinerMode::Preserve => wrap_line_comments(&protected.text),
        OneLinerMode::Delete => strip_comments(&protected.text, true, true),
    };
    let out = protected.restore(&collapse_whitespace(&body));
    log::debug!("one-liner ({mode:?}): {} -> {} bytes", text.len(), out.len());
    out
}

fn wrap_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for seg in segment(text) {
        if seg.kind != SegKind::LineComment {
            out.push_str(seg.text);
            continue;
        }
        let body = seg.text[2..].trim();
        if body.contains("]]") {
            trim_trailing_blanks(&mut out);
        } else {
            out.push_str("--[[ ");
            out.push_str(body);
            out.push_str(" ]]");
        }
    }
    out
}
