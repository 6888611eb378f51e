//! Comment detection and removal.
//!
//! Every entry point runs on protected text (see [`crate::literal`]), so a
//! `--` inside a string literal is never taken for a comment.

use regex::Regex;

use crate::lexer::{SegKind, segment};
use crate::literal::protect;
use crate::options::DeleteOptions;
use crate::text::{drop_blank_lines, trim_trailing_blanks};

/// Whether `text` contains at least one comment outside string literals.
pub fn has_comments(text: &str) -> bool {
    let protected = protect(text);
    segment(&protected.text).iter().any(|s| s.kind.is_comment())
}

/// Remove every line and long-bracket comment.
///
/// Lines left blank are dropped and the result is trimmed. Literal contents
/// are preserved byte for byte.
pub fn delete_all_comments(text: &str) -> String {
    delete_custom_comments(text, &DeleteOptions::standard())
}

/// Remove the comment classes selected by `options`.
///
/// Each class is applied independently. Custom markers are matched as plain
/// text, never as patterns. A custom block start without a block end removes
/// nothing. Markers are not validated here; hosts that accept markers from
/// users should call [`DeleteOptions::validate`] first.
pub fn delete_custom_comments(text: &str, options: &DeleteOptions) -> String {
    let protected = protect(text);
    let mut body = strip_comments(&protected.text, options.single_line, options.multi_line);

    if let Some(prefix) = options.custom_prefix() {
        let pattern = format!(r"[ \t]*{}[^\r\n]*", regex::escape(prefix));
        body = remove_matches(&body, &pattern);
    }
    if let Some((start, end)) = options.custom_block() {
        let pattern = format!(r"(?s){}.*?{}", regex::escape(start), regex::escape(end));
        body = remove_matches(&body, &pattern);
    }

    let out = protected.restore(&drop_blank_lines(&body));
    log::debug!(
        "comment deletion: {} -> {} bytes ({} literal(s) protected)",
        text.len(),
        out.len(),
        protected.literals.len()
    );
    out
}

/// Remove standard comments from protected text.
///
/// A removed line comment takes the spaces and tabs before it along. A
/// removed block comment leaves its line breaks behind; one that spans a
/// single line and sat between two tokens leaves one space so the tokens do
/// not fuse.
pub(crate) fn strip_comments(text: &str, line: bool, block: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut gap = false;
    for seg in segment(text) {
        match seg.kind {
            SegKind::LineComment if line => trim_trailing_blanks(&mut out),
            SegKind::BlockComment if block => {
                let breaks: String = seg
                    .text
                    .chars()
                    .filter(|c| matches!(c, '\r' | '\n'))
                    .collect();
                if breaks.is_empty() {
                    gap = true;
                } else {
                    out.push_str(&breaks);
                    gap = false;
                }
            }
            _ => {
                if gap && needs_separator(&out, seg.text) {
                    out.push(' ');
                }
                gap = false;
                out.push_str(seg.text);
            }
        }
    }
    out
}

fn needs_separator(before: &str, after: &str) -> bool {
    let ends_token = before.chars().next_back().is_some_and(|c| !c.is_whitespace());
    let starts_token = after.chars().next().is_some_and(|c| !c.is_whitespace());
    ends_token && starts_token
}

fn remove_matches(text: &str, pattern: &str) -> String {
    match Regex::new(pattern) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(e) => {
            log::warn!("skipping custom marker: {e}");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_comments_outside_strings_only() {
        assert!(has_comments("x = 1 -- note"));
        assert!(has_comments("--[[ block ]]"));
        assert!(!has_comments("s = \"-- not a comment\""));
        assert!(!has_comments("s = [[ -- nor this ]]"));
        assert!(!has_comments(""));
    }

    #[test]
    fn removes_line_and_block_comments() {
        let input = "--[[ header\n spanning lines ]]\nlocal x = 1 -- trailing\n-- whole line\nprint(x)\n";
        assert_eq!(delete_all_comments(input), "local x = 1\nprint(x)");
    }

    #[test]
    fn leading_block_comment() {
        assert_eq!(delete_all_comments("--[[ comment ]] print(1)"), "print(1)");
    }

    #[test]
    fn leveled_block_comment() {
        assert_eq!(
            delete_all_comments("--[==[ a ]] b ]=] ]==]x = 1"),
            "x = 1"
        );
    }

    #[test]
    fn comment_markers_in_strings_survive() {
        let input = "s = \"-- not a comment\" -- real one\nt = '--[[ also not ]]'";
        assert_eq!(
            delete_all_comments(input),
            "s = \"-- not a comment\"\nt = '--[[ also not ]]'"
        );
    }

    #[test]
    fn block_comment_between_tokens_keeps_them_apart() {
        assert_eq!(delete_all_comments("local--[[x]]y = 1"), "local y = 1");
    }

    #[test]
    fn multi_line_block_comment_keeps_its_line_breaks() {
        assert_eq!(strip_comments("a--[[x\ny]]b", true, true), "a\nb");
    }

    #[test]
    fn removal_does_not_join_an_open_quote_to_a_later_one() {
        let input = "x = \"a --[[\n]]\" -- c\"";
        let once = strip_comments(input, true, true);
        assert_eq!(once, "x = \"a \n\" -- c\"");
        assert_eq!(strip_comments(&once, true, true), once);
        let deleted = delete_all_comments(input);
        assert_eq!(delete_all_comments(&deleted), deleted);
    }

    #[test]
    fn placeholder_text_in_code_survives_deletion() {
        assert_eq!(
            delete_all_comments("x = __LUA_STRING_0__ .. 'a' -- c"),
            "x = __LUA_STRING_0__ .. 'a'"
        );
    }

    #[test]
    fn unterminated_block_comment_removed_to_end_of_line() {
        assert_eq!(delete_all_comments("x = 1\n--[[ open\ny = 2"), "x = 1\ny = 2");
    }

    #[test]
    fn custom_single_line_only_keeps_blocks() {
        let options = DeleteOptions {
            single_line: true,
            ..DeleteOptions::default()
        };
        assert_eq!(
            delete_custom_comments("--[[ keep ]]\nx = 1 -- drop", &options),
            "--[[ keep ]]\nx = 1"
        );
    }

    #[test]
    fn custom_multi_line_only_keeps_line_comments() {
        let options = DeleteOptions {
            multi_line: true,
            ..DeleteOptions::default()
        };
        assert_eq!(
            delete_custom_comments("--[[ drop ]]\nx = 1 -- keep", &options),
            "x = 1 -- keep"
        );
    }

    #[test]
    fn custom_prefix_is_literal() {
        let options = DeleteOptions {
            custom_single_prefix: "//*".into(),
            ..DeleteOptions::default()
        };
        assert_eq!(
            delete_custom_comments("a = 1 //* note\nb = 2 // keep\nc = 3 /// keep", &options),
            "a = 1\nb = 2 // keep\nc = 3 /// keep"
        );
    }

    #[test]
    fn custom_prefix_ignores_strings() {
        let options = DeleteOptions {
            custom_single_prefix: "#".into(),
            ..DeleteOptions::default()
        };
        assert_eq!(
            delete_custom_comments("s = '#tag' # note", &options),
            "s = '#tag'"
        );
    }

    #[test]
    fn custom_block_is_non_greedy_across_lines() {
        let options = DeleteOptions {
            custom_block_start: "#[".into(),
            custom_block_end: "]#".into(),
            ..DeleteOptions::default()
        };
        assert_eq!(
            delete_custom_comments("a #[ one\ntwo ]# b #[ three ]# c", &options),
            "a  b  c"
        );
    }

    #[test]
    fn lone_block_start_removes_nothing() {
        let options = DeleteOptions {
            custom_block_start: "#[".into(),
            ..DeleteOptions::default()
        };
        let input = "a #[ one ]# b";
        assert_eq!(delete_custom_comments(input, &options), input);
    }

    #[test]
    fn nothing_selected_only_drops_blank_lines() {
        let input = "\n-- note\n\nx = 1 --[[ c ]]\n";
        assert_eq!(
            delete_custom_comments(input, &DeleteOptions::default()),
            "-- note\nx = 1 --[[ c ]]"
        );
    }
}
