//! Lua text toolkit core library.
//!
//! String-to-string transforms over Lua source text: comment removal
//! ([`delete_all_comments`], [`delete_custom_comments`]), one-line
//! condensing ([`to_one_liner`]), heuristic re-indentation ([`beautify`]),
//! reversal ([`reverse`]), and comment listing ([`extract_comments`]).
//!
//! These are lexical transforms, not a Lua parser. Every mutating transform
//! first hides string literals behind placeholder tokens ([`protect`]) so a
//! `--` inside a string is never treated as a comment. All functions are
//! pure and total over arbitrary input.

#![warn(missing_docs)]

/// Lexical segmentation into code, literals, and comments.
pub mod lexer;
/// String literal protection and restoration.
pub mod literal;
/// Custom deletion options and their validation.
pub mod options;
/// The transforms.
pub mod transform;

mod text;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Literal protection
pub use literal::{Protected, STRING_PLACEHOLDER_PREFIX, protect, restore};

// Options
pub use options::{DeleteOptions, OptionsError, load_delete_options_from_str};

// Transforms
pub use transform::beautify::{BeautifyConfig, Indent, beautify, beautify_with};
pub use transform::comments::{delete_all_comments, delete_custom_comments, has_comments};
pub use transform::condense::{OneLinerMode, to_one_liner};
pub use transform::inspect::{CommentRecord, extract_comments, reverse};
