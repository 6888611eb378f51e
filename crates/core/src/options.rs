//! Configuration for custom comment deletion.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::literal::STRING_PLACEHOLDER_PREFIX;

/// Errors that can occur when loading or validating [`DeleteOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    /// JSON deserialization failed.
    #[error("invalid options JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value cannot be used safely.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// Which comment classes [`delete_custom_comments`] strips.
///
/// Serialized with camelCase keys so the same object can come straight from
/// a browser host. Every field is optional on input.
///
/// An empty string turns the corresponding custom marker off. A block start
/// without a block end (or the reverse) removes nothing.
///
/// [`delete_custom_comments`]: crate::delete_custom_comments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteOptions {
    /// Strip standard `--` line comments.
    pub single_line: bool,
    /// Strip standard `--[[ ... ]]` long-bracket comments.
    pub multi_line: bool,
    /// Strip from this literal prefix to the end of the line.
    pub custom_single_prefix: String,
    /// Start marker of a custom block comment.
    pub custom_block_start: String,
    /// End marker of a custom block comment.
    pub custom_block_end: String,
}

impl DeleteOptions {
    /// Options that strip both standard comment forms and nothing else.
    pub fn standard() -> Self {
        Self {
            single_line: true,
            multi_line: true,
            ..Self::default()
        }
    }

    /// The custom line prefix, when set.
    pub fn custom_prefix(&self) -> Option<&str> {
        (!self.custom_single_prefix.is_empty()).then_some(self.custom_single_prefix.as_str())
    }

    /// The custom block markers, when both are set.
    pub fn custom_block(&self) -> Option<(&str, &str)> {
        if self.custom_block_start.is_empty() || self.custom_block_end.is_empty() {
            return None;
        }
        Some((&self.custom_block_start, &self.custom_block_end))
    }

    /// Reject custom markers that could match inside a placeholder token.
    ///
    /// Deletion runs over text whose literals are replaced by
    /// `__LUA_STRING_<n>__` tokens. A marker that contains the token prefix,
    /// or that is spelled only with characters the token uses (`_`, the
    /// letters of `LUA` and `STRING`, digits), could delete part of a token
    /// and lose the literal behind it.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let markers = [
            ("customSinglePrefix", &self.custom_single_prefix),
            ("customBlockStart", &self.custom_block_start),
            ("customBlockEnd", &self.custom_block_end),
        ];
        for (field, marker) in markers {
            if marker.trim().is_empty() && !marker.is_empty() {
                return Err(OptionsError::InvalidField {
                    field: field.into(),
                    reason: "must not be only whitespace".into(),
                });
            }
            if collides_with_placeholder(marker) {
                return Err(OptionsError::InvalidField {
                    field: field.into(),
                    reason: format!("{marker:?} can match inside a string placeholder token"),
                });
            }
        }
        Ok(())
    }
}

fn collides_with_placeholder(marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }
    marker.contains(STRING_PLACEHOLDER_PREFIX)
        || marker
            .chars()
            .all(|c| c == '_' || c.is_ascii_digit() || "LUASTRING".contains(c))
}

/// Load and validate [`DeleteOptions`] from a JSON string.
pub fn load_delete_options_from_str(s: &str) -> Result<DeleteOptions, OptionsError> {
    let options: DeleteOptions = serde_json::from_str(s)?;
    options.validate()?;
    Ok(options)
}
