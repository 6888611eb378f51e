//! WASM bindings for the Lua toolkit.
//!
//! Exposes the comment, one-liner, and formatting transforms to JavaScript
//! via `wasm-bindgen`. Structured results are returned as native JS objects
//! using `serde-wasm-bindgen`.

use wasm_bindgen::prelude::*;

use lua_toolkit_bindings_common as common;
use lua_toolkit_core::DeleteOptions;

// ── Public API ──────────────────────────────────────────────────────────

/// Whether the code contains a comment outside string literals.
#[wasm_bindgen(js_name = "hasComments")]
pub fn has_comments(text: &str) -> bool {
    lua_toolkit_core::has_comments(text)
}

/// Remove every `--` and `--[[ ]]` comment.
#[wasm_bindgen(js_name = "deleteAllComments")]
pub fn delete_all_comments(text: &str) -> String {
    lua_toolkit_core::delete_all_comments(text)
}

/// Remove the comment classes selected by `options`.
///
/// `options` is `{ singleLine, multiLine, customSinglePrefix,
/// customBlockStart, customBlockEnd }`; every key is optional.
#[wasm_bindgen(js_name = "deleteCustomComments")]
pub fn delete_custom_comments(text: &str, options: JsValue) -> Result<String, JsError> {
    let options: DeleteOptions = if options.is_undefined() || options.is_null() {
        DeleteOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("invalid options: {e}")))?
    };
    common::strip_with_options(text, &options).map_err(|e| JsError::new(&e))
}

/// Join the code onto one line.
///
/// `mode` is `"preserve"` (default) or `"delete"`.
#[wasm_bindgen(js_name = "toOneLiner")]
pub fn to_one_liner(text: &str, mode: Option<String>) -> Result<String, JsError> {
    common::condense(text, mode.as_deref()).map_err(|e| JsError::new(&e))
}

/// Re-indent the code.
///
/// `indent` is `"tab"` or a space count such as `"2"`; four spaces when
/// omitted.
#[wasm_bindgen(js_name = "beautifyCode")]
pub fn beautify_code(text: &str, indent: Option<String>) -> Result<String, JsError> {
    common::format_lua(text, indent.as_deref()).map_err(|e| JsError::new(&e))
}

/// Reverse the code character by character.
#[wasm_bindgen(js_name = "reverseCode")]
pub fn reverse_code(text: &str) -> String {
    lua_toolkit_core::reverse(text)
}

/// List comments as an array of `{ line, content }` objects.
#[wasm_bindgen(js_name = "extractAllComments")]
pub fn extract_all_comments(text: &str) -> Result<JsValue, JsError> {
    to_js(&lua_toolkit_core::extract_comments(text))
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}
