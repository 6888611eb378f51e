//! Shared logic for Lua toolkit hosts (WASM, CLI).
//!
//! Hosts hand over loosely typed input (mode names, indent strings, options
//! JSON). This crate turns it into core types, validates it, and runs the
//! transform. Errors come back as plain messages so each host can wrap them
//! in its own error type.

use lua_toolkit_core::{
    BeautifyConfig, CommentRecord, DeleteOptions, Indent, OneLinerMode, beautify_with,
    delete_custom_comments, extract_comments, load_delete_options_from_str, to_one_liner,
};

// ── Argument parsing ────────────────────────────────────────────────────

/// Parse a one-liner mode name. `None` selects `preserve`.
pub fn parse_mode(mode: Option<&str>) -> Result<OneLinerMode, String> {
    match mode.map(str::trim) {
        None | Some("preserve") => Ok(OneLinerMode::Preserve),
        Some("delete") => Ok(OneLinerMode::Delete),
        Some(other) => Err(format!(
            "unknown one-liner mode {other:?} (expected \"preserve\" or \"delete\")"
        )),
    }
}

/// Parse an indent string into the `Indent` enum.
///
/// Accepts `"tab"` or a space count from 1 to 16. `None` gives the default.
pub fn parse_indent(indent: Option<&str>) -> Result<Indent, String> {
    let Some(raw) = indent.map(str::trim) else {
        return Ok(Indent::default());
    };
    if raw.eq_ignore_ascii_case("tab") {
        return Ok(Indent::Tab);
    }
    match raw.parse::<u8>() {
        Ok(n @ 1..=16) => Ok(Indent::Spaces(n)),
        _ => Err(format!(
            "invalid indent {raw:?} (expected \"tab\" or a space count from 1 to 16)"
        )),
    }
}

/// Load and validate delete options from JSON.
pub fn load_delete_options(json: &str) -> Result<DeleteOptions, String> {
    load_delete_options_from_str(json).map_err(|e| {
        log::warn!("rejected delete options: {e}");
        e.to_string()
    })
}

/// Validate options built by a host (rather than loaded from JSON).
pub fn check_delete_options(options: &DeleteOptions) -> Result<(), String> {
    options.validate().map_err(|e| {
        log::warn!("rejected delete options: {e}");
        e.to_string()
    })
}

// ── Workflows ───────────────────────────────────────────────────────────

/// Delete comments as selected by an options JSON object.
pub fn strip_custom(text: &str, options_json: &str) -> Result<String, String> {
    let options = load_delete_options(options_json)?;
    Ok(delete_custom_comments(text, &options))
}

/// Delete comments as selected by host-built options, after validation.
pub fn strip_with_options(text: &str, options: &DeleteOptions) -> Result<String, String> {
    check_delete_options(options)?;
    Ok(delete_custom_comments(text, options))
}

/// Join `text` onto one line using a mode name.
pub fn condense(text: &str, mode: Option<&str>) -> Result<String, String> {
    Ok(to_one_liner(text, parse_mode(mode)?))
}

/// Re-indent `text` using an indent string.
pub fn format_lua(text: &str, indent: Option<&str>) -> Result<String, String> {
    let config = BeautifyConfig {
        indent: parse_indent(indent)?,
    };
    Ok(beautify_with(text, &config))
}

/// List comments as a JSON array of `{ "line", "content" }` objects.
pub fn comments_json(text: &str) -> Result<String, String> {
    let records: Vec<CommentRecord> = extract_comments(text);
    serde_json::to_string(&records).map_err(|e| format!("failed to serialize comments: {e}"))
}
