//! Terminal and JSON rendering for command results.
//!
//! Pretty output uses ariadne's colour helpers and goes to stderr for status
//! lines, so transformed source on stdout stays clean. JSON output is a
//! single object on stdout.

use std::io::{self, IsTerminal};

use ariadne::{Color, Fmt};
use lua_toolkit_core::CommentRecord;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured terminal output.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Comment listing ─────────────────────────────────────────────────────

/// Render extracted comments.
///
/// Pretty: one `line │ text` row per comment line, then a count on stderr.
/// JSON: `{ "file", "count", "comments": [{ "line", "content" }] }`.
pub(crate) fn render_comments(
    file: &str,
    records: &[CommentRecord],
    format: Format,
) -> anyhow::Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "file": file,
                "count": records.len(),
                "comments": records,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            let width = records
                .last()
                .map_or(1, |r| (r.line + r.content.lines().count()).to_string().len());
            for record in records {
                for (offset, text) in record.content.lines().enumerate() {
                    let number = format!("{:>width$}", record.line + offset);
                    println!("{} │ {}", number.fg(Color::Cyan), text.fg(Color::Green));
                }
            }
            let s = if records.len() == 1 { "" } else { "s" };
            eprintln!("{} comment{s} in {file}", records.len());
        }
    }
    Ok(())
}

// ── Status lines ────────────────────────────────────────────────────────

/// Emit a status message for --check / --write / has-comments in the
/// appropriate format.
pub(crate) fn status_message(
    format: Format,
    condition: bool,
    if_true: &str,
    if_false: &str,
    file: &str,
) {
    let msg = if condition { if_true } else { if_false };
    match format {
        Format::Json => {
            let out = serde_json::json!({ "status": msg, "ok": condition, "file": file });
            println!("{out}");
        }
        Format::Pretty => {
            let color = if condition { Color::Green } else { Color::Yellow };
            eprintln!("{}: {}", msg.fg(color), file);
        }
    }
}

/// Report a failed command.
///
/// JSON mode prints `{ "success": false, "error": "command_failed",
/// "message" }` on stdout so scripted callers always get an object.
pub(crate) fn render_error(err: &anyhow::Error, format: Format) {
    let message = format!("{err:#}");
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": message,
            });
            println!("{out}");
        }
        Format::Pretty => {
            eprintln!("{}: {message}", "error".fg(Color::Red));
        }
    }
}
