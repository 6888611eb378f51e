mod render;

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use lua_toolkit_bindings_common as common;
use lua_toolkit_core::{
    BeautifyConfig, DeleteOptions, Indent, OneLinerMode, beautify_with, delete_all_comments,
    extract_comments, has_comments, reverse, to_one_liner,
};

use crate::render::{Format, render_comments, render_error, status_message};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "luakit",
    version,
    about = "Lua toolkit: strip comments, condense, beautify, and inspect Lua source"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log verbosity for diagnostics written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Comment removal ─────────────────────────────────────────────
    /// Remove every `--` and `--[[ ]]` comment.
    Strip {
        /// Lua file, or `-` for stdin.
        file: String,
    },

    /// Remove selected comment classes, including custom markers.
    StripCustom {
        /// Lua file, or `-` for stdin.
        file: String,
        /// Remove `--` line comments.
        #[arg(long)]
        single_line: bool,
        /// Remove `--[[ ]]` block comments.
        #[arg(long)]
        multi_line: bool,
        /// Remove from this literal prefix to the end of the line.
        #[arg(long)]
        prefix: Option<String>,
        /// Start marker of a custom block comment (needs --block-end).
        #[arg(long)]
        block_start: Option<String>,
        /// End marker of a custom block comment.
        #[arg(long)]
        block_end: Option<String>,
        /// Read options from a JSON file instead of flags.
        #[arg(
            long,
            conflicts_with_all = ["single_line", "multi_line", "prefix", "block_start", "block_end"]
        )]
        options: Option<String>,
    },

    // ── Layout ──────────────────────────────────────────────────────
    /// Join the code onto a single line.
    OneLiner {
        /// Lua file, or `-` for stdin.
        file: String,
        /// What happens to comments: `preserve` or `delete`.
        #[arg(long, default_value = "preserve", value_parser = parse_mode_arg)]
        mode: OneLinerMode,
    },

    /// Re-indent the code with a keyword-driven heuristic.
    Beautify {
        /// Lua file, or `-` for stdin.
        file: String,
        /// Indent unit: a space count or `tab`.
        #[arg(long, default_value = "4", value_parser = parse_indent_arg)]
        indent: Indent,
        /// Write formatted output back to the file (in-place).
        #[arg(long, short, conflicts_with = "check")]
        write: bool,
        /// Check if the file is already formatted (exit 1 if not). For CI.
        #[arg(long, conflicts_with = "write")]
        check: bool,
    },

    /// Reverse the code character by character.
    Reverse {
        /// Lua file, or `-` for stdin.
        file: String,
    },

    // ── Inspection ──────────────────────────────────────────────────
    /// List every comment with its line number.
    Comments {
        /// Lua file, or `-` for stdin.
        file: String,
    },

    /// Exit 0 when the code has comments outside strings, 1 otherwise.
    HasComments {
        /// Lua file, or `-` for stdin.
        file: String,
    },
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn parse_mode_arg(s: &str) -> Result<OneLinerMode, String> {
    common::parse_mode(Some(s))
}

fn parse_indent_arg(s: &str) -> Result<Indent, String> {
    common::parse_indent(Some(s))
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    env_logger::Builder::new()
        .filter_level(cli.log_level.into())
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli.cmd, format) {
        render_error(&e, format);
        process::exit(2);
    }
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::Strip { file } => {
            let input = read_input(&file)?;
            println!("{}", delete_all_comments(&input));
        }
        Cmd::StripCustom {
            file,
            single_line,
            multi_line,
            prefix,
            block_start,
            block_end,
            options,
        } => {
            let options = match options {
                Some(path) => load_options_file(&path)?,
                None => DeleteOptions {
                    single_line,
                    multi_line,
                    custom_single_prefix: prefix.unwrap_or_default(),
                    custom_block_start: block_start.unwrap_or_default(),
                    custom_block_end: block_end.unwrap_or_default(),
                },
            };
            let input = read_input(&file)?;
            let out = common::strip_with_options(&input, &options).map_err(anyhow::Error::msg)?;
            println!("{out}");
        }
        Cmd::OneLiner { file, mode } => {
            let input = read_input(&file)?;
            println!("{}", to_one_liner(&input, mode));
        }
        Cmd::Beautify {
            file,
            indent,
            write,
            check,
        } => cmd_beautify(&file, indent, write, check, format)?,
        Cmd::Reverse { file } => {
            let input = read_input(&file)?;
            print!("{}", reverse(&input));
        }
        Cmd::Comments { file } => {
            let input = read_input(&file)?;
            render_comments(&file, &extract_comments(&input), format)?;
        }
        Cmd::HasComments { file } => {
            let input = read_input(&file)?;
            let found = has_comments(&input);
            status_message(format, found, "has comments", "no comments", &file);
            if !found {
                process::exit(1);
            }
        }
    }
    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_beautify(file: &str, indent: Indent, write: bool, check: bool, format: Format) -> Result<()> {
    if (write || check) && file == "-" {
        bail!("--write and --check need a file path, not stdin");
    }
    let input = read_input(file)?;
    let mut formatted = beautify_with(&input, &BeautifyConfig { indent });
    if !formatted.is_empty() {
        formatted.push('\n');
    }

    let already_formatted = formatted == input;

    if check {
        status_message(
            format,
            already_formatted,
            "already formatted",
            "not formatted",
            file,
        );
        if !already_formatted {
            process::exit(1);
        }
    } else if write {
        if !already_formatted {
            fs::write(file, &formatted).with_context(|| format!("failed to write {file}"))?;
        }
        status_message(
            format,
            !already_formatted,
            "formatted",
            "already formatted",
            file,
        );
    } else {
        print!("{formatted}");
    }

    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read the whole input from a file path, or from stdin for `-`.
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
}

fn load_options_file(path: &str) -> Result<DeleteOptions> {
    let json = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    common::load_delete_options(&json)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("invalid options file {path}"))
}
