//! Output modes and rendering shared by every `fleet` command.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// How a command writes its report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Headed sections for a terminal.
    Pretty,
    /// One keyed row per fact, for pipes and agents.
    Text,
    /// The serialized report.
    Json,
}

impl OutputMode {
    /// Parse a `FORMAT` value; unknown values are ignored.
    fn from_env_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn pick_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    stdout_is_tty: bool,
) -> OutputMode {
    format_flag
        .or_else(|| json_flag.then_some(OutputMode::Json))
        .or_else(|| format_env.and_then(OutputMode::from_env_value))
        .unwrap_or(if stdout_is_tty {
            OutputMode::Pretty
        } else {
            OutputMode::Text
        })
}

/// Resolve the output mode from CLI flags, `FORMAT`, and whether stdout is a TTY.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let format_env = std::env::var("FORMAT").ok();
    pick_output_mode(
        format_flag,
        json_flag,
        format_env.as_deref(),
        io::stdout().is_terminal(),
    )
}

/// Render a report to stdout with the renderer matching `mode`.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(mode, value, text_fn, pretty_fn, &mut out)
}

fn render_to<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, out)?,
        OutputMode::Pretty => pretty_fn(value, out)?,
    }
    Ok(())
}

/// Failures `fleet` reports before exiting non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// `.beads/fleet.toml` exists but cannot be read or parsed.
    ConfigInvalid,
    /// The issues file exists but cannot be read.
    IssuesUnreadable,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigInvalid => "config_invalid",
            Self::IssuesUnreadable => "issues_unreadable",
        }
    }

    const fn suggestion(self) -> &'static str {
        match self {
            Self::ConfigInvalid => "fix or remove .beads/fleet.toml",
            Self::IssuesUnreadable => "check that the issues file is a readable JSONL file",
        }
    }
}

/// A structured command failure, rendered to stderr.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    pub suggestion: &'static str,
    pub error_code: ErrorCode,
}

impl CliError {
    #[must_use]
    pub fn new(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: error_code.suggestion(),
            error_code,
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(mode, error, &mut out)
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, &serde_json::json!({ "error": error }))?;
            writeln!(out)?;
        }
        OutputMode::Pretty => {
            writeln!(out, "error[{}]: {}", error.error_code.as_str(), error.message)?;
            writeln!(out, "  hint: {}", error.suggestion)?;
        }
        OutputMode::Text => {
            writeln!(out, "error  {}  {}", error.error_code.as_str(), error.message)?;
            writeln!(out, "hint  {}", error.suggestion)?;
        }
    }
    Ok(())
}
