//! Resilient loading of beads `issues.jsonl` snapshots.
//!
//! # Format
//!
//! One JSON issue object per line. Blank lines are skipped. A line that
//! fails to parse does not abort the load: it is skipped, recorded as a
//! [`LoadWarning`], and logged at `warn`. Only I/O failures are errors.
//!
//! Duplicate issue ids are passed through as-is; the graph builder treats
//! them as caller error.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use crate::model::Issue;

/// Why a single line was rejected.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("malformed issue JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("issue has an empty id")]
    EmptyId,
}

/// A skipped line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// 1-based line number.
    pub line_number: usize,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.message)
    }
}

/// Issues read from a snapshot, plus whatever was skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadedIssues {
    pub issues: Vec<Issue>,
    pub warnings: Vec<LoadWarning>,
}

/// Parse one JSONL line into an issue.
///
/// # Errors
///
/// Returns [`LineError`] if the line is not a valid issue object.
pub fn parse_line(line: &str) -> Result<Issue, LineError> {
    let issue: Issue = serde_json::from_str(line)?;
    if issue.id.trim().is_empty() {
        return Err(LineError::EmptyId);
    }
    Ok(issue)
}

/// Parse issues from any buffered reader.
///
/// # Errors
///
/// Returns an error only if reading from `reader` fails.
pub fn parse_issues(reader: impl BufRead) -> Result<LoadedIssues> {
    let mut loaded = LoadedIssues::default();

    for (i, line) in reader.lines().enumerate() {
        let line_number = i + 1;
        let line = line.with_context(|| format!("read line {line_number}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_line(trimmed) {
            Ok(issue) => loaded.issues.push(issue),
            Err(e) => {
                warn!(line_number, error = %e, "skipping malformed issue line");
                loaded.warnings.push(LoadWarning {
                    line_number,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(loaded)
}

/// Load issues from a JSONL file on disk.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
#[instrument]
pub fn load_issues(path: &Path) -> Result<LoadedIssues> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let loaded = parse_issues(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", path.display()))?;

    debug!(
        issues = loaded.issues.len(),
        skipped = loaded.warnings.len(),
        "issues loaded"
    );
    Ok(loaded)
}
