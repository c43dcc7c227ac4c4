pub mod completions;
pub mod cycles;
pub mod insights;

use std::path::{Path, PathBuf};

use fleet_graph::Issue;
use fleet_graph::config::{FleetConfig, load_config};
use fleet_graph::loader::load_issues;
use tracing::{info, warn};

use crate::output::{CliError, ErrorCode, OutputMode, render_error};

/// Config plus issues for one project root.
#[derive(Debug)]
pub struct ProjectSnapshot {
    pub config: FleetConfig,
    pub issues_path: PathBuf,
    pub issues: Vec<Issue>,
}

/// Load `.beads/fleet.toml` and the configured issues file.
///
/// A missing issues file yields an empty snapshot with a warning. Config and
/// read failures are rendered as structured errors before bailing.
pub fn load_snapshot(project_root: &Path, output: OutputMode) -> anyhow::Result<ProjectSnapshot> {
    let config = load_config(project_root)
        .map_err(|e| report(output, ErrorCode::ConfigInvalid, &e))?;

    let issues_path = config.issues_path(project_root);
    if !issues_path.exists() {
        warn!(path = %issues_path.display(), "issues file not found, reporting an empty snapshot");
        return Ok(ProjectSnapshot {
            config,
            issues_path,
            issues: Vec::new(),
        });
    }

    let loaded = load_issues(&issues_path)
        .map_err(|e| report(output, ErrorCode::IssuesUnreadable, &e))?;

    if !loaded.warnings.is_empty() {
        info!(
            skipped = loaded.warnings.len(),
            path = %issues_path.display(),
            "some issue lines were skipped"
        );
    }

    Ok(ProjectSnapshot {
        config,
        issues_path,
        issues: loaded.issues,
    })
}

/// Render `err` as a structured error, returning the error to bail with.
fn report(output: OutputMode, code: ErrorCode, err: &anyhow::Error) -> anyhow::Error {
    if let Err(render_err) = render_error(output, &CliError::new(code, format!("{err:#}"))) {
        return render_err;
    }
    anyhow::anyhow!("{}", code.as_str())
}
