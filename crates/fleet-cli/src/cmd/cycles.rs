//! `fleet cycles`: list dependency cycles among live issues.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use clap::Args;
use fleet_graph::graph::{DependencyGraph, detect_cycles};
use fleet_graph::CycleRecord;
use serde::Serialize;
use tracing::debug;

use super::load_snapshot;
use crate::output::{OutputMode, render_mode};

/// Arguments for `fleet cycles`.
#[derive(Args, Debug, Default)]
pub struct CyclesArgs {}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<CycleRecord>,
}

/// Execute `fleet cycles`.
pub fn run_cycles(
    _args: &CyclesArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(project_root, output)?;
    debug!(
        issues = snapshot.issues.len(),
        path = %snapshot.issues_path.display(),
        "snapshot loaded"
    );
    let graph = DependencyGraph::build(&snapshot.issues);

    let payload = CyclesOutput {
        cycles: detect_cycles(&graph),
    };
    let titles: HashMap<&str, &str> = snapshot
        .issues
        .iter()
        .map(|issue| (issue.id.as_str(), issue.title.as_str()))
        .collect();

    render_mode(
        output,
        &payload,
        render_cycles_text,
        |report, w| render_cycles_human(report, &titles, w),
    )
}

fn render_cycles_human(
    payload: &CyclesOutput,
    titles: &HashMap<&str, &str>,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No dependency cycles found.")?;
        return Ok(());
    }

    writeln!(w, "Dependency cycles ({})", payload.cycles.len())?;

    for cycle in &payload.cycles {
        writeln!(w, "\nCycle {} ({} issues):", cycle.cycle_id, cycle.length)?;
        for item_id in &cycle.member_ids {
            if let Some(title) = titles.get(item_id.as_str()) {
                writeln!(w, "  - {item_id} — {title}")?;
            } else {
                writeln!(w, "  - {item_id}")?;
            }
        }
    }

    Ok(())
}

fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for cycle in &payload.cycles {
        writeln!(w, "{}  {}", cycle.cycle_id, cycle.member_ids.join(","))?;
    }
    Ok(())
}
