//! `fleet insights`: dependency-graph insights for the project's issues.

use std::io::Write;
use std::path::Path;

use clap::Args;
use fleet_graph::config::InsightsConfig;
use fleet_graph::{InsightsResult, MetricEntry, compute_insights_with};
use tracing::debug;

use super::load_snapshot;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `fleet insights`.
#[derive(Args, Debug, Default)]
pub struct InsightsArgs {
    /// Label copied into the result's `source` field (default: project root).
    #[arg(long)]
    pub source: Option<String>,

    /// Maximum entries per ranked list (default: config `insights.top_n`).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Execute `fleet insights`.
pub fn run_insights(
    args: &InsightsArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(project_root, output)?;
    debug!(
        issues = snapshot.issues.len(),
        path = %snapshot.issues_path.display(),
        "snapshot loaded"
    );

    let config = InsightsConfig {
        top_n: args.top.unwrap_or(snapshot.config.insights.top_n),
    };
    let source = args
        .source
        .clone()
        .unwrap_or_else(|| project_root.display().to_string());

    let result = compute_insights_with(&snapshot.issues, source, &config);
    render_mode(output, &result, render_insights_text, render_insights_pretty)
}

/// Sections in display order: heading, text-mode key, entries.
fn sections(result: &InsightsResult) -> [(&'static str, &'static str, &[MetricEntry]); 5] {
    [
        ("Bottlenecks (betweenness)", "bottleneck", result.bottlenecks.as_slice()),
        ("Keystones (unblocks downstream)", "keystone", result.keystones.as_slice()),
        ("Influencers (total degree)", "influencer", result.influencers.as_slice()),
        ("Hubs (depends on)", "hub", result.hubs.as_slice()),
        ("Authorities (depended on)", "authority", result.authorities.as_slice()),
    ]
}

fn render_insights_pretty(result: &InsightsResult, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Graph insights: {}", result.source))?;
    pretty_kv(w, "Issues", result.total_issues.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", result.graph_density))?;
    pretty_kv(w, "Cycles", result.cycles.len().to_string())?;
    pretty_kv(w, "Computed", result.timestamp.to_rfc3339())?;

    for (heading, _, entries) in sections(result) {
        writeln!(w)?;
        pretty_section(w, heading)?;
        if entries.is_empty() {
            writeln!(w, "  (none)")?;
            continue;
        }
        for (rank, entry) in entries.iter().enumerate() {
            writeln!(
                w,
                "{:>3}. {} — {} ({})",
                rank + 1,
                entry.id,
                entry.title,
                entry.score
            )?;
        }
    }

    if !result.cycles.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Dependency cycles")?;
        for cycle in &result.cycles {
            writeln!(
                w,
                "  Cycle {} ({} issues): {}",
                cycle.cycle_id,
                cycle.length,
                cycle.member_ids.join(" → ")
            )?;
        }
    }

    Ok(())
}

fn render_insights_text(result: &InsightsResult, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "source  {}", result.source)?;
    writeln!(w, "total_issues  {}", result.total_issues)?;
    writeln!(w, "graph_density  {}", result.graph_density)?;
    for (_, key, entries) in sections(result) {
        for entry in entries {
            writeln!(w, "{key}  {}  {}  {}", entry.id, entry.score, entry.title)?;
        }
    }
    for cycle in &result.cycles {
        writeln!(w, "cycle  {}  {}", cycle.cycle_id, cycle.member_ids.join(","))?;
    }
    Ok(())
}
