//! Graph density over live issues.

use crate::graph::build::DependencyGraph;

/// Compute graph density of the live subgraph.
///
/// Density = live edges / (n * (n - 1)) for a directed graph, where `n` is
/// the live issue count and a live edge has both endpoints live.
/// Returns 0.0 for fewer than 2 live issues.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn graph_density(g: &DependencyGraph) -> f64 {
    let n = g.live_count();
    if n < 2 {
        return 0.0;
    }
    let max_edges = (n * (n - 1)) as f64;
    g.live_edge_count() as f64 / max_edges
}
