//! Shared selection rule for ranked metric lists.

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::graph::build::DependencyGraph;

/// Default cap on every ranked list.
pub const TOP_N: usize = 10;

/// One ranked issue in a metric list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub id: String,
    pub title: String,
    /// Positive, rounded to three decimals.
    pub score: f64,
}

/// Round to three decimal places.
#[must_use]
pub fn round3(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Rank `scores` and keep the best `top_n`.
///
/// Sort is stable and descending, so equal scores keep the order they were
/// supplied in (live-node input order for every caller in this crate). Of
/// the first `top_n`, entries whose rounded score is not positive are
/// dropped.
#[must_use]
pub fn top_entries(
    g: &DependencyGraph,
    scores: impl IntoIterator<Item = (NodeIndex, f64)>,
    top_n: usize,
) -> Vec<MetricEntry> {
    let mut ranked: Vec<(NodeIndex, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(idx, score)| (idx, round3(score)))
        .filter(|&(_, score)| score > 0.0)
        .filter_map(|(idx, score)| {
            let node = g.graph.node_weight(idx)?;
            Some(MetricEntry {
                id: node.id.clone(),
                title: node.title.clone(),
                score,
            })
        })
        .collect()
}
