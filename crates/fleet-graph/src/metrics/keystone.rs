//! Keystones: issues whose resolution transitively unblocks the most work.
//!
//! For each live issue `v`, breadth-first search forward along live
//! `blockedBy` edges (from `v` to the issues that depend on it, then to the
//! issues that depend on those, …). The score is the number of distinct
//! live issues reached, `v` itself excluded.
//!
//! Complexity: O(V * (V + E)).

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::graph::build::DependencyGraph;
use crate::metrics::rank::{MetricEntry, top_entries};

/// Transitive downstream count for every live issue, in live-node order.
#[must_use]
#[instrument(skip(g))]
pub fn reach_counts(g: &DependencyGraph) -> Vec<(NodeIndex, usize)> {
    let mut visited = vec![false; g.node_count()];
    let mut touched: Vec<usize> = Vec::new();
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    g.live_nodes()
        .map(|start| {
            for i in touched.drain(..) {
                visited[i] = false;
            }
            visited[start.index()] = true;
            touched.push(start.index());
            queue.push_back(start);

            let mut reached = 0usize;
            while let Some(current) = queue.pop_front() {
                for next in g.live_dependents(current) {
                    if !visited[next.index()] {
                        visited[next.index()] = true;
                        touched.push(next.index());
                        reached += 1;
                        queue.push_back(next);
                    }
                }
            }

            (start, reached)
        })
        .collect()
}

/// Top `top_n` keystones.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn keystones(g: &DependencyGraph, top_n: usize) -> Vec<MetricEntry> {
    let scores = reach_counts(g)
        .into_iter()
        .map(|(idx, count)| (idx, count as f64));
    top_entries(g, scores, top_n)
}
