//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often an issue lies on shortest paths
//! between other pairs of issues. High-betweenness issues are bottlenecks:
//! work on either side of them is funnelled through them.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs, run on the **undirected projection**
//! of the live subgraph. Every directed edge between two live issues becomes
//! one undirected edge (`A → B` and `B → A` collapse to a single edge).
//!
//! 1. For each source `s`, BFS to compute distances and shortest-path
//!    counts (`sigma`).
//! 2. Accumulate dependency scores (`delta`) in reverse BFS order, adding
//!    `delta[w]` to every non-source `w`.
//! 3. Divide every total by `(n-1)(n-2)`, `n` = live issue count.
//!
//! Each unordered pair is visited from both ends, so path-graph middle nodes
//! normalize to `1.0`.
//!
//! Complexity: O(V * E).
//!
//! With fewer than three live issues no node can sit between two others;
//! the metric is undefined and the bottleneck list is empty.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use tracing::{debug, instrument};

use crate::graph::build::DependencyGraph;
use crate::metrics::rank::{MetricEntry, top_entries};

/// Normalized betweenness for every live issue, in live-node order.
///
/// Returns `None` when there are fewer than three live issues.
#[must_use]
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_scores(g: &DependencyGraph) -> Option<Vec<(NodeIndex, f64)>> {
    let nodes: Vec<NodeIndex> = g.live_nodes().collect();
    let n = nodes.len();
    if n < 3 {
        return None;
    }

    let adj = undirected_adjacency(g, &nodes);

    // Node-indexed betweenness accumulator (compact live indices).
    let mut cb: Vec<f64> = vec![0.0; n];

    // Scratch buffers reused across sources.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        queue.clear();
        for i in 0..n {
            predecessors[i].clear();
            sigma[i] = 0.0;
            dist[i] = -1;
            delta[i] = 0.0;
        }

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &w in &adj[v] {
                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    let norm = ((n - 1) * (n - 2)) as f64;
    debug!(live = n, "betweenness computed");

    Some(
        nodes
            .into_iter()
            .zip(cb)
            .map(|(idx, score)| (idx, score / norm))
            .collect(),
    )
}

/// Top `top_n` bottlenecks by betweenness. Empty when fewer than three
/// issues are live.
#[must_use]
pub fn bottlenecks(g: &DependencyGraph, top_n: usize) -> Vec<MetricEntry> {
    betweenness_scores(g).map_or_else(Vec::new, |scores| top_entries(g, scores, top_n))
}

/// Neighbour lists over compact positions `0..nodes.len()`.
///
/// Each undirected edge appears once per endpoint.
fn undirected_adjacency(g: &DependencyGraph, nodes: &[NodeIndex]) -> Vec<Vec<usize>> {
    let mut position: Vec<Option<usize>> = vec![None; g.node_count()];
    for (pos, idx) in nodes.iter().enumerate() {
        position[idx.index()] = Some(pos);
    }

    nodes
        .iter()
        .map(|&v| {
            let mut neighbors: Vec<usize> = g
                .live_dependencies(v)
                .chain(g.live_dependents(v))
                .filter_map(|w| position[w.index()])
                .collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            neighbors
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
