//! Graph construction from a flat issue list.
//!
//! # Overview
//!
//! [`DependencyGraph::build`] turns the issues handed over by the issue
//! store into a [`petgraph`] directed graph that every metric in this crate
//! reads. The graph is rebuilt per call and never persisted.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A **depends on** B" (B blocks A). With that
//! orientation:
//!
//! - outgoing neighbours of `A` are its `dependsOn` set,
//! - incoming neighbours of `B` are its `blockedBy` set.
//!
//! Both views read the same edge list, so `blockedBy` is the exact inverse
//! of `dependsOn` without a second pass.
//!
//! ## Dropped Edges
//!
//! - `parent-child` edges (hierarchy, not blocking).
//! - Edges whose endpoints are not both in the issue list.
//! - Self-dependencies (an issue naming itself).
//! - Repeats of an edge already present.
//!
//! None of these is an error; they are counted and logged at `debug`.
//!
//! ## Node Order
//!
//! Node indices follow input order. Every "iterate the live nodes" loop in
//! the metrics walks nodes in index order, so results (and tie order) are
//! stable for a fixed input.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};
use tracing::{debug, instrument};

use crate::model::{Dependency, Issue};

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// Node payload: the parts of an issue the metrics need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueNode {
    pub id: String,
    pub title: String,
    /// `false` when the issue is closed.
    pub live: bool,
}

/// Directed dependency graph over one snapshot of issues.
///
/// Nodes are issues (closed ones included, flagged via
/// [`IssueNode::live`]); an edge `A → B` means "A depends on B".
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Directed graph: nodes = issues, edges = depends-on relationships.
    pub graph: DiGraph<IssueNode, ()>,
    /// Mapping from issue ID to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    live_count: usize,
}

/// Counters describing what the builder discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub hierarchy_edges: usize,
    pub dangling_edges: usize,
    pub self_edges: usize,
    pub duplicate_edges: usize,
}

impl DependencyGraph {
    /// Build a graph from issues that carry their own dependency edges.
    ///
    /// An edge that leaves `issue_id` empty is attributed to the issue that
    /// carries it.
    #[must_use]
    #[instrument(skip(issues), fields(issue_count = issues.len()))]
    pub fn build(issues: &[Issue]) -> Self {
        let edges = issues.iter().flat_map(|issue| {
            issue
                .dependencies
                .iter()
                .map(move |dep| (issue.dependent_id(dep), dep))
        });
        Self::assemble(issues, edges).0
    }

    /// Build a graph from issues plus a separately supplied edge list.
    ///
    /// Any `dependencies` carried on the issues themselves are ignored.
    #[must_use]
    pub fn from_edges(issues: &[Issue], edges: &[Dependency]) -> Self {
        Self::from_edges_with_report(issues, edges).0
    }

    /// Like [`DependencyGraph::from_edges`], also returning what was dropped.
    #[must_use]
    pub fn from_edges_with_report(issues: &[Issue], edges: &[Dependency]) -> (Self, BuildReport) {
        Self::assemble(
            issues,
            edges.iter().map(|dep| (dep.issue_id.as_str(), dep)),
        )
    }

    fn assemble<'a>(
        issues: &[Issue],
        edges: impl Iterator<Item = (&'a str, &'a Dependency)>,
    ) -> (Self, BuildReport) {
        let mut graph = DiGraph::<IssueNode, ()>::with_capacity(issues.len(), issues.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(issues.len());
        let mut live_count = 0;

        // Step 1: every issue becomes a node. Duplicate ids are a caller
        // error; the first occurrence owns the node.
        for issue in issues {
            if node_map.contains_key(&issue.id) {
                continue;
            }
            let live = issue.is_live();
            if live {
                live_count += 1;
            }
            let idx = graph.add_node(IssueNode {
                id: issue.id.clone(),
                title: issue.title.clone(),
                live,
            });
            node_map.insert(issue.id.clone(), idx);
        }

        // Step 2: keep only non-hierarchy edges between known issues.
        let mut report = BuildReport::default();
        for (from, dep) in edges {
            if dep.kind.is_hierarchy() {
                report.hierarchy_edges += 1;
                continue;
            }
            let (Some(&a), Some(&b)) = (node_map.get(from), node_map.get(&dep.depends_on_id)) else {
                report.dangling_edges += 1;
                continue;
            };
            if a == b {
                report.self_edges += 1;
                continue;
            }
            // Avoid duplicate edges (petgraph allows them by default).
            if graph.contains_edge(a, b) {
                report.duplicate_edges += 1;
                continue;
            }
            graph.add_edge(a, b, ());
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            live = live_count,
            hierarchy_dropped = report.hierarchy_edges,
            dangling_dropped = report.dangling_edges,
            self_dropped = report.self_edges,
            duplicates_dropped = report.duplicate_edges,
            "dependency graph built"
        );

        (
            Self {
                graph,
                node_map,
                live_count,
            },
            report,
        )
    }

    /// Return the number of nodes (issues, closed included).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of valid dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of live (non-closed) issues.
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.live_count
    }

    /// Number of edges whose endpoints are both live.
    #[must_use]
    pub fn live_edge_count(&self) -> usize {
        self.graph
            .raw_edges()
            .iter()
            .filter(|e| self.is_live(e.source()) && self.is_live(e.target()))
            .count()
    }

    /// Look up the `NodeIndex` for an issue ID.
    #[must_use]
    pub fn node_index(&self, issue_id: &str) -> Option<NodeIndex> {
        self.node_map.get(issue_id).copied()
    }

    /// Return the issue ID label for a node.
    #[must_use]
    pub fn issue_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|n| n.id.as_str())
    }

    /// Return the issue title for a node.
    #[must_use]
    pub fn title(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|n| n.title.as_str())
    }

    #[must_use]
    pub fn is_live(&self, idx: NodeIndex) -> bool {
        self.graph.node_weight(idx).is_some_and(|n| n.live)
    }

    /// Live node indices in input order.
    pub fn live_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices().filter(|&idx| self.is_live(idx))
    }

    /// Live issues `idx` depends on (its live `dependsOn` set).
    pub fn live_dependencies(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter(|&n| self.is_live(n))
    }

    /// Live issues that depend on `idx` (its live `blockedBy` set).
    pub fn live_dependents(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .filter(|&n| self.is_live(n))
    }

    /// IDs this issue depends on, sorted. Closed targets included.
    #[must_use]
    pub fn depends_on(&self, issue_id: &str) -> Vec<&str> {
        self.neighbor_ids(issue_id, Direction::Outgoing)
    }

    /// IDs of issues that depend on this one, sorted. Closed sources included.
    #[must_use]
    pub fn blocked_by(&self, issue_id: &str) -> Vec<&str> {
        self.neighbor_ids(issue_id, Direction::Incoming)
    }

    fn neighbor_ids(&self, issue_id: &str, dir: Direction) -> Vec<&str> {
        let Some(idx) = self.node_index(issue_id) else {
            return Vec::new();
        };
        let mut ids: Vec<&str> = self
            .graph
            .neighbors_directed(idx, dir)
            .filter_map(|n| self.issue_id(n))
            .collect();
        ids.sort_unstable();
        ids
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
