//! Degree centrality: hubs, authorities, and influencers.
//!
//! All degrees count live neighbours only. An edge touching a closed issue
//! contributes nothing, since a closed issue can no longer block anything.
//!
//! - **Hub** score: out-degree, the number of live issues this one depends on.
//! - **Authority** score: in-degree, the number of live issues depending on it.
//! - **Influencer** score: hub + authority.

use petgraph::graph::NodeIndex;

use crate::graph::build::DependencyGraph;
use crate::metrics::rank::{MetricEntry, top_entries};

/// Live in/out degree of one issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeScore {
    pub node: NodeIndex,
    /// Live `dependsOn` count.
    pub out_degree: usize,
    /// Live `blockedBy` count.
    pub in_degree: usize,
}

impl DegreeScore {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.out_degree + self.in_degree
    }
}

/// Live degrees for every live issue, in live-node order.
#[must_use]
pub fn degree_scores(g: &DependencyGraph) -> Vec<DegreeScore> {
    g.live_nodes()
        .map(|node| DegreeScore {
            node,
            out_degree: g.live_dependencies(node).count(),
            in_degree: g.live_dependents(node).count(),
        })
        .collect()
}

/// Issues that depend on the most live work.
#[must_use]
pub fn hubs(g: &DependencyGraph, top_n: usize) -> Vec<MetricEntry> {
    ranked(g, top_n, |d| d.out_degree)
}

/// Issues the most live work depends on.
#[must_use]
pub fn authorities(g: &DependencyGraph, top_n: usize) -> Vec<MetricEntry> {
    ranked(g, top_n, |d| d.in_degree)
}

/// Issues with the most live connections in either direction.
#[must_use]
pub fn influencers(g: &DependencyGraph, top_n: usize) -> Vec<MetricEntry> {
    ranked(g, top_n, DegreeScore::total)
}

#[allow(clippy::cast_precision_loss)]
fn ranked(
    g: &DependencyGraph,
    top_n: usize,
    pick: impl Fn(&DegreeScore) -> usize,
) -> Vec<MetricEntry> {
    let scores = degree_scores(g)
        .iter()
        .map(|d| (d.node, pick(d) as f64))
        .collect::<Vec<_>>();
    top_entries(g, scores, top_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Issue, IssueStatus};

    fn score_of(entries: &[MetricEntry], id: &str) -> Option<f64> {
        entries.iter().find(|e| e.id == id).map(|e| e.score)
    }

    fn fan_in() -> DependencyGraph {
        // w1..w3 depend on core; w1 also depends on util.
        DependencyGraph::build(&[
            Issue::new("core", "Core", IssueStatus::Open),
            Issue::new("util", "Util", IssueStatus::InProgress),
            Issue::new("w1", "W1", IssueStatus::Open)
                .depends_on("core")
                .depends_on("util"),
            Issue::new("w2", "W2", IssueStatus::Open).depends_on("core"),
            Issue::new("w3", "W3", IssueStatus::Blocked).depends_on("core"),
        ])
    }

    #[test]
    fn hubs_count_out_degree() {
        let g = fan_in();
        let h = hubs(&g, 10);
        assert_eq!(h[0].id, "w1");
        assert_eq!(score_of(&h, "w1"), Some(2.0));
        assert_eq!(score_of(&h, "w2"), Some(1.0));
        assert_eq!(score_of(&h, "core"), None, "zero out-degree excluded");
    }

    #[test]
    fn authorities_count_in_degree() {
        let g = fan_in();
        let a = authorities(&g, 10);
        assert_eq!(a[0].id, "core");
        assert!((a[0].score - 3.0).abs() < 1e-12);
        assert_eq!(score_of(&a, "util"), Some(1.0));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn influencers_sum_both_directions() {
        let g = fan_in();
        let inf = influencers(&g, 10);
        assert_eq!(score_of(&inf, "core"), Some(3.0));
        assert_eq!(score_of(&inf, "w1"), Some(2.0));
        assert_eq!(score_of(&inf, "util"), Some(1.0));
        assert_eq!(score_of(&inf, "w3"), Some(1.0));
    }

    #[test]
    fn closed_neighbours_are_ignored() {
        let g = DependencyGraph::build(&[
            Issue::new("C", "closed", IssueStatus::Closed),
            Issue::new("D", "live", IssueStatus::Open).depends_on("C"),
        ]);
        assert!(hubs(&g, 10).is_empty());
        assert!(authorities(&g, 10).is_empty());
        assert!(influencers(&g, 10).is_empty());

        let scores = degree_scores(&g);
        assert_eq!(scores.len(), 1, "closed issues are not scored");
        assert_eq!(scores[0].total(), 0);
    }
}
