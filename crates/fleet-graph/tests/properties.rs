//! Property-based checks for the insights snapshot.
//!
//! Random issue sets (live and closed, blocking and hierarchy edges, some
//! dangling references) are generated and every result is checked against
//! structural invariants and against petgraph's own reference algorithms.

#![allow(clippy::cast_precision_loss)]

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};
use petgraph::algo::{has_path_connecting, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use proptest::prelude::*;

use fleet_graph::config::InsightsConfig;
use fleet_graph::insights::compute_insights_at;
use fleet_graph::{Dependency, DependencyKind, InsightsResult, Issue, IssueStatus, MetricEntry};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Link {
    from: usize,
    to: usize,
    kind: DependencyKind,
}

fn arb_kind() -> impl Strategy<Value = DependencyKind> {
    prop_oneof![
        6 => Just(DependencyKind::Blocks),
        1 => Just(DependencyKind::Related),
        1 => Just(DependencyKind::DiscoveredFrom),
        2 => Just(DependencyKind::ParentChild),
    ]
}

fn arb_status() -> impl Strategy<Value = IssueStatus> {
    prop_oneof![
        4 => Just(IssueStatus::Open),
        2 => Just(IssueStatus::InProgress),
        1 => Just(IssueStatus::Blocked),
        1 => Just(IssueStatus::Deferred),
        2 => Just(IssueStatus::Closed),
    ]
}

/// `(statuses, links)`; link endpoints may exceed the issue count, which
/// produces dangling references.
fn arb_snapshot() -> impl Strategy<Value = (Vec<IssueStatus>, Vec<Link>)> {
    (0usize..14).prop_flat_map(|n| {
        let statuses = prop::collection::vec(arb_status(), n);
        let link = (0..n.max(1) + 2, 0..n.max(1) + 2, arb_kind())
            .prop_map(|(from, to, kind)| Link { from, to, kind });
        let links = prop::collection::vec(link, 0..(n * 3 + 1));
        (statuses, links)
    })
}

fn id(i: usize) -> String {
    format!("bd-{i}")
}

fn issues_from(statuses: &[IssueStatus], links: &[Link]) -> Vec<Issue> {
    let mut issues: Vec<Issue> = statuses
        .iter()
        .enumerate()
        .map(|(i, &s)| Issue::new(id(i), format!("issue {i}"), s))
        .collect();
    for link in links {
        if let Some(issue) = issues.get_mut(link.from) {
            let dep = Dependency::new(issue.id.clone(), id(link.to), link.kind);
            issue.dependencies.push(dep);
        }
    }
    issues
}

fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-19T00:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn run(issues: &[Issue]) -> InsightsResult {
    compute_insights_at(issues, "prop", &InsightsConfig::default(), fixed_time())
}

fn ranked_lists(r: &InsightsResult) -> [(&'static str, &Vec<MetricEntry>); 5] {
    [
        ("bottlenecks", &r.bottlenecks),
        ("keystones", &r.keystones),
        ("influencers", &r.influencers),
        ("hubs", &r.hubs),
        ("authorities", &r.authorities),
    ]
}

/// Independent reference graph: live issues only, non-hierarchy edges
/// between two distinct live issues. Node `k` is the `k`-th live issue.
struct Reference {
    graph: DiGraph<String, ()>,
    live_ids: Vec<String>,
}

impl Reference {
    fn new(issues: &[Issue]) -> Self {
        let mut graph = DiGraph::new();
        let mut live_ids = Vec::new();
        let mut index_of = HashMap::new();
        for issue in issues.iter().filter(|i| i.is_live()) {
            let idx = graph.add_node(issue.id.clone());
            index_of.insert(issue.id.clone(), idx);
            live_ids.push(issue.id.clone());
        }
        let mut seen = HashSet::new();
        for issue in issues {
            for dep in &issue.dependencies {
                if dep.kind.is_hierarchy() {
                    continue;
                }
                let (Some(&a), Some(&b)) =
                    (index_of.get(&issue.id), index_of.get(&dep.depends_on_id))
                else {
                    continue;
                };
                if a != b && seen.insert((a, b)) {
                    graph.add_edge(a, b, ());
                }
            }
        }
        Self { graph, live_ids }
    }

    fn index(&self, issue_id: &str) -> NodeIndex {
        let pos = self
            .live_ids
            .iter()
            .position(|i| i == issue_id)
            .expect("live id");
        NodeIndex::new(pos)
    }
}

/// Recursive Tarjan over the live issues, following each issue's
/// dependencies in the order they were listed. Returns the member ids of
/// every component with two or more issues, in closing order.
fn listed_order_cycles(issues: &[Issue]) -> Vec<Vec<String>> {
    struct Walk<'a> {
        ids: Vec<&'a str>,
        adj: Vec<Vec<usize>>,
        index: Vec<Option<usize>>,
        low: Vec<usize>,
        on_stack: Vec<bool>,
        stack: Vec<usize>,
        next: usize,
        cycles: Vec<Vec<String>>,
    }

    fn visit(walk: &mut Walk<'_>, v: usize) {
        walk.index[v] = Some(walk.next);
        walk.low[v] = walk.next;
        walk.next += 1;
        walk.stack.push(v);
        walk.on_stack[v] = true;

        let mut k = 0;
        while let Some(&w) = walk.adj[v].get(k) {
            k += 1;
            match walk.index[w] {
                None => {
                    visit(walk, w);
                    walk.low[v] = walk.low[v].min(walk.low[w]);
                }
                Some(iw) if walk.on_stack[w] => walk.low[v] = walk.low[v].min(iw),
                Some(_) => {}
            }
        }

        if walk.index[v] == Some(walk.low[v]) {
            let mut members = Vec::new();
            while let Some(w) = walk.stack.pop() {
                walk.on_stack[w] = false;
                members.push(walk.ids[w].to_string());
                if w == v {
                    break;
                }
            }
            if members.len() > 1 {
                walk.cycles.push(members);
            }
        }
    }

    let live: Vec<&Issue> = issues.iter().filter(|i| i.is_live()).collect();
    let position: HashMap<&str, usize> = live
        .iter()
        .enumerate()
        .map(|(k, issue)| (issue.id.as_str(), k))
        .collect();
    let adj: Vec<Vec<usize>> = live
        .iter()
        .enumerate()
        .map(|(k, issue)| {
            issue
                .dependencies
                .iter()
                .filter(|dep| !dep.kind.is_hierarchy())
                .filter_map(|dep| position.get(dep.depends_on_id.as_str()).copied())
                .filter(|&w| w != k)
                .collect()
        })
        .collect();

    let n = live.len();
    let mut walk = Walk {
        ids: live.iter().map(|issue| issue.id.as_str()).collect(),
        adj,
        index: vec![None; n],
        low: vec![0; n],
        on_stack: vec![false; n],
        stack: Vec::new(),
        next: 0,
        cycles: Vec::new(),
    };
    for v in 0..n {
        if walk.index[v].is_none() {
            visit(&mut walk, v);
        }
    }
    walk.cycles
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn density_is_a_fraction((statuses, links) in arb_snapshot()) {
        let r = run(&issues_from(&statuses, &links));
        prop_assert!((0.0..=1.0).contains(&r.graph_density), "density {}", r.graph_density);
        prop_assert_eq!(r.total_issues, statuses.len());
    }

    #[test]
    fn ranked_lists_are_bounded_positive_and_sorted((statuses, links) in arb_snapshot()) {
        let issues = issues_from(&statuses, &links);
        let r = run(&issues);
        let live: HashSet<&str> = issues
            .iter()
            .filter(|i| i.is_live())
            .map(|i| i.id.as_str())
            .collect();

        for (name, list) in ranked_lists(&r) {
            prop_assert!(list.len() <= 10, "{} has {} entries", name, list.len());
            for entry in list {
                prop_assert!(entry.score > 0.0, "{}: {} scored {}", name, entry.id, entry.score);
                prop_assert!(live.contains(entry.id.as_str()), "{}: {} is not live", name, entry.id);
                let rounded = (entry.score * 1000.0).round() / 1000.0;
                prop_assert!((entry.score - rounded).abs() < 1e-12);
            }
            for pair in list.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score, "{} not sorted", name);
            }
            let unique: HashSet<&str> = list.iter().map(|e| e.id.as_str()).collect();
            prop_assert_eq!(unique.len(), list.len(), "{} repeats an id", name);
        }
    }

    #[test]
    fn betweenness_needs_three_live_issues((statuses, links) in arb_snapshot()) {
        let issues = issues_from(&statuses, &links);
        let live = issues.iter().filter(|i| i.is_live()).count();
        let r = run(&issues);
        if live < 3 {
            prop_assert!(r.bottlenecks.is_empty());
        }
        for entry in &r.bottlenecks {
            prop_assert!(entry.score <= 1.0, "normalized score {} > 1", entry.score);
        }
    }

    #[test]
    fn degree_lists_agree_with_reference((statuses, links) in arb_snapshot()) {
        let issues = issues_from(&statuses, &links);
        let r = run(&issues);
        let reference = Reference::new(&issues);
        let g = &reference.graph;

        for entry in &r.hubs {
            let idx = reference.index(&entry.id);
            let out = g.neighbors_directed(idx, petgraph::Direction::Outgoing).count();
            prop_assert!((entry.score - out as f64).abs() < 1e-12);
        }
        for entry in &r.authorities {
            let idx = reference.index(&entry.id);
            let inc = g.neighbors_directed(idx, petgraph::Direction::Incoming).count();
            prop_assert!((entry.score - inc as f64).abs() < 1e-12);
        }
        for entry in &r.influencers {
            let idx = reference.index(&entry.id);
            let total = g.neighbors_directed(idx, petgraph::Direction::Outgoing).count()
                + g.neighbors_directed(idx, petgraph::Direction::Incoming).count();
            prop_assert!((entry.score - total as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn keystone_counts_match_reachability((statuses, links) in arb_snapshot()) {
        let issues = issues_from(&statuses, &links);
        let r = run(&issues);
        let reference = Reference::new(&issues);
        let g = &reference.graph;

        for entry in &r.keystones {
            let target = reference.index(&entry.id);
            let reached = g
                .node_indices()
                .filter(|&n| n != target && has_path_connecting(g, n, target, None))
                .count();
            prop_assert!((entry.score - reached as f64).abs() < 1e-12,
                "{}: reported {} reachable {}", entry.id, entry.score, reached);
        }
    }

    #[test]
    fn cycles_match_reference_components((statuses, links) in arb_snapshot()) {
        let issues = issues_from(&statuses, &links);
        let r = run(&issues);
        let reference = Reference::new(&issues);
        let g = &reference.graph;

        let ids: Vec<usize> = r.cycles.iter().map(|c| c.cycle_id).collect();
        let expected_ids: Vec<usize> = (1..=r.cycles.len()).collect();
        prop_assert_eq!(ids, expected_ids);

        for cycle in &r.cycles {
            prop_assert!(cycle.length >= 2);
            prop_assert_eq!(cycle.length, cycle.member_ids.len());
            for a in &cycle.member_ids {
                for b in &cycle.member_ids {
                    let (ia, ib) = (reference.index(a), reference.index(b));
                    prop_assert!(has_path_connecting(g, ia, ib, None), "{} cannot reach {}", a, b);
                }
            }
        }

        let ours: BTreeSet<BTreeSet<String>> = r
            .cycles
            .iter()
            .map(|c| c.member_ids.iter().cloned().collect())
            .collect();
        let theirs: BTreeSet<BTreeSet<String>> = tarjan_scc(g)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| scc.into_iter().map(|n| g[n].clone()).collect())
            .collect();
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn cycle_numbering_follows_listed_order((statuses, links) in arb_snapshot()) {
        let issues = issues_from(&statuses, &links);
        let r = run(&issues);

        let got: Vec<(usize, Vec<String>)> = r
            .cycles
            .iter()
            .map(|c| (c.cycle_id, c.member_ids.clone()))
            .collect();
        let expected: Vec<(usize, Vec<String>)> = listed_order_cycles(&issues)
            .into_iter()
            .enumerate()
            .map(|(i, members)| (i + 1, members))
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn hierarchy_edges_are_invisible((statuses, links) in arb_snapshot()) {
        let with = issues_from(&statuses, &links);
        let without_links: Vec<Link> = links
            .iter()
            .filter(|l| !l.kind.is_hierarchy())
            .cloned()
            .collect();
        let without = issues_from(&statuses, &without_links);
        prop_assert_eq!(run(&with), run(&without));
    }

    #[test]
    fn dangling_references_are_invisible((statuses, links) in arb_snapshot()) {
        let n = statuses.len();
        let with = issues_from(&statuses, &links);
        let resolved: Vec<Link> = links.iter().filter(|l| l.to < n).cloned().collect();
        let without = issues_from(&statuses, &resolved);
        prop_assert_eq!(run(&with), run(&without));
    }

    #[test]
    fn computation_is_deterministic((statuses, links) in arb_snapshot()) {
        let issues = issues_from(&statuses, &links);
        prop_assert_eq!(run(&issues), run(&issues));
    }
}
