//! Dependency-cycle detection over live issues.
//!
//! # Algorithm
//!
//! Tarjan's strongly-connected-components algorithm on the live `dependsOn`
//! subgraph (only edges between two live issues are followed). The DFS is
//! iterative with an explicit frame stack, so deep dependency chains cannot
//! overflow the call stack.
//!
//! Components are closed in the same order the recursive formulation would
//! close them; each component with two or more members becomes a
//! [`CycleRecord`] numbered from 1 in that order. The root loop walks live
//! nodes in input order and each node's dependencies are followed in the
//! order they were listed, so numbering is deterministic for a given input.

#![allow(clippy::module_name_repetitions)]

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::build::DependencyGraph;

/// One dependency cycle (a strongly connected component of size ≥ 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    /// 1-based, in component-closing order.
    pub cycle_id: usize,
    /// Member issue IDs, in the order they were popped off the Tarjan stack.
    pub member_ids: Vec<String>,
    pub length: usize,
}

/// Detect every dependency cycle among live issues.
#[must_use]
#[instrument(skip(g))]
pub fn detect_cycles(g: &DependencyGraph) -> Vec<CycleRecord> {
    let components = strongly_connected_components(g);

    let cycles: Vec<CycleRecord> = components
        .into_iter()
        .filter(|component| component.len() > 1)
        .enumerate()
        .map(|(i, component)| {
            let member_ids: Vec<String> = component
                .iter()
                .filter_map(|&idx| g.issue_id(idx))
                .map(str::to_string)
                .collect();
            CycleRecord {
                cycle_id: i + 1,
                length: member_ids.len(),
                member_ids,
            }
        })
        .collect();

    debug!(cycles = cycles.len(), "cycle detection finished");
    cycles
}

/// All strongly connected components of the live subgraph, singletons
/// included, in closing order.
#[must_use]
pub fn strongly_connected_components(g: &DependencyGraph) -> Vec<Vec<NodeIndex>> {
    let mut tarjan = Tarjan::new(g.node_count());
    let mut components = Vec::new();

    for root in g.live_nodes() {
        if tarjan.index[root.index()].is_some() {
            continue;
        }

        let mut call_stack: Vec<Frame> = vec![tarjan.enter(g, root)];

        while let Some(frame) = call_stack.last_mut() {
            let v = frame.node;

            if let Some(&w) = frame.neighbors.get(frame.pos) {
                frame.pos += 1;
                match tarjan.index[w.index()] {
                    None => {
                        let child = tarjan.enter(g, w);
                        call_stack.push(child);
                    }
                    Some(w_index) if tarjan.on_stack[w.index()] => {
                        let low = &mut tarjan.lowlink[v.index()];
                        *low = (*low).min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All neighbours of v explored: return to the caller.
            call_stack.pop();
            if let Some(parent) = call_stack.last() {
                let child_low = tarjan.lowlink[v.index()];
                let low = &mut tarjan.lowlink[parent.node.index()];
                *low = (*low).min(child_low);
            }

            if tarjan.is_root(v) {
                components.push(tarjan.pop_component(v));
            }
        }
    }

    components
}

/// A suspended DFS call: the node and how far through its neighbours we are.
struct Frame {
    node: NodeIndex,
    neighbors: Vec<NodeIndex>,
    pos: usize,
}

/// Per-call Tarjan bookkeeping, indexed by `NodeIndex::index()`.
struct Tarjan {
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<NodeIndex>,
    next_index: usize,
}

impl Tarjan {
    fn new(n: usize) -> Self {
        Self {
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
        }
    }

    /// Assign discovery index and lowlink, push onto the Tarjan stack.
    fn enter(&mut self, g: &DependencyGraph, v: NodeIndex) -> Frame {
        let i = v.index();
        self.index[i] = Some(self.next_index);
        self.lowlink[i] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[i] = true;

        // petgraph yields outgoing edges newest first; walk them as listed.
        let mut neighbors: Vec<NodeIndex> = g.live_dependencies(v).collect();
        neighbors.reverse();

        Frame {
            node: v,
            neighbors,
            pos: 0,
        }
    }

    fn is_root(&self, v: NodeIndex) -> bool {
        self.index[v.index()] == Some(self.lowlink[v.index()])
    }

    /// Pop the stack down to and including `v`.
    fn pop_component(&mut self, v: NodeIndex) -> Vec<NodeIndex> {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w.index()] = false;
            component.push(w);
            if w == v {
                break;
            }
        }
        component
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
