//! Dependency graph module for insights computation.
//!
//! # Overview
//!
//! This module turns a flat issue list into a petgraph-based directed
//! dependency graph and finds dependency cycles in it. The graph feeds every
//! metric in [`crate::metrics`].
//!
//! ## Pipeline
//!
//! ```text
//! &[Issue] (each carrying its own dependency edges)
//!        ↓  build::DependencyGraph::build()
//! DependencyGraph (DiGraph, edge A → B = "A depends on B", closed issues flagged)
//!        ├─ cycles::detect_cycles()      → Vec<CycleRecord>
//!        └─ crate::metrics::*            → ranked MetricEntry lists, density
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use fleet_graph::graph::{DependencyGraph, detect_cycles};
//! use fleet_graph::model::{Issue, IssueStatus};
//!
//! let issues = vec![
//!     Issue::new("bd-1", "Schema", IssueStatus::Open).depends_on("bd-2"),
//!     Issue::new("bd-2", "Migrations", IssueStatus::Open).depends_on("bd-1"),
//! ];
//! let g = DependencyGraph::build(&issues);
//! let cycles = detect_cycles(&g);
//! assert_eq!(cycles.len(), 1);
//! assert_eq!(cycles[0].length, 2);
//! ```

pub mod build;
pub mod cycles;

// Re-export primary types at module level for convenience.
pub use build::{BuildReport, DependencyGraph, IssueNode};
pub use cycles::{CycleRecord, detect_cycles, strongly_connected_components};
