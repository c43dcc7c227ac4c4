//! Structural metrics over the live dependency graph.
//!
//! # Overview
//!
//! Each metric answers a different question about issue importance:
//!
//! - **Betweenness centrality** (`betweenness`): Which issues are bottlenecks
//!   that shortest dependency paths funnel through?
//! - **Keystones** (`keystone`): Which issues unblock the most downstream
//!   work, transitively, once resolved?
//! - **Degree** (`degree`): Which issues depend on many things (hubs), are
//!   depended on by many things (authorities), or both (influencers)?
//! - **Density** (`density`): How tangled is the live graph overall?
//!
//! Only live issues are scored and only edges between two live issues are
//! followed. Ranked lists share one selection rule, see [`rank::top_entries`].
//!
//! # Usage
//!
//! ```rust
//! use fleet_graph::graph::DependencyGraph;
//! use fleet_graph::metrics::{betweenness::bottlenecks, degree::authorities, rank::TOP_N};
//! use fleet_graph::model::{Issue, IssueStatus};
//!
//! let issues = vec![
//!     Issue::new("api", "API", IssueStatus::Open),
//!     Issue::new("ui", "UI", IssueStatus::Open).depends_on("api"),
//!     Issue::new("cli", "CLI", IssueStatus::Open).depends_on("api"),
//! ];
//! let g = DependencyGraph::build(&issues);
//!
//! assert_eq!(authorities(&g, TOP_N)[0].id, "api");
//! assert_eq!(bottlenecks(&g, TOP_N)[0].id, "api");
//! ```

pub mod betweenness;
pub mod degree;
pub mod density;
pub mod keystone;
pub mod rank;

pub use rank::{MetricEntry, TOP_N};
