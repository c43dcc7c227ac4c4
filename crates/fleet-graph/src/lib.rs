#![forbid(unsafe_code)]
//! fleet-graph library.
//!
//! Exact, deterministic dependency-graph insights for a beads issue
//! snapshot: bottlenecks (betweenness), keystones (transitive unblock
//! count), hubs / authorities / influencers (live degree), dependency
//! cycles (Tarjan SCC), and graph density.
//!
//! # Conventions
//!
//! - **Errors**: The engine is total and returns plain values. I/O surfaces
//!   ([`loader`], [`config`]) use `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! # Example
//!
//! ```rust
//! use fleet_graph::{Issue, IssueStatus, compute_insights};
//!
//! let issues = vec![
//!     Issue::new("bd-1", "Design schema", IssueStatus::Open),
//!     Issue::new("bd-2", "Build API", IssueStatus::Open).depends_on("bd-1"),
//!     Issue::new("bd-3", "Build UI", IssueStatus::Open).depends_on("bd-2"),
//! ];
//!
//! let insights = compute_insights(&issues, "demo");
//! assert_eq!(insights.total_issues, 3);
//! assert_eq!(insights.keystones[0].id, "bd-1");
//! assert_eq!(insights.bottlenecks[0].id, "bd-2");
//! assert!(insights.cycles.is_empty());
//! ```

pub mod config;
pub mod graph;
pub mod insights;
pub mod loader;
pub mod metrics;
pub mod model;

pub use graph::{CycleRecord, DependencyGraph};
pub use insights::{InsightsResult, compute_insights, compute_insights_with};
pub use metrics::MetricEntry;
pub use model::{Dependency, DependencyKind, Issue, IssueStatus};
