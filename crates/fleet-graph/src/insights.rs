//! Insights aggregation: one call, one immutable snapshot.
//!
//! # Overview
//!
//! [`compute_insights`] builds the [`DependencyGraph`] once and runs each
//! metric against it independently. No metric reads another metric's
//! output, so every list can be validated on its own.
//!
//! ```text
//! &[Issue] ──build──▶ DependencyGraph ──┬─ graph_density
//!                                        ├─ bottlenecks   (betweenness)
//!                                        ├─ keystones     (transitive reach)
//!                                        ├─ influencers / hubs / authorities
//!                                        └─ cycles        (Tarjan SCC)
//!                                                 ↓
//!                                          InsightsResult
//! ```
//!
//! All state lives on the stack of the call; concurrent callers share
//! nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::InsightsConfig;
use crate::graph::build::DependencyGraph;
use crate::graph::cycles::{CycleRecord, detect_cycles};
use crate::metrics::betweenness::bottlenecks;
use crate::metrics::degree::{authorities, hubs, influencers};
use crate::metrics::density::graph_density;
use crate::metrics::keystone::keystones;
use crate::metrics::rank::MetricEntry;
use crate::model::Issue;

/// Graph insights for one issue snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsResult {
    /// When the snapshot was computed (RFC 3339, UTC).
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied label, copied verbatim.
    pub source: String,
    /// Every issue supplied, closed ones included.
    pub total_issues: usize,
    /// Live-subgraph density in `[0, 1]`.
    pub graph_density: f64,
    pub bottlenecks: Vec<MetricEntry>,
    pub keystones: Vec<MetricEntry>,
    pub influencers: Vec<MetricEntry>,
    pub hubs: Vec<MetricEntry>,
    pub authorities: Vec<MetricEntry>,
    pub cycles: Vec<CycleRecord>,
}

impl InsightsResult {
    /// A snapshot with no issues, stamped now.
    #[must_use]
    pub fn empty(source: impl Into<String>) -> Self {
        Self::empty_at(source, Utc::now())
    }

    #[must_use]
    pub fn empty_at(source: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            source: source.into(),
            total_issues: 0,
            graph_density: 0.0,
            bottlenecks: Vec::new(),
            keystones: Vec::new(),
            influencers: Vec::new(),
            hubs: Vec::new(),
            authorities: Vec::new(),
            cycles: Vec::new(),
        }
    }
}

/// Compute insights with the default list cap of ten.
#[must_use]
pub fn compute_insights(issues: &[Issue], source: impl Into<String>) -> InsightsResult {
    compute_insights_with(issues, source, &InsightsConfig::default())
}

/// Compute insights using `config`.
#[must_use]
pub fn compute_insights_with(
    issues: &[Issue],
    source: impl Into<String>,
    config: &InsightsConfig,
) -> InsightsResult {
    compute_insights_at(issues, source, config, Utc::now())
}

/// Compute insights with an explicit timestamp.
#[must_use]
#[instrument(skip(issues, source, config), fields(issue_count = issues.len()))]
pub fn compute_insights_at(
    issues: &[Issue],
    source: impl Into<String>,
    config: &InsightsConfig,
    timestamp: DateTime<Utc>,
) -> InsightsResult {
    let g = DependencyGraph::build(issues);
    let top_n = config.effective_top_n();

    let result = InsightsResult {
        timestamp,
        source: source.into(),
        total_issues: issues.len(),
        graph_density: graph_density(&g),
        bottlenecks: bottlenecks(&g, top_n),
        keystones: keystones(&g, top_n),
        influencers: influencers(&g, top_n),
        hubs: hubs(&g, top_n),
        authorities: authorities(&g, top_n),
        cycles: detect_cycles(&g),
    };

    debug!(
        live = g.live_count(),
        edges = g.edge_count(),
        density = result.graph_density,
        cycles = result.cycles.len(),
        "insights computed"
    );

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
