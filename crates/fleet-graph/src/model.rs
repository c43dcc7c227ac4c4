//! Issue records as read from a beads `issues.jsonl` file.
//!
//! Only the fields the graph engine needs are modelled. Everything else on
//! the wire (priority, assignee, timestamps, …) is ignored on deserialize.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an issue.
///
/// Exactly one value, [`IssueStatus::Closed`], means "closed". Every other
/// value is live, including statuses this crate does not know about yet
/// (they deserialize to [`IssueStatus::Other`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Blocked,
    Deferred,
    Closed,
    #[serde(other)]
    Other,
}

impl IssueStatus {
    /// `true` only for [`IssueStatus::Closed`].
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Deferred => "deferred",
            Self::Closed => "closed",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of link between two issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// Hard blocker.
    #[default]
    Blocks,
    /// Soft, informational link.
    Related,
    /// Found while working on another issue.
    DiscoveredFrom,
    /// Epic → child hierarchy. Never part of the dependency graph.
    ParentChild,
    #[serde(other)]
    Other,
}

impl DependencyKind {
    /// Hierarchy edges describe structure, not blocking, and are dropped
    /// by the graph builder.
    #[must_use]
    pub const fn is_hierarchy(self) -> bool {
        matches!(self, Self::ParentChild)
    }
}

/// A directed edge: `issue_id` depends on (is blocked by) `depends_on_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// The dependent issue. Empty means "the issue carrying this edge".
    #[serde(default)]
    pub issue_id: String,
    /// The issue that must be resolved first.
    pub depends_on_id: String,
    #[serde(rename = "type", default)]
    pub kind: DependencyKind,
}

impl Dependency {
    /// Convenience constructor for a `blocks` edge.
    #[must_use]
    pub fn blocks(issue_id: impl Into<String>, depends_on_id: impl Into<String>) -> Self {
        Self::new(issue_id, depends_on_id, DependencyKind::Blocks)
    }

    #[must_use]
    pub fn new(
        issue_id: impl Into<String>,
        depends_on_id: impl Into<String>,
        kind: DependencyKind,
    ) -> Self {
        Self {
            issue_id: issue_id.into(),
            depends_on_id: depends_on_id.into(),
            kind,
        }
    }
}

/// A work item owned by the external issue store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub status: IssueStatus,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Issue {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: IssueStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status,
            dependencies: Vec::new(),
        }
    }

    /// Builder-style helper: add a dependency of `kind` on `depends_on_id`.
    #[must_use]
    pub fn with_dependency(mut self, depends_on_id: impl Into<String>, kind: DependencyKind) -> Self {
        let dep = Dependency::new(self.id.clone(), depends_on_id, kind);
        self.dependencies.push(dep);
        self
    }

    /// Builder-style helper: this issue is blocked by `depends_on_id`.
    #[must_use]
    pub fn depends_on(self, depends_on_id: impl Into<String>) -> Self {
        self.with_dependency(depends_on_id, DependencyKind::Blocks)
    }

    /// `true` when the status is anything other than closed.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !self.status.is_closed()
    }

    /// The edge's source id, filling in this issue's id for edges that
    /// omit `issue_id`.
    #[must_use]
    pub fn dependent_id<'a>(&'a self, dep: &'a Dependency) -> &'a str {
        if dep.issue_id.is_empty() {
            &self.id
        } else {
            &dep.issue_id
        }
    }
}
