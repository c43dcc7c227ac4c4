//! Project configuration read from `.beads/fleet.toml`.
//!
//! Every key is optional. A missing file, or a file that only sets some
//! keys, falls back to the defaults for the rest.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::metrics::rank::TOP_N;

/// Project config location, relative to the project root.
pub const CONFIG_FILE: &str = ".beads/fleet.toml";

/// Default issue snapshot, relative to the project root.
pub const DEFAULT_ISSUES_FILE: &str = ".beads/issues.jsonl";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

impl FleetConfig {
    /// Absolute (or root-relative) path of the issues file.
    #[must_use]
    pub fn issues_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.source.issues_file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Cap on every ranked list. `0` means "use the default".
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl InsightsConfig {
    #[must_use]
    pub const fn effective_top_n(&self) -> usize {
        if self.top_n == 0 { TOP_N } else { self.top_n }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_issues_file")]
    pub issues_file: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            issues_file: default_issues_file(),
        }
    }
}

/// Load `.beads/fleet.toml` under `project_root`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(project_root: &Path) -> Result<FleetConfig> {
    let path = project_root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(FleetConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<FleetConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_top_n() -> usize {
    TOP_N
}

fn default_issues_file() -> PathBuf {
    PathBuf::from(DEFAULT_ISSUES_FILE)
}
