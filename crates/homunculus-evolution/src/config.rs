//! Evolution engine configuration
//!
//! Storage locations, retention limits and the two policy switches that
//! control when derived values are recomputed. Loaded from TOML at startup,
//! falls back to defaults if no config file exists.

use homunculus_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hard ceilings on the bounded collections. Config can only lower them.
pub const MAX_SUCCESS_PATTERNS: usize = 50;
pub const MAX_FAILURE_PATTERNS: usize = 30;
pub const MAX_TIMELINE_EVENTS: usize = 500;

/// Top-level evolution configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Where the aggregate state and the exported projection live.
    pub storage: StorageConfig,
    /// Caps on bounded collections and prompt summaries.
    pub limits: LimitsConfig,
    /// Policy switches for score recomputation and generation cascading.
    pub evolution: PolicyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Aggregate state document. Relative paths resolve against the workspace.
    pub state_path: PathBuf,
    /// Read-only projection for external viewers. Relative to the workspace.
    pub export_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max success pattern tags kept (oldest evicted). At most [`MAX_SUCCESS_PATTERNS`].
    pub success_patterns: usize,
    /// Max failure pattern tags kept (oldest evicted). At most [`MAX_FAILURE_PATTERNS`].
    pub failure_patterns: usize,
    /// Max timeline events kept in the state document. At most [`MAX_TIMELINE_EVENTS`].
    pub timeline_events: usize,
    /// Timeline events included in the exported projection.
    pub exported_timeline_events: usize,

    /// Mastered skills named in the proposer context.
    pub proposer_recent_skills: usize,
    /// Success patterns named in the proposer context.
    pub proposer_recent_patterns: usize,
    /// Failure patterns named in the proposer context.
    pub proposer_recent_failures: usize,

    /// Learned commands scanned for the evaluator reliability breakdown.
    pub evaluator_scanned_commands: usize,
    /// Attempts a command needs before it counts as reliable or problematic.
    pub evaluator_min_attempts: u64,
}

/// When the evolution score is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Only on level-up. Mastery and generation changes show up at the next level.
    #[default]
    OnLevelUp,
    /// After every mutating operation.
    EveryMutation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub score_policy: ScorePolicy,
    /// Re-check generation guards after an advance until none passes.
    /// Off: at most one generation per check.
    pub cascade_generations: bool,
}

// ============================================================
// Defaults
// ============================================================

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("evolution.json"),
            export_path: PathBuf::from("evolution_timeline.json"),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            success_patterns: MAX_SUCCESS_PATTERNS,
            failure_patterns: MAX_FAILURE_PATTERNS,
            timeline_events: MAX_TIMELINE_EVENTS,
            exported_timeline_events: 100,
            proposer_recent_skills: 5,
            proposer_recent_patterns: 5,
            proposer_recent_failures: 3,
            evaluator_scanned_commands: 20,
            evaluator_min_attempts: 3,
        }
    }
}

impl LimitsConfig {
    pub fn success_cap(&self) -> usize {
        self.success_patterns.min(MAX_SUCCESS_PATTERNS)
    }

    pub fn failure_cap(&self) -> usize {
        self.failure_patterns.min(MAX_FAILURE_PATTERNS)
    }

    pub fn timeline_cap(&self) -> usize {
        self.timeline_events.min(MAX_TIMELINE_EVENTS)
    }
}

// ============================================================
// Loading
// ============================================================

impl EvolutionConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Absolute state path for a workspace.
    pub fn state_path(&self, workspace: &Path) -> PathBuf {
        resolve(workspace, &self.storage.state_path)
    }

    /// Absolute projection path for a workspace.
    pub fn export_path(&self, workspace: &Path) -> PathBuf {
        resolve(workspace, &self.storage.export_path)
    }
}

fn resolve(workspace: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.join(path)
    }
}
