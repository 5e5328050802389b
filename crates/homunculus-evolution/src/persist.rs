//! Durable storage for the aggregate state
//!
//! Whole-document JSON, written to `<path>.tmp` then renamed over the target
//! so readers never see a torn file. Missing, corrupt or too-new documents
//! fall back to a fresh state; corrupt and too-new ones are moved aside first
//! so their history is not overwritten. Only an I/O failure while reading is
//! surfaced, since the file itself may be fine.

use crate::experience;
use crate::state::{EvolutionState, SCHEMA_VERSION};
use homunculus_core::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// How a load resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No document on disk.
    Fresh,
    /// Current-schema document read as-is.
    Hydrated,
    /// Pre-versioning document read and upgraded in memory.
    Migrated { from: u32 },
    /// Unparsable document, moved to `backup`.
    Corrupt { backup: Option<PathBuf> },
    /// Document from a newer build, moved to `backup`.
    TooNew { found: u64, backup: Option<PathBuf> },
}

/// Load state from `path`, falling back to a fresh state.
///
/// Errors only when the file exists but cannot be read.
pub fn load_or_create(path: &Path) -> Result<(EvolutionState, LoadOutcome)> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No evolution state at {}, starting fresh", path.display());
            return Ok((EvolutionState::default(), LoadOutcome::Fresh));
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return Err(Error::state_read(path, e.to_string()));
        }
    };

    match parse(&content) {
        Ok((state, outcome)) => {
            info!(
                "Hydrated evolution state from {}: generation {} level {} ({} xp)",
                path.display(),
                state.generation,
                state.level,
                state.experience_points
            );
            Ok((state, outcome))
        }
        Err(Error::SchemaTooNew { found, supported }) => {
            warn!(
                "{} has schema v{} but this build supports v{}, starting fresh",
                path.display(),
                found,
                supported
            );
            let backup = preserve(path, &format!("newer-v{}", found));
            Ok((EvolutionState::default(), LoadOutcome::TooNew { found, backup }))
        }
        Err(e) => {
            warn!("Failed to parse {}: {}, starting fresh", path.display(), e);
            let backup = preserve(path, "corrupt");
            Ok((EvolutionState::default(), LoadOutcome::Corrupt { backup }))
        }
    }
}

/// Parse a state document, upgrading pre-versioning documents.
pub fn parse(content: &str) -> Result<(EvolutionState, LoadOutcome)> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(Error::Internal("state document is not an object".into()));
    }

    let version = value.get("schema_version").and_then(|v| v.as_u64());
    let current = u64::from(SCHEMA_VERSION);

    let (state, outcome) = match version {
        Some(v) if v > current => {
            return Err(Error::SchemaTooNew {
                found: v,
                supported: SCHEMA_VERSION,
            })
        }
        Some(v) if v == current => {
            let state: EvolutionState = serde_json::from_value(value)?;
            (state, LoadOutcome::Hydrated)
        }
        older => {
            // Unversioned documents are v1: same field names, untyped growth.
            let from = older.and_then(|v| u32::try_from(v).ok()).unwrap_or(1);
            let mut state: EvolutionState = serde_json::from_value(value)?;
            info!("Upgrading evolution state from schema v{} to v{}", from, SCHEMA_VERSION);
            state.schema_version = SCHEMA_VERSION;
            (state, LoadOutcome::Migrated { from })
        }
    };

    check_progress(&state)?;
    Ok((state, outcome))
}

/// A level can lag its XP (it catches up on the next award) but never lead it.
fn check_progress(state: &EvolutionState) -> Result<()> {
    let earned = experience::level_for_xp(state.experience_points);
    if state.level > earned {
        return Err(Error::Internal(format!(
            "level {} is ahead of the {} reached with {} xp",
            state.level, earned, state.experience_points
        )));
    }
    Ok(())
}

/// Serialize `value` and atomically replace `path`.
pub fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| Error::persist(path, format!("mkdir: {}", e)))?;
    }

    let tmp = tmp_path(path);
    if let Err(e) = std::fs::write(&tmp, &json) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::persist(path, format!("write tmp: {}", e)));
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::persist(path, format!("rename: {}", e)));
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Move an unusable document aside as `<path>.<suffix>`.
fn preserve(path: &Path, suffix: &str) -> Option<PathBuf> {
    let mut name = path.file_name()?.to_os_string();
    name.push(".");
    name.push(suffix);
    let backup = path.with_file_name(name);
    match std::fs::rename(path, &backup) {
        Ok(()) => {
            warn!("Preserved unusable state as {}", backup.display());
            Some(backup)
        }
        Err(e) => {
            error!("Failed to preserve {}: {}", path.display(), e);
            None
        }
    }
}
