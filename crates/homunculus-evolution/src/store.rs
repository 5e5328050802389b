//! EvolutionStore: owns the aggregate state and keeps it durable
//!
//! Every mutating call persists the whole state and then exports the
//! read-only projection, both via atomic replace. Constructed explicitly and
//! passed to whoever needs it; there is no process-wide instance.

use crate::config::EvolutionConfig;
use crate::context;
use crate::persist::{self, LoadOutcome};
use crate::projection::EvolutionProjection;
use crate::state::{EvolutionState, OutcomeReport, ProposalReport};
use homunculus_core::{CommandOutcome, Persona, Proposal, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub struct EvolutionStore {
    state: EvolutionState,
    config: EvolutionConfig,
    state_path: PathBuf,
    export_path: PathBuf,
    load_outcome: LoadOutcome,
}

impl EvolutionStore {
    /// Open the store for a workspace, loading or creating its state.
    ///
    /// Fails only if an existing state file cannot be read.
    pub fn open(workspace: &Path, config: EvolutionConfig) -> Result<Self> {
        let state_path = config.state_path(workspace);
        let export_path = config.export_path(workspace);
        let (state, load_outcome) = persist::load_or_create(&state_path)?;
        Ok(Self {
            state,
            config,
            state_path,
            export_path,
            load_outcome,
        })
    }

    /// Wrap an existing state. Nothing is read from disk.
    pub fn with_state(state: EvolutionState, workspace: &Path, config: EvolutionConfig) -> Self {
        Self {
            state_path: config.state_path(workspace),
            export_path: config.export_path(workspace),
            state,
            config,
            load_outcome: LoadOutcome::Fresh,
        }
    }

    pub fn state(&self) -> &EvolutionState {
        &self.state
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// How the state was obtained when the store was opened.
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Record a persona proposal and persist.
    pub fn record_proposal(&mut self, text: &str, kind: &str) -> Result<ProposalReport> {
        let report = self
            .state
            .record_proposal(&Proposal::new(text, kind), &self.config);
        self.persist()?;
        Ok(report)
    }

    /// Record an executed command's outcome and persist.
    pub fn record_outcome(&mut self, command: &str, success: bool, output: &str) -> Result<OutcomeReport> {
        let outcome = CommandOutcome {
            command: command.to_string(),
            success,
            output: output.to_string(),
        };
        let report = self.state.record_outcome(&outcome, &self.config);
        if let Some(prefix) = outcome.prefix() {
            if let Some(counts) = self.state.learned_commands.get(prefix) {
                debug!(
                    "Outcome for {}: +{} xp, skills {:?}, {}/{} succeeded",
                    prefix,
                    report.xp_gained,
                    report.skills_used,
                    counts.success,
                    counts.attempts()
                );
            }
        }
        self.persist()?;
        Ok(report)
    }

    /// Write the state document, then the projection.
    ///
    /// A failure leaves the previous file intact and is returned to the
    /// caller; in-memory state is kept, so the next persist flushes it.
    pub fn persist(&self) -> Result<()> {
        if let Err(e) = persist::write_atomic(&self.state_path, &self.state) {
            error!("Failed to persist evolution state: {}", e);
            return Err(e);
        }
        if let Err(e) = persist::write_atomic(&self.export_path, &self.projection()) {
            error!("Failed to export evolution projection: {}", e);
            return Err(e);
        }
        Ok(())
    }

    pub fn projection(&self) -> EvolutionProjection {
        EvolutionProjection::from_state(&self.state, self.config.limits.exported_timeline_events)
    }

    pub fn proposer_context(&self) -> String {
        context::proposer_context(&self.state, &self.config.limits)
    }

    pub fn evaluator_context(&self) -> String {
        context::evaluator_context(&self.state, &self.config.limits)
    }

    pub fn context_for(&self, persona: Persona) -> String {
        context::for_persona(&self.state, persona, &self.config.limits)
    }

    pub fn unlocked_capabilities(&self) -> Vec<String> {
        context::unlocked_capabilities(&self.state)
    }
}
