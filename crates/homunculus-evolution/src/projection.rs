//! Read-only projection exported for external visualization

use crate::personality::Personality;
use crate::state::EvolutionState;
use crate::timeline::TimelineEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionStats {
    pub total_successes: u64,
    pub total_failures: u64,
    pub success_rate: f64,
    pub peak_complexity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionProjection {
    pub current_generation: u32,
    pub level: u32,
    pub experience: u64,
    pub xp_to_next_level: u64,
    pub skills: BTreeMap<String, f64>,
    pub mastered_skills: Vec<String>,
    pub personality: Personality,
    /// Most recent events only.
    pub timeline: Vec<TimelineEvent>,
    pub generations_history: Vec<crate::generation::GenerationRecord>,
    pub evolution_score: u64,
    pub stats: ProjectionStats,
}

impl EvolutionProjection {
    pub fn from_state(state: &EvolutionState, timeline_events: usize) -> Self {
        Self {
            current_generation: state.generation,
            level: state.level,
            experience: state.experience_points,
            xp_to_next_level: state.xp_to_next_level(),
            skills: state.skills.clone(),
            mastered_skills: state.mastered_skills.clone(),
            personality: state.personality,
            timeline: state.timeline.recent(timeline_events).to_vec(),
            generations_history: state.generations_history.clone(),
            evolution_score: state.evolution_score,
            stats: ProjectionStats {
                total_successes: state.total_successes,
                total_failures: state.total_failures,
                success_rate: state.success_rate(),
                peak_complexity: state.peak_complexity,
            },
        }
    }
}
