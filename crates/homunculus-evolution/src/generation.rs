//! GenerationController: one-way progression through discrete generations
//!
//! Each generation has a guard over mastered-skill count and level. Only the
//! guard for the current generation is evaluated; advancing snapshots the
//! outgoing generation as DNA and opens a history record for the new one.

use crate::personality::Personality;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trigger tag of the first history record.
pub const BIRTH_TRIGGER: &str = "birth";

/// Start-of-generation record. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: u32,
    #[serde(deserialize_with = "crate::stamp::deserialize")]
    pub started: DateTime<Utc>,
    pub trigger: String,
    /// Mastered skills when the generation began.
    pub skills_at_start: Vec<String>,
    pub personality_snapshot: Personality,
}

impl GenerationRecord {
    pub fn birth(at: DateTime<Utc>) -> Self {
        Self {
            generation: 1,
            started: at,
            trigger: BIRTH_TRIGGER.to_string(),
            skills_at_start: Vec::new(),
            personality_snapshot: Personality::default(),
        }
    }
}

/// End-of-generation capture, tagged with the outgoing generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnaSnapshot {
    pub generation: u32,
    #[serde(deserialize_with = "crate::stamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    pub skills: BTreeMap<String, f64>,
    pub mastered: Vec<String>,
    pub personality: Personality,
    pub level: u32,
    pub success_rate: f64,
}

/// Trigger tag if the guard for `generation` passes, else `None`.
///
/// | gen | guard                     |
/// |-----|---------------------------|
/// | 1   | mastered ≥ 3              |
/// | 2   | mastered ≥ 6, level ≥ 5   |
/// | 3   | mastered ≥ 10, level ≥ 10 |
/// | 4   | mastered ≥ 15, level ≥ 15 |
/// | ≥5  | level ≥ gen × 5           |
pub fn advancement_trigger(generation: u32, mastered: usize, level: u32) -> Option<String> {
    match generation {
        1 if mastered >= 3 => Some("mastered_3_skills".into()),
        2 if mastered >= 6 && level >= 5 => Some("mastered_6_skills_level_5".into()),
        3 if mastered >= 10 && level >= 10 => Some("mastered_10_skills_level_10".into()),
        4 if mastered >= 15 && level >= 15 => Some("approaching_singularity".into()),
        g if g >= 5 && level >= g.saturating_mul(5) => Some(format!("transcendence_level_{}", g)),
        _ => None,
    }
}

/// Complexity guidance for the proposer at a generation.
pub fn proposer_guidance(generation: u32) -> &'static str {
    match generation {
        0 | 1 => "Focus on learning basics and simple features.",
        2 => "You can attempt moderate complexity. Combine skills!",
        3 => "You're ready for advanced features. Push boundaries!",
        _ => "You've achieved mastery. Create sophisticated systems!",
    }
}

/// Complexity allowance for the evaluator at a generation.
pub fn evaluator_guidance(generation: u32) -> &'static str {
    match generation {
        0 | 1 => "Allow only simple, focused proposals.",
        2 => "Allow moderate complexity if well-structured.",
        _ => "Advanced proposals are acceptable if safe.",
    }
}
