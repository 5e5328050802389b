//! EvolutionState: the aggregate root and its mutation rules
//!
//! Pure in-memory bookkeeping. Durability lives in [`crate::store`].
//! Two entry points mutate state: [`EvolutionState::record_outcome`] and
//! [`EvolutionState::record_proposal`]. Everything else is read-only.

use crate::config::{EvolutionConfig, ScorePolicy};
use crate::experience::{self, ScoreInputs};
use crate::generation::{self, DnaSnapshot, GenerationRecord};
use crate::learner::{self, CommandTable, LearnerState, Lesson, PatternSet};
use crate::personality::{Personality, Trait};
use crate::skills;
use crate::timeline::{Timeline, TimelineEvent, TimelineEventKind};
use chrono::{DateTime, Utc};
use homunculus_core::{CommandOutcome, Proposal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionState {
    pub schema_version: u32,
    #[serde(deserialize_with = "crate::stamp::deserialize")]
    pub created_at: DateTime<Utc>,

    pub generation: u32,
    #[serde(deserialize_with = "crate::stamp::deserialize")]
    pub generation_started: DateTime<Utc>,
    pub experience_points: u64,
    pub level: u32,

    pub skills: BTreeMap<String, f64>,
    /// Mastery order, oldest first. Never shrinks.
    pub mastered_skills: Vec<String>,

    pub successful_patterns: PatternSet,
    pub failed_patterns: PatternSet,
    pub learned_commands: CommandTable,

    pub personality: Personality,

    pub generations_history: Vec<GenerationRecord>,
    pub dna_snapshots: Vec<DnaSnapshot>,
    pub timeline: Timeline,

    pub total_successes: u64,
    pub total_failures: u64,
    pub total_proposals: u64,
    pub feature_types: BTreeMap<String, u64>,
    /// Highest generation reached.
    pub peak_complexity: u32,
    pub evolution_score: u64,
}

impl Default for EvolutionState {
    fn default() -> Self {
        Self::born_at(Utc::now())
    }
}

/// What a single [`EvolutionState::record_outcome`] call changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeReport {
    pub xp_gained: u64,
    pub skills_used: Vec<String>,
    pub lesson: Lesson,
    pub newly_mastered: Vec<String>,
    pub levels_reached: Vec<u32>,
    pub generations_reached: Vec<u32>,
}

/// What a single [`EvolutionState::record_proposal`] call changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposalReport {
    pub traits_nudged: Vec<Trait>,
}

impl EvolutionState {
    /// Fresh generation-1 state: level 1, no XP, every catalogue skill at zero.
    pub fn born_at(at: DateTime<Utc>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            created_at: at,
            generation: 1,
            generation_started: at,
            experience_points: 0,
            level: 1,
            skills: skills::SKILLS
                .iter()
                .map(|s| (s.name.to_string(), 0.0))
                .collect(),
            mastered_skills: Vec::new(),
            successful_patterns: PatternSet::new(),
            failed_patterns: PatternSet::new(),
            learned_commands: CommandTable::default(),
            personality: Personality::default(),
            generations_history: vec![GenerationRecord::birth(at)],
            dna_snapshots: Vec::new(),
            timeline: Timeline::default(),
            total_successes: 0,
            total_failures: 0,
            total_proposals: 0,
            feature_types: BTreeMap::new(),
            peak_complexity: 1,
            evolution_score: 0,
        }
    }

    pub fn success_rate(&self) -> f64 {
        experience::success_rate(self.total_successes, self.total_failures)
    }

    /// Cumulative XP at which the next level is reached.
    pub fn xp_to_next_level(&self) -> u64 {
        experience::xp_for_level(self.level.saturating_add(1))
    }

    pub fn is_mastered(&self, skill: &str) -> bool {
        self.mastered_skills.iter().any(|s| s == skill)
    }

    pub fn skill_points(&self, skill: &str) -> f64 {
        self.skills.get(skill).copied().unwrap_or(0.0)
    }

    /// Score from current values. Stored only when the score policy says so.
    pub fn compute_score(&self) -> u64 {
        experience::evolution_score(ScoreInputs {
            level: self.level,
            mastered: self.mastered_skills.len(),
            generation: self.generation,
            success_rate: self.success_rate(),
            success_patterns: self.successful_patterns.len(),
        })
    }

    /// Learn from one executed command.
    pub fn record_outcome(&mut self, outcome: &CommandOutcome, config: &EvolutionConfig) -> OutcomeReport {
        let mut m = Mutation {
            state: self,
            config,
            report: OutcomeReport::default(),
        };
        m.outcome(outcome);
        m.finish()
    }

    /// Count a proposal and let it color the personality.
    pub fn record_proposal(&mut self, proposal: &Proposal, config: &EvolutionConfig) -> ProposalReport {
        self.total_proposals = self.total_proposals.saturating_add(1);
        let count = self.feature_types.entry(proposal.kind.clone()).or_insert(0);
        *count = count.saturating_add(1);

        let traits_nudged = self.personality.analyze(&proposal.text);
        if !traits_nudged.is_empty() {
            debug!("Proposal nudged traits: {:?}", traits_nudged);
        }

        if config.evolution.score_policy == ScorePolicy::EveryMutation {
            self.evolution_score = self.compute_score();
        }

        ProposalReport { traits_nudged }
    }
}

/// One in-flight mutation: state, config, and the running report.
struct Mutation<'a> {
    state: &'a mut EvolutionState,
    config: &'a EvolutionConfig,
    report: OutcomeReport,
}

impl Mutation<'_> {
    fn outcome(&mut self, outcome: &CommandOutcome) {
        let command = outcome.command.as_str();
        let success = outcome.success;

        if success {
            self.state.total_successes = self.state.total_successes.saturating_add(1);
        } else {
            self.state.total_failures = self.state.total_failures.saturating_add(1);
        }

        let limits = self.config.limits.clone();
        self.report.lesson = learner::learn(
            LearnerState {
                commands: &mut self.state.learned_commands,
                successful_patterns: &mut self.state.successful_patterns,
                failed_patterns: &mut self.state.failed_patterns,
                success_cap: limits.success_cap(),
                failure_cap: limits.failure_cap(),
            },
            command,
            success,
            &outcome.output,
        );

        let skills_used = skills::detect(&format!("{} {}", command, outcome.output));
        for skill in &skills_used {
            self.improve_skill(skill, success);
        }

        let xp = experience::award(command, success, &skills_used);
        self.add_experience(xp);
        self.check_generation();

        self.push_event(TimelineEventKind::execution(
            command,
            success,
            skills_used.clone(),
            xp,
        ));

        self.report.xp_gained = xp;
        self.report.skills_used = skills_used;
    }

    fn finish(self) -> OutcomeReport {
        if self.config.evolution.score_policy == ScorePolicy::EveryMutation {
            self.state.evolution_score = self.state.compute_score();
        }
        self.report
    }

    fn improve_skill(&mut self, skill: &str, success: bool) {
        let parent_mastered = skills::parent(skill)
            .map(|p| self.state.is_mastered(p))
            .unwrap_or(false);
        let points = skills::points_for_use(success, parent_mastered);

        let total = self.state.skills.entry(skill.to_string()).or_insert(0.0);
        *total += points;
        let total = *total;

        if total >= skills::threshold(skill) && !self.state.is_mastered(skill) {
            self.master_skill(skill);
        }
    }

    fn master_skill(&mut self, skill: &str) {
        self.state.mastered_skills.push(skill.to_string());
        let total = self.state.mastered_skills.len();
        info!("Mastered skill {} ({} total)", skill, total);
        self.report.newly_mastered.push(skill.to_string());

        self.add_experience(experience::MASTERY_BONUS_XP);
        self.push_event(TimelineEventKind::skill_mastered(skill, total));
        self.check_generation();
    }

    fn add_experience(&mut self, xp: u64) {
        self.state.experience_points = self.state.experience_points.saturating_add(xp);
        while experience::reaches(self.state.experience_points, self.state.level.saturating_add(1)) {
            self.level_up();
        }
    }

    fn level_up(&mut self) {
        self.state.level = self.state.level.saturating_add(1);
        let level = self.state.level;
        info!("Reached level {} ({} xp)", level, self.state.experience_points);
        self.report.levels_reached.push(level);

        self.push_event(TimelineEventKind::level_up(level));
        self.state.evolution_score = self.state.compute_score();
    }

    fn check_generation(&mut self) {
        // u32::MAX is the last generation.
        while self.state.generation < u32::MAX {
            let trigger = generation::advancement_trigger(
                self.state.generation,
                self.state.mastered_skills.len(),
                self.state.level,
            );
            match trigger {
                Some(trigger) => self.advance_generation(&trigger),
                None => return,
            }
            if !self.config.evolution.cascade_generations {
                return;
            }
        }
    }

    fn advance_generation(&mut self, trigger: &str) {
        let now = Utc::now();
        let outgoing = self.state.generation;
        let incoming = outgoing.saturating_add(1);
        let success_rate = self.state.success_rate();

        let state = &mut *self.state;
        state.dna_snapshots.push(DnaSnapshot {
            generation: outgoing,
            timestamp: now,
            skills: state.skills.clone(),
            mastered: state.mastered_skills.clone(),
            personality: state.personality,
            level: state.level,
            success_rate,
        });

        state.generation = incoming;
        state.generations_history.push(GenerationRecord {
            generation: incoming,
            started: now,
            trigger: trigger.to_string(),
            skills_at_start: state.mastered_skills.clone(),
            personality_snapshot: state.personality,
        });
        state.generation_started = now;

        info!("Evolved to generation {} ({})", incoming, trigger);
        self.report.generations_reached.push(incoming);

        self.push_event(TimelineEventKind::generation_advance(incoming, trigger));
        self.state.peak_complexity = incoming;
    }

    fn push_event(&mut self, kind: TimelineEventKind) {
        let event = TimelineEvent {
            kind,
            timestamp: Utc::now(),
            generation: self.state.generation,
            level: self.state.level,
        };
        self.state.timeline.push(event, self.config.limits.timeline_cap());
    }
}
