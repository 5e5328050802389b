//! Prompt context: natural-language summaries of evolution state
//!
//! Pulled by the orchestration loop before each persona call. Pure reads.

use crate::config::LimitsConfig;
use crate::generation;
use crate::personality::Trait;
use crate::skills;
use crate::state::EvolutionState;
use homunculus_core::Persona;

/// Trait value above which the proposer is told to lean into it.
pub const TRAIT_CALLOUT_THRESHOLD: f64 = 0.7;
/// Command success rate above which a command is reliable.
pub const RELIABLE_RATE: f64 = 0.8;
/// Command success rate below which a command is problematic.
pub const PROBLEMATIC_RATE: f64 = 0.3;
pub const MAX_RELIABLE_LISTED: usize = 5;
pub const MAX_PROBLEMATIC_LISTED: usize = 3;

const TRAIT_CALLOUTS: [(Trait, &str); 3] = [
    (
        Trait::Enthusiasm,
        "You've developed an enthusiastic personality - express it!",
    ),
    (
        Trait::Creativity,
        "Your creativity has flourished - propose bold ideas!",
    ),
    (
        Trait::Artistic,
        "You have a strong artistic sense - make things beautiful!",
    ),
];

/// Capabilities every state has.
const BASE_CAPABILITIES: [&str; 2] = ["basic_html", "bash_commands"];
/// Capability unlocked by mastering a skill.
const SKILL_CAPABILITIES: [(&str, &str); 4] = [
    ("javascript", "interactive_features"),
    ("canvas_games", "game_development"),
    ("web_audio", "sound_design"),
    ("api_development", "backend_services"),
];
/// Capability unlocked by reaching a generation.
const GENERATION_CAPABILITIES: [(u32, &str); 3] = [
    (2, "multi_file_projects"),
    (3, "system_integration"),
    (4, "self_improvement"),
];

pub fn for_persona(state: &EvolutionState, persona: Persona, limits: &LimitsConfig) -> String {
    match persona {
        Persona::Proposer => proposer_context(state, limits),
        Persona::Evaluator => evaluator_context(state, limits),
    }
}

/// Context for the proposer: who it is, what it knows, how bold to be.
pub fn proposer_context(state: &EvolutionState, limits: &LimitsConfig) -> String {
    let mut ctx = Vec::new();

    ctx.push(format!(
        "You are a Generation {}, Level {} AI.",
        state.generation, state.level
    ));

    if !state.mastered_skills.is_empty() {
        let start = state
            .mastered_skills
            .len()
            .saturating_sub(limits.proposer_recent_skills);
        let names: Vec<String> = state.mastered_skills[start..]
            .iter()
            .map(|s| skills::display_name(s))
            .collect();
        ctx.push(format!("Skills you've mastered: {}", names.join(", ")));
    }

    if !state.successful_patterns.is_empty() {
        let recent = state.successful_patterns.recent(limits.proposer_recent_patterns);
        ctx.push(format!("Patterns that work well for you: {}", recent.join(", ")));
    }

    if !state.failed_patterns.is_empty() {
        let recent = state.failed_patterns.recent(limits.proposer_recent_failures);
        ctx.push(format!(
            "Things to avoid (learned from experience): {}",
            recent.join(", ")
        ));
    }

    for (t, line) in TRAIT_CALLOUTS {
        if state.personality.get(t) > TRAIT_CALLOUT_THRESHOLD {
            ctx.push(line.to_string());
        }
    }

    ctx.push(generation::proposer_guidance(state.generation).to_string());

    ctx.join("\n")
}

/// Context for the evaluator: track record and how much to allow.
pub fn evaluator_context(state: &EvolutionState, limits: &LimitsConfig) -> String {
    let mut ctx = Vec::new();

    ctx.push(format!(
        "The Child is Generation {}, Level {}.",
        state.generation, state.level
    ));
    ctx.push(format!("Success rate: {:.1}%", state.success_rate() * 100.0));

    let (reliable, problematic) = reliability(state, limits);
    if !reliable.is_empty() {
        let listed: Vec<&str> = reliable.into_iter().take(MAX_RELIABLE_LISTED).collect();
        ctx.push(format!("Reliable commands: {}", listed.join(", ")));
    }
    if !problematic.is_empty() {
        let listed: Vec<&str> = problematic
            .into_iter()
            .take(MAX_PROBLEMATIC_LISTED)
            .collect();
        ctx.push(format!(
            "Problematic commands (use carefully): {}",
            listed.join(", ")
        ));
    }

    ctx.push(generation::evaluator_guidance(state.generation).to_string());

    ctx.join("\n")
}

/// Reliable and problematic command prefixes among the first scanned entries.
pub fn reliability<'a>(state: &'a EvolutionState, limits: &LimitsConfig) -> (Vec<&'a str>, Vec<&'a str>) {
    let mut reliable = Vec::new();
    let mut problematic = Vec::new();

    for (cmd, stats) in state
        .learned_commands
        .iter()
        .take(limits.evaluator_scanned_commands)
    {
        if stats.attempts() < limits.evaluator_min_attempts {
            continue;
        }
        let rate = stats.success_rate();
        if rate > RELIABLE_RATE {
            reliable.push(cmd);
        } else if rate < PROBLEMATIC_RATE {
            problematic.push(cmd);
        }
    }

    (reliable, problematic)
}

/// Capability tags unlocked by mastered skills and generation.
pub fn unlocked_capabilities(state: &EvolutionState) -> Vec<String> {
    let mut caps: Vec<String> = BASE_CAPABILITIES.iter().map(|c| c.to_string()).collect();

    for (skill, cap) in SKILL_CAPABILITIES {
        if state.is_mastered(skill) {
            caps.push(cap.to_string());
        }
    }
    for (gen, cap) in GENERATION_CAPABILITIES {
        if state.generation >= gen {
            caps.push(cap.to_string());
        }
    }

    caps
}
