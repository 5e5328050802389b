//! ExperienceEngine: XP awards, the level curve, and the evolution score

use crate::skills;

/// XP for a failed action. Never zero.
pub const FAILURE_XP: u64 = 1;
/// Base XP for a successful action.
pub const BASE_SUCCESS_XP: f64 = 5.0;
/// Cap on the command-length complexity bonus.
pub const MAX_COMPLEXITY_BONUS: f64 = 10.0;
pub const PER_SKILL_XP: f64 = 2.0;
pub const ADVANCED_SKILL_XP: f64 = 5.0;
/// Flat bonus when a skill is mastered.
pub const MASTERY_BONUS_XP: u64 = 50;

/// Cumulative XP required to hold `level`: `floor(100 × 1.5^(level-1))`.
///
/// Level 1 is the starting level and needs nothing; the value for 1 (100)
/// is only meaningful as the base of the curve. Level-up to `L + 1` happens
/// once XP reaches `xp_for_level(L + 1)`. Saturates at `u64::MAX`.
pub fn xp_for_level(level: u32) -> u64 {
    let exponent = level.saturating_sub(1) as f64;
    (100.0 * 1.5_f64.powf(exponent)).floor() as u64
}

/// Whether `xp` is enough to hold `level`. A requirement that saturated
/// the curve is out of reach.
pub fn reaches(xp: u64, level: u32) -> bool {
    let needed = xp_for_level(level);
    needed < u64::MAX && xp >= needed
}

/// Level held with `xp` cumulative experience, starting from level 1.
pub fn level_for_xp(xp: u64) -> u32 {
    let mut level = 1;
    while reaches(xp, level + 1) {
        level += 1;
    }
    level
}

/// XP awarded for an action.
///
/// Failure earns [`FAILURE_XP`]. Success earns a base amount plus bonuses
/// for command length, for each distinct skill, and for advanced skills.
pub fn award(command: &str, success: bool, skills_used: &[String]) -> u64 {
    if !success {
        return FAILURE_XP;
    }

    let complexity = command.chars().count() as f64 / 100.0;
    let complexity_bonus = (complexity * 3.0).min(MAX_COMPLEXITY_BONUS);
    let skill_bonus = skills_used.len() as f64 * PER_SKILL_XP;
    let advanced = skills_used.iter().filter(|s| skills::is_advanced(s)).count();
    let advanced_bonus = advanced as f64 * ADVANCED_SKILL_XP;

    (BASE_SUCCESS_XP + complexity_bonus + skill_bonus + advanced_bonus) as u64
}

/// successes / (successes + failures), rounded to 3 decimals.
pub fn success_rate(successes: u64, failures: u64) -> f64 {
    let total = successes.saturating_add(failures);
    if total == 0 {
        return 0.0;
    }
    let rate = successes as f64 / total as f64;
    (rate * 1000.0).round() / 1000.0
}

/// Inputs to [`evolution_score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub level: u32,
    pub mastered: usize,
    pub generation: u32,
    pub success_rate: f64,
    pub success_patterns: usize,
}

/// Rollup of overall progress.
pub fn evolution_score(inputs: ScoreInputs) -> u64 {
    let level = inputs.level as u64 * 10;
    let mastered = inputs.mastered as u64 * 25;
    let generation = inputs.generation as u64 * 100;
    let rate = (inputs.success_rate * 50.0) as u64;
    let patterns = (inputs.success_patterns as u64 * 5).min(100);
    level + mastered + generation + rate + patterns
}
