//! Homunculus Evolution: persistent learning signal for a proposer/evaluator loop
//!
//! Turns command outcomes and persona proposals into:
//! - skill points and one-way mastery (SkillGraph)
//! - XP, levels and an evolution score (ExperienceEngine)
//! - discrete generations with DNA snapshots (GenerationController)
//! - bounded personality traits (PersonalityModel)
//! - success/failure patterns and per-command reliability (OutcomeLearner)
//!
//! and projects that state back into prompt context for both personas.

pub mod config;
pub mod context;
pub mod experience;
pub mod generation;
pub mod learner;
pub mod persist;
pub mod personality;
pub mod projection;
pub mod skills;
mod stamp;
pub mod state;
pub mod store;
pub mod timeline;

pub use config::EvolutionConfig;
pub use state::EvolutionState;
pub use store::EvolutionStore;
