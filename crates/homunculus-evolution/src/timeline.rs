//! Timeline: capped, append-only log of notable engine transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of a command kept in an execution event.
pub const COMMAND_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEventKind {
    Execution {
        success: bool,
        skills_used: Vec<String>,
        xp_gained: u64,
        command_preview: String,
    },
    SkillMastered {
        skill: String,
        message: String,
        total_mastered: usize,
    },
    LevelUp {
        new_level: u32,
        message: String,
    },
    GenerationAdvance {
        new_generation: u32,
        trigger: String,
        message: String,
    },
}

impl TimelineEventKind {
    pub fn execution(command: &str, success: bool, skills_used: Vec<String>, xp_gained: u64) -> Self {
        Self::Execution {
            success,
            skills_used,
            xp_gained,
            command_preview: command.chars().take(COMMAND_PREVIEW_CHARS).collect(),
        }
    }

    pub fn skill_mastered(skill: &str, total_mastered: usize) -> Self {
        Self::SkillMastered {
            skill: skill.to_string(),
            message: format!("Mastered {}!", crate::skills::display_title(skill)),
            total_mastered,
        }
    }

    pub fn level_up(new_level: u32) -> Self {
        Self::LevelUp {
            new_level,
            message: format!("Reached Level {}!", new_level),
        }
    }

    pub fn generation_advance(new_generation: u32, trigger: &str) -> Self {
        Self::GenerationAdvance {
            new_generation,
            trigger: trigger.to_string(),
            message: format!("EVOLVED TO GENERATION {}!", new_generation),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Execution { .. } => "execution",
            Self::SkillMastered { .. } => "skill_mastered",
            Self::LevelUp { .. } => "level_up",
            Self::GenerationAdvance { .. } => "generation_advance",
        }
    }
}

/// An event plus the stamp every event carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(flatten)]
    pub kind: TimelineEventKind,
    #[serde(deserialize_with = "crate::stamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    pub generation: u32,
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline(Vec<TimelineEvent>);

impl Timeline {
    /// Append, evicting the oldest events beyond `cap`.
    pub fn push(&mut self, event: TimelineEvent, cap: usize) {
        self.0.push(event);
        if self.0.len() > cap {
            let excess = self.0.len() - cap;
            self.0.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.0
    }

    /// Up to `n` most recent events, oldest of them first.
    pub fn recent(&self, n: usize) -> &[TimelineEvent] {
        &self.0[self.0.len().saturating_sub(n)..]
    }

    pub fn last(&self) -> Option<&TimelineEvent> {
        self.0.last()
    }
}
