//! Input types handed to the evolution engine by the outer loop

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Result of one executed shell command.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandOutcome {
    pub command: String,
    pub success: bool,
    #[serde(default)]
    pub output: String,
}

impl CommandOutcome {
    pub fn succeeded(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: true,
            output: output.into(),
        }
    }

    pub fn failed(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: false,
            output: output.into(),
        }
    }

    /// First whitespace-delimited token, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.command.split_whitespace().next()
    }
}

/// Proposal kind used when the caller does not name one.
pub const DEFAULT_PROPOSAL_KIND: &str = "feature";

/// A proposal produced by the proposer persona.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Proposal {
    pub text: String,
    pub kind: String,
}

impl Proposal {
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }

    pub fn feature(text: impl Into<String>) -> Self {
        Self::new(text, DEFAULT_PROPOSAL_KIND)
    }
}

/// The two LLM personas that consume evolution context.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Permissive persona that proposes features.
    Proposer,
    /// Gating persona that approves or rejects proposals.
    Evaluator,
}

impl Persona {
    pub fn as_str(self) -> &'static str {
        match self {
            Persona::Proposer => "proposer",
            Persona::Evaluator => "evaluator",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Persona {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proposer" | "child" => Ok(Persona::Proposer),
            "evaluator" | "brain" => Ok(Persona::Evaluator),
            other => Err(crate::Error::UnknownPersona(other.to_string())),
        }
    }
}
