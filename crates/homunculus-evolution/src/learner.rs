//! OutcomeLearner: success/failure pattern extraction and command reliability

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Successful commands shorter than this teach no pattern.
pub const MIN_PATTERN_COMMAND_LEN: usize = 20;

/// Ordered, deduplicated tag list capped at a maximum size. Oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternSet(Vec<String>);

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tag` if not already present, then evict the oldest entries
    /// beyond `cap`. Returns true if the tag was new.
    pub fn insert(&mut self, tag: &str, cap: usize) -> bool {
        if self.0.iter().any(|t| t == tag) {
            return false;
        }
        self.0.push(tag.to_string());
        if self.0.len() > cap {
            let excess = self.0.len() - cap;
            self.0.drain(..excess);
        }
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Up to `n` most recent tags, oldest of them first.
    pub fn recent(&self, n: usize) -> &[String] {
        &self.0[self.0.len().saturating_sub(n)..]
    }
}

/// Success/fail counters for one command prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedCommand {
    pub success: u64,
    pub fail: u64,
}

impl LearnedCommand {
    pub fn attempts(&self) -> u64 {
        self.success.saturating_add(self.fail)
    }

    /// Fraction of attempts that succeeded, 0.0 before any attempt.
    pub fn success_rate(&self) -> f64 {
        match self.attempts() {
            0 => 0.0,
            n => self.success as f64 / n as f64,
        }
    }
}

/// Per-prefix counters, keyed by the command's first token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTable(BTreeMap<String, LearnedCommand>);

impl CommandTable {
    /// Counters for `prefix`, inserting a zeroed record on first use.
    pub fn get_or_insert(&mut self, prefix: &str) -> &mut LearnedCommand {
        self.0.entry(prefix.to_string()).or_default()
    }

    pub fn get(&self, prefix: &str) -> Option<&LearnedCommand> {
        self.0.get(prefix)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LearnedCommand)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// What one call to [`learn`] produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lesson {
    /// Pattern newly appended to the success set.
    pub success_pattern: Option<&'static str>,
    /// Pattern newly appended to the failure set.
    pub failure_pattern: Option<&'static str>,
}

/// Bookkeeping the learner mutates.
pub struct LearnerState<'a> {
    pub commands: &'a mut CommandTable,
    pub successful_patterns: &'a mut PatternSet,
    pub failed_patterns: &'a mut PatternSet,
    pub success_cap: usize,
    pub failure_cap: usize,
}

/// Learn from one command outcome. A blank command teaches nothing.
pub fn learn(state: LearnerState<'_>, command: &str, success: bool, output: &str) -> Lesson {
    let mut lesson = Lesson::default();

    let prefix = match command.split_whitespace().next() {
        Some(p) => p,
        None => return lesson,
    };

    let counters = state.commands.get_or_insert(prefix);
    if success {
        counters.success = counters.success.saturating_add(1);
    } else {
        counters.fail = counters.fail.saturating_add(1);
    }

    if success && command.chars().count() > MIN_PATTERN_COMMAND_LEN {
        if let Some(tag) = success_pattern(command) {
            if state.successful_patterns.insert(tag, state.success_cap) {
                lesson.success_pattern = Some(tag);
            }
        }
    }

    if !success {
        if let Some(tag) = failure_pattern(command, output) {
            if state.failed_patterns.insert(tag, state.failure_cap) {
                lesson.failure_pattern = Some(tag);
            }
        }
    }

    lesson
}

/// Reusable technique shown by a successful command. First match wins.
pub fn success_pattern(command: &str) -> Option<&'static str> {
    const RULES: &[(&[&str], &str)] = &[
        (&["cat <<", "cat >"], "heredoc_file_creation"),
        (&["mkdir -p"], "safe_directory_creation"),
        (&["<canvas"], "canvas_game_structure"),
        (&["AudioContext"], "web_audio_initialization"),
        (&["localStorage"], "persistent_storage"),
        (&["addEventListener"], "event_handling"),
        (&["fetch("], "api_calls"),
        (&["JSON.stringify", "JSON.parse"], "json_handling"),
    ];

    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| command.contains(n)))
        .map(|(_, tag)| *tag)
}

/// Lesson to avoid, derived from a failed command's output.
pub fn failure_pattern(command: &str, output: &str) -> Option<&'static str> {
    let output = output.to_lowercase();

    if output.contains("syntax error") {
        if command.contains("sed") {
            return Some("avoid_complex_sed");
        }
        if command.contains("echo") && command.contains('(') {
            return Some("escape_special_chars_in_echo");
        }
    }
    if output.contains("permission denied") {
        return Some("check_permissions_first");
    }
    if output.contains("no such file") {
        return Some("verify_paths_exist");
    }
    if output.contains("command not found") {
        return Some("check_command_availability");
    }
    None
}
