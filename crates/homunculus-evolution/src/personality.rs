//! PersonalityModel: eight bounded traits nudged by lexical signal
//!
//! Every trait lives in [0, 1]. Text analysis applies independent boolean
//! triggers; each trigger that fires nudges its trait by [`NUDGE`].

use serde::{Deserialize, Serialize};

/// Size of a single trait adjustment.
pub const NUDGE: f64 = 0.01;
/// Starting value for every trait.
pub const NEUTRAL: f64 = 0.5;

const CREATIVE_WORDS: &[&str] = &[
    "new",
    "creative",
    "unique",
    "innovative",
    "experiment",
    "try",
    "imagine",
];
const CAUTIOUS_WORDS: &[&str] = &["safe", "careful", "test", "verify", "check", "simple", "basic"];
const SOCIAL_WORDS: &[&str] = &["visitor", "user", "player", "welcome", "community", "share"];
const ARTISTIC_WORDS: &[&str] = &[
    "beautiful",
    "style",
    "color",
    "design",
    "aesthetic",
    "rainbow",
    "animation",
];
const ENTHUSIASM_GLYPHS: &[&str] = &["!", "🎮", "🌈", "✨", "🎉", "❤", "🔥", "💪"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Creativity,
    Enthusiasm,
    Caution,
    Persistence,
    ComplexityPreference,
    Social,
    Artistic,
    Systematic,
}

impl Trait {
    pub const ALL: [Trait; 8] = [
        Trait::Creativity,
        Trait::Enthusiasm,
        Trait::Caution,
        Trait::Persistence,
        Trait::ComplexityPreference,
        Trait::Social,
        Trait::Artistic,
        Trait::Systematic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Trait::Creativity => "creativity",
            Trait::Enthusiasm => "enthusiasm",
            Trait::Caution => "caution",
            Trait::Persistence => "persistence",
            Trait::ComplexityPreference => "complexity_preference",
            Trait::Social => "social",
            Trait::Artistic => "artistic",
            Trait::Systematic => "systematic",
        }
    }
}

/// Trait values. Serialized as a flat `{trait: value}` map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personality {
    pub creativity: f64,
    pub enthusiasm: f64,
    pub caution: f64,
    pub persistence: f64,
    pub complexity_preference: f64,
    pub social: f64,
    pub artistic: f64,
    pub systematic: f64,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            creativity: NEUTRAL,
            enthusiasm: NEUTRAL,
            caution: NEUTRAL,
            persistence: NEUTRAL,
            complexity_preference: NEUTRAL,
            social: NEUTRAL,
            artistic: NEUTRAL,
            systematic: NEUTRAL,
        }
    }
}

impl Personality {
    pub fn get(&self, t: Trait) -> f64 {
        match t {
            Trait::Creativity => self.creativity,
            Trait::Enthusiasm => self.enthusiasm,
            Trait::Caution => self.caution,
            Trait::Persistence => self.persistence,
            Trait::ComplexityPreference => self.complexity_preference,
            Trait::Social => self.social,
            Trait::Artistic => self.artistic,
            Trait::Systematic => self.systematic,
        }
    }

    fn get_mut(&mut self, t: Trait) -> &mut f64 {
        match t {
            Trait::Creativity => &mut self.creativity,
            Trait::Enthusiasm => &mut self.enthusiasm,
            Trait::Caution => &mut self.caution,
            Trait::Persistence => &mut self.persistence,
            Trait::ComplexityPreference => &mut self.complexity_preference,
            Trait::Social => &mut self.social,
            Trait::Artistic => &mut self.artistic,
            Trait::Systematic => &mut self.systematic,
        }
    }

    /// Shift a trait, clamped into [0, 1].
    pub fn adjust(&mut self, t: Trait, amount: f64) {
        let value = self.get_mut(t);
        *value = (*value + amount).clamp(0.0, 1.0);
    }

    /// Run every lexical trigger against `text`. Returns the traits nudged.
    pub fn analyze(&mut self, text: &str) -> Vec<Trait> {
        let fired = triggered_traits(text);
        for t in &fired {
            self.adjust(*t, NUDGE);
        }
        fired
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        Trait::ALL.iter().map(move |t| (*t, self.get(*t)))
    }
}

/// Which triggers fire for `text`, in a fixed order.
pub fn triggered_traits(text: &str) -> Vec<Trait> {
    let lower = text.to_lowercase();
    let mut fired = Vec::new();

    if is_enthusiastic(text) {
        fired.push(Trait::Enthusiasm);
    }
    if contains_any(&lower, CREATIVE_WORDS) {
        fired.push(Trait::Creativity);
    }
    if contains_any(&lower, CAUTIOUS_WORDS) {
        fired.push(Trait::Caution);
    }
    if contains_any(&lower, SOCIAL_WORDS) {
        fired.push(Trait::Social);
    }
    if contains_any(&lower, ARTISTIC_WORDS) {
        fired.push(Trait::Artistic);
    }

    fired
}

fn is_enthusiastic(text: &str) -> bool {
    let total = text.chars().count().max(1);
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    let caps_ratio = upper as f64 / total as f64;
    let exclamations = text.matches('!').count();
    let glyphs: usize = ENTHUSIASM_GLYPHS.iter().map(|g| text.matches(g).count()).sum();

    caps_ratio > 0.1 || exclamations > 3 || glyphs > 2
}

fn contains_any(haystack: &str, words: &[&str]) -> bool {
    words.iter().any(|w| haystack.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_exclamations_count_as_glyphs() {
        // 3 "!" is not > 3 exclamations but is > 2 glyphs
        assert!(is_enthusiastic("wow! yes! go!"));
    }

    #[test]
    fn calm_lowercase_text_is_not_enthusiastic() {
        assert!(!is_enthusiastic("a quiet plain sentence"));
    }
}
