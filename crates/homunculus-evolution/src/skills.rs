//! SkillGraph: fixed skill hierarchy and keyword-based usage detection
//!
//! Skills form a forest: each node has at most one parent. A mastered parent
//! speeds up point accrual for its children but never gates them.

/// A node in the skill hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillNode {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    /// Points needed for mastery.
    pub threshold: f64,
}

const fn node(name: &'static str, parent: Option<&'static str>, threshold: f64) -> SkillNode {
    SkillNode {
        name,
        parent,
        threshold,
    }
}

/// Every known skill, parents listed before their children.
pub const SKILLS: &[SkillNode] = &[
    // Web development
    node("html_basics", None, 3.0),
    node("css_styling", Some("html_basics"), 5.0),
    node("javascript", Some("html_basics"), 5.0),
    node("canvas_games", Some("javascript"), 8.0),
    node("web_audio", Some("javascript"), 5.0),
    node("localStorage", Some("javascript"), 3.0),
    node("animations", Some("css_styling"), 5.0),
    node("responsive_design", Some("css_styling"), 5.0),
    // System
    node("bash_basics", None, 3.0),
    node("file_operations", Some("bash_basics"), 5.0),
    node("process_management", Some("bash_basics"), 5.0),
    node("nginx_config", Some("file_operations"), 5.0),
    node("python_scripting", None, 5.0),
    node("node_js", None, 5.0),
    node("api_development", Some("node_js"), 8.0),
    // Advanced
    node("database_ops", Some("api_development"), 10.0),
    node("websockets", Some("api_development"), 10.0),
    node("ai_integration", Some("python_scripting"), 15.0),
    node("self_modification", Some("ai_integration"), 20.0),
];

/// Keywords whose presence (case-insensitive) marks a skill as used.
pub const SKILL_INDICATORS: &[(&str, &[&str])] = &[
    ("html_basics", &["<html", "<div", "<body", "<!DOCTYPE", "<head"]),
    (
        "css_styling",
        &["style=", "<style>", "color:", "background:", "margin:", "padding:"],
    ),
    (
        "javascript",
        &["<script>", "function ", "const ", "let ", "document."],
    ),
    (
        "canvas_games",
        &["canvas", "getContext", "requestAnimationFrame", "fillRect"],
    ),
    (
        "web_audio",
        &["AudioContext", "oscillator", "createOscillator", "Web Audio"],
    ),
    (
        "localStorage",
        &["localStorage", "getItem", "setItem", "JSON.parse"],
    ),
    (
        "animations",
        &["animation:", "keyframes", "transition:", "transform:"],
    ),
    ("bash_basics", &["echo ", "cd ", "ls ", "mkdir ", "cat "]),
    ("file_operations", &["cat >", "cat <<", "sed ", "grep ", "find "]),
    (
        "nginx_config",
        &["nginx", "server {", "location ", "proxy_pass"],
    ),
    ("python_scripting", &["python", "import ", "def ", ".py"]),
    ("node_js", &["node ", "npm ", "require(", "module.exports"]),
    (
        "api_development",
        &["express", "app.get", "app.post", "res.json", "http.createServer"],
    ),
];

/// Skills that earn the advanced-skill XP bonus.
pub const ADVANCED_SKILLS: [&str; 4] = ["canvas_games", "web_audio", "api_development", "websockets"];

/// Threshold applied to skills outside the catalogue.
pub const DEFAULT_THRESHOLD: f64 = 10.0;

/// Points for a detected use.
pub const SUCCESS_POINTS: f64 = 2.0;
pub const ATTEMPT_POINTS: f64 = 0.5;
/// Accrual multiplier when the parent skill is mastered.
pub const MASTERED_PARENT_MULTIPLIER: f64 = 1.5;

/// Look up a catalogue node by name.
pub fn skill(name: &str) -> Option<&'static SkillNode> {
    SKILLS.iter().find(|s| s.name == name)
}

/// Mastery threshold, falling back to [`DEFAULT_THRESHOLD`] for unknown skills.
pub fn threshold(name: &str) -> f64 {
    skill(name).map(|s| s.threshold).unwrap_or(DEFAULT_THRESHOLD)
}

pub fn parent(name: &str) -> Option<&'static str> {
    skill(name).and_then(|s| s.parent)
}

pub fn is_advanced(name: &str) -> bool {
    ADVANCED_SKILLS.contains(&name)
}

/// Skills whose indicator keywords appear anywhere in `text`.
///
/// Presence only: a skill is reported once however many keywords match.
/// Returned in catalogue order.
pub fn detect(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SKILL_INDICATORS
        .iter()
        .filter(|(_, indicators)| {
            indicators
                .iter()
                .any(|kw| lower.contains(&kw.to_lowercase()))
        })
        .map(|(name, _)| (*name).to_string())
        .collect()
}

/// Points a single detected use is worth.
pub fn points_for_use(success: bool, parent_mastered: bool) -> f64 {
    let base = if success { SUCCESS_POINTS } else { ATTEMPT_POINTS };
    if parent_mastered {
        base * MASTERED_PARENT_MULTIPLIER
    } else {
        base
    }
}

/// "canvas_games" → "Canvas Games"
pub fn display_title(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// "canvas_games" → "canvas games"
pub fn display_name(name: &str) -> String {
    name.replace('_', " ")
}
