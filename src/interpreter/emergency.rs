/// Phrases that mark a reply as urgent. Matched as plain substrings of the
/// lowercased reply, so "hospitalization" counts as "hospital".
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "emergency",
    "urgent",
    "immediately",
    "right away",
    "serious",
    "severe",
    "life-threatening",
    "critical",
    "seek medical attention",
    "call 108",
    "hospital",
];

/// Whether the reply contains any emergency keyword, ignoring case.
///
/// Severity is not considered here; see [`super::interpret`].
pub fn contains_emergency_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    EMERGENCY_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
