use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Each extracted section is cut to this many characters after trimming.
pub const MAX_SECTION_CHARS: usize = 500;

/// Categorized advice pulled from a reply. A category whose header never
/// appears is `None` and is omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precautions: Option<String>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.diet.is_none()
            && self.activities.is_none()
            && self.lifestyle.is_none()
            && self.precautions.is_none()
    }
}

/// Header for one category plus the words that end its section.
/// A section never stops on its own category word.
struct SectionPattern {
    header: Regex,
    stop: Regex,
}

fn section(header: &str, stop: &str) -> SectionPattern {
    SectionPattern {
        header: Regex::new(header).expect("Invalid section header regex"),
        stop: Regex::new(stop).expect("Invalid section stop regex"),
    }
}

static DIET: LazyLock<SectionPattern> = LazyLock::new(|| {
    section(
        r"(?i)diet(?:\s+plan)?(?:\s+recommendations)?:",
        r"(?i)activity|lifestyle|precautions",
    )
});

static ACTIVITIES: LazyLock<SectionPattern> = LazyLock::new(|| {
    section(
        r"(?i)activity(?:\s+recommendations)?(?:\s+and\s+exercise)?:",
        r"(?i)lifestyle|diet|precautions",
    )
});

static LIFESTYLE: LazyLock<SectionPattern> = LazyLock::new(|| {
    section(
        r"(?i)lifestyle(?:\s+tips)?(?:\s+modifications)?:",
        r"(?i)precautions|diet|activity",
    )
});

static PRECAUTIONS: LazyLock<SectionPattern> = LazyLock::new(|| {
    section(r"(?i)precautions?:", r"(?i)diet|lifestyle|activity")
});

/// Extract the four recommendation sections from a reply.
///
/// Categories are independent: each uses the first occurrence of its own
/// header, so sections may appear in any order.
pub fn extract_recommendations(text: &str) -> Recommendations {
    Recommendations {
        diet: extract_section(text, &DIET),
        activities: extract_section(text, &ACTIVITIES),
        lifestyle: extract_section(text, &LIFESTYLE),
        precautions: extract_section(text, &PRECAUTIONS),
    }
}

/// Text after the first header match, up to the nearest stop word or the
/// end of the reply.
fn extract_section(text: &str, pattern: &SectionPattern) -> Option<String> {
    let header = pattern.header.find(text)?;
    let rest = &text[header.end()..];
    let end = pattern.stop.find(rest).map_or(rest.len(), |m| m.start());
    Some(truncate_chars(rest[..end].trim(), MAX_SECTION_CHARS))
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        // A cut can expose trailing whitespace that was interior before.
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}
