use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of condition names kept from one reply.
pub const MAX_DISEASES: usize = 5;

/// Condition names must be strictly shorter than this (in characters).
/// Longer entries are dropped, not truncated.
pub const MAX_DISEASE_NAME_CHARS: usize = 50;

/// Introductory phrases that precede a same-line list of conditions.
/// Order matters: candidates accumulate in pattern order.
static DISEASE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)possible (?:conditions?|diseases?):\s*([^\n]+)",
        r"(?i)may (?:have|be|indicate):\s*([^\n]+)",
        r"(?i)could be:\s*([^\n]+)",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("Invalid disease regex pattern"))
    .collect()
});

static ITEM_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;\n]").expect("Invalid separator regex"));

/// Pull candidate condition names out of a free-text reply.
///
/// Each pattern is matched once against the whole text, independently of
/// the others. Returns an empty list when no phrase is present.
pub fn extract_diseases(text: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for pattern in DISEASE_PATTERNS.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let Some(list) = caps.get(1) else {
            continue;
        };
        candidates.extend(
            ITEM_SEPARATOR
                .split(list.as_str())
                .map(str::trim)
                .filter(|item| is_plausible_name(item))
                .map(str::to_string),
        );
    }

    let mut unique: Vec<String> = Vec::with_capacity(MAX_DISEASES);
    for candidate in candidates {
        if unique.len() == MAX_DISEASES {
            break;
        }
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

fn is_plausible_name(item: &str) -> bool {
    let len = item.chars().count();
    len > 0 && len < MAX_DISEASE_NAME_CHARS
}
