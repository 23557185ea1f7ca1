//! Response interpretation: turns a free-text health reply into structured
//! fields.
//!
//! Extraction is heuristic. Every function here is pure and infallible; a
//! reply without recognizable phrases simply produces empty fields.

pub mod diseases;
pub mod emergency;
pub mod recommendations;

pub use diseases::{extract_diseases, MAX_DISEASES, MAX_DISEASE_NAME_CHARS};
pub use emergency::{contains_emergency_keyword, EMERGENCY_KEYWORDS};
pub use recommendations::{extract_recommendations, Recommendations, MAX_SECTION_CHARS};

use serde::{Deserialize, Serialize};

use crate::models::SeverityLevel;

/// Structured view of one reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub diseases: Vec<String>,
    pub recommendations: Recommendations,
    pub emergency: bool,
}

/// Interpret a reply. `emergency` is set by a `high` severity or by any
/// emergency keyword in the text.
pub fn interpret(reply: &str, severity: SeverityLevel) -> Interpretation {
    Interpretation {
        diseases: extract_diseases(reply),
        recommendations: extract_recommendations(reply),
        emergency: severity.forces_emergency() || contains_emergency_keyword(reply),
    }
}
