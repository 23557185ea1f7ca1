use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::SeverityLevel;
use crate::interpreter::Recommendations;

/// One persisted symptom analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSearch {
    pub id: Uuid,
    pub user_id: String,
    pub symptoms: String,
    pub severity_level: SeverityLevel,
    pub predicted_diseases: Vec<String>,
    pub recommendations: Recommendations,
    pub emergency_triggered: bool,
    pub search_location: Option<String>,
    pub created_at: NaiveDateTime,
}
