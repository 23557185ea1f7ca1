use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Per-user health profile. Every field is optional and the record is
/// replaced as a whole on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub full_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    /// Centimetres.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub medical_history: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}
