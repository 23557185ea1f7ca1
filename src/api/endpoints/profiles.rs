//! Profile endpoints.
//!
//! - `GET /api/profiles/:user_id`
//! - `PUT /api/profiles/:user_id`: replaces the whole profile

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::UserProfile;

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub medical_history: Option<String>,
}

impl ProfileUpdate {
    /// Validate and turn the update into a full record. Blank text fields
    /// are stored as absent.
    fn into_profile(self, user_id: String) -> Result<UserProfile, ApiError> {
        if self.age.is_some_and(|a| a < 0) {
            return Err(ApiError::BadRequest("age cannot be negative".into()));
        }
        for (name, value) in [("height", self.height), ("weight", self.weight)] {
            if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                return Err(ApiError::BadRequest(format!("{name} must be a non-negative number")));
            }
        }

        Ok(UserProfile {
            user_id,
            full_name: non_blank(self.full_name),
            age: self.age,
            gender: non_blank(self.gender),
            height: self.height,
            weight: self.weight,
            medical_history: non_blank(self.medical_history),
            updated_at: None,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn fetch(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let conn = ctx.open_db()?;
    repository::get_profile(&conn, &user_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))
}

pub async fn save(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<UserProfile>, ApiError> {
    let Json(update) = payload?;
    let profile = update.into_profile(user_id)?;
    let conn = ctx.open_db()?;
    let saved = repository::upsert_profile(&conn, &profile)?;
    tracing::info!(user_id = %saved.user_id, "Profile saved");
    Ok(Json(saved))
}
