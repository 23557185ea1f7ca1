//! `GET /api/users/:user_id/dashboard`: profile plus latest searches.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{HealthSearch, UserProfile};

/// Searches shown on the dashboard.
const RECENT_SEARCH_COUNT: u32 = 5;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub profile: Option<UserProfile>,
    pub recent_searches: Vec<HealthSearch>,
}

pub async fn summary(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let profile = repository::get_profile(&conn, &user_id)?;
    let recent_searches =
        repository::list_searches_for_user(&conn, &user_id, Some(RECENT_SEARCH_COUNT))?;

    Ok(Json(DashboardResponse {
        profile,
        recent_searches,
    }))
}
