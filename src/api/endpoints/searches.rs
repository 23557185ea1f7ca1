//! Analysis history endpoints.
//!
//! - `GET /api/users/:user_id/searches`: a user's searches, newest first
//! - `GET /api/searches/:id`: one search
//! - `DELETE /api/searches/:id`: remove one search

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::HealthSearch;

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct SearchListResponse {
    pub searches: Vec<HealthSearch>,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<SearchListResponse>, ApiError> {
    let Query(query) = query?;
    let conn = ctx.open_db()?;
    let searches = repository::list_searches_for_user(&conn, &user_id, query.limit)?;
    Ok(Json(SearchListResponse { searches }))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<HealthSearch>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    repository::get_search(&conn, &id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Search not found".into()))
}

pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    repository::delete_search(&conn, &id)?;
    tracing::info!(search_id = %id, "Search deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid ID format".into()))
}
