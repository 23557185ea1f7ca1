//! `POST /api/health-analysis`: forward a conversation to the gateway and
//! return the reply with its interpreted fields. Nothing is persisted here.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::analysis::AnalysisOutcome;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{ChatTurn, SeverityLevel};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAnalysisRequest {
    pub messages: Vec<ChatTurn>,
    pub severity_level: SeverityLevel,
    #[serde(default)]
    pub user_id: Option<String>,
}

pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<HealthAnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisOutcome>, ApiError> {
    let Json(req) = payload?;
    if req.messages.is_empty() {
        return Err(ApiError::BadRequest("messages cannot be empty".into()));
    }

    tracing::info!(
        user_id = req.user_id.as_deref().unwrap_or("anonymous"),
        severity = %req.severity_level,
        turns = req.messages.len(),
        "Processing health analysis"
    );

    let outcome = ctx
        .analyzer
        .analyze_conversation(&req.messages, req.severity_level)
        .await?;

    Ok(Json(outcome))
}
