//! `POST /api/chat`: one send from the symptom chat.
//!
//! Runs an analysis on the conversation plus the new message and records
//! it in the user's history. On failure nothing is stored and the body
//! carries a fallback assistant turn for the client to display.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::AnalysisError;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::interpreter::Interpretation;
use crate::models::{ChatTurn, HealthSearch, SeverityLevel};

/// Assistant turn shown when an analysis could not be completed.
pub const FALLBACK_REPLY: &str = "I apologize, but I encountered an error. Please try again.";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    pub message: String,
    pub severity_level: SeverityLevel,
    pub user_id: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// `None` when the analysis succeeded but could not be saved.
    pub search_id: Option<Uuid>,
    pub reply: ChatTurn,
    #[serde(flatten)]
    pub interpretation: Interpretation,
}

/// Error response for the chat flow: the usual error body plus the
/// fallback reply.
pub struct ChatFailure(pub ApiError);

#[derive(Serialize)]
struct ChatFailureBody {
    error: String,
    code: &'static str,
    reply: ChatTurn,
}

impl IntoResponse for ChatFailure {
    fn into_response(self) -> Response {
        let (status, code, error) = self.0.parts();
        let body = ChatFailureBody {
            error,
            code,
            reply: ChatTurn::assistant(FALLBACK_REPLY),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ApiError> for ChatFailure {
    fn from(err: ApiError) -> Self {
        ChatFailure(err)
    }
}

impl From<AnalysisError> for ChatFailure {
    fn from(err: AnalysisError) -> Self {
        ChatFailure(err.into())
    }
}

impl From<JsonRejection> for ChatFailure {
    fn from(rejection: JsonRejection) -> Self {
        ChatFailure(rejection.into())
    }
}

pub async fn send(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatFailure> {
    let Json(req) = payload?;

    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".into()).into());
    }
    if req.user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("userId is required".into()).into());
    }

    tracing::info!(
        user_id = %req.user_id,
        severity = %req.severity_level,
        "Processing chat message"
    );

    let outcome = ctx
        .analyzer
        .analyze(&req.history, ChatTurn::user(message), req.severity_level)
        .await?;

    let search = HealthSearch {
        id: Uuid::new_v4(),
        user_id: req.user_id.clone(),
        symptoms: message.to_string(),
        severity_level: req.severity_level,
        predicted_diseases: outcome.interpretation.diseases.clone(),
        recommendations: outcome.interpretation.recommendations.clone(),
        emergency_triggered: outcome.interpretation.emergency,
        search_location: req
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string),
        created_at: Utc::now().naive_utc(),
    };

    // The reply is still returned if saving fails.
    let search_id = match ctx
        .open_db()
        .and_then(|conn| repository::insert_search(&conn, &search))
    {
        Ok(()) => Some(search.id),
        Err(e) => {
            tracing::error!(error = %e, user_id = %req.user_id, "Failed to save analysis");
            None
        }
    };

    Ok(Json(ChatResponse {
        search_id,
        reply: ChatTurn::assistant(outcome.response),
        interpretation: outcome.interpretation,
    }))
}
