//! Service health check.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub gateway_configured: bool,
}

/// `GET /api/health`
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        gateway_configured: ctx.gateway_configured(),
    })
}
