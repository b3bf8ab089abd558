//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the provider credential is present right now. Without it
    /// every relay call fails and clients fall back to keyword answers.
    pub credential_configured: bool,
}

/// `GET /api/health`: liveness plus credential presence.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        credential_configured: ctx.credential.is_configured(),
    })
}
