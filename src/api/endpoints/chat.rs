//! Chat endpoints.
//!
//! - `POST /api/chat`: relay a conversation to the provider
//! - `POST /api/chat/fallback`: keyword answer for one message
//! - `GET /api/chat/config`: greeting and suggestion chips

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chat::ChatWidgetConfig;
use crate::config::MAX_MESSAGE_CHARS;
use crate::models::MessageRole;
use crate::pipeline::relay::types::{ChatRelayRequest, ChatRelayResponse};
use crate::pipeline::relay::ChatTurn;

/// `POST /api/chat`: run the AI relay over the posted history.
///
/// Relay failures are reported in-band as `{success: false, error}` so the
/// caller can run its own fallback. Only malformed input is an HTTP error.
pub async fn relay(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ChatRelayRequest>, JsonRejection>,
) -> Result<Json<ChatRelayResponse>, ApiError> {
    let Json(req) = payload?;
    validate_messages(&req.messages)?;

    let relay = ctx.relay.clone();
    let messages = req.messages;
    let outcome = tokio::task::spawn_blocking(move || relay.relay(&messages)).await?;

    Ok(Json(outcome.into()))
}

#[derive(Debug, Deserialize)]
pub struct FallbackRequest {
    pub message: String,
}

/// `POST /api/chat/fallback`: deterministic keyword answer.
pub async fn fallback(
    State(ctx): State<ApiContext>,
    payload: Result<Json<FallbackRequest>, JsonRejection>,
) -> Result<Json<ChatRelayResponse>, ApiError> {
    let Json(req) = payload?;
    check_length(&req.message)?;

    Ok(Json(ChatRelayResponse {
        success: true,
        message: ctx.fallback.respond(&req.message),
        error: None,
    }))
}

#[derive(Serialize)]
pub struct WidgetConfigResponse {
    pub greeting: String,
    pub suggestions: Vec<String>,
}

impl From<&ChatWidgetConfig> for WidgetConfigResponse {
    fn from(config: &ChatWidgetConfig) -> Self {
        Self {
            greeting: config.greeting.clone(),
            suggestions: config.suggestions.clone(),
        }
    }
}

/// `GET /api/chat/config`: content for a fresh widget session.
pub async fn widget_config(State(ctx): State<ApiContext>) -> Json<WidgetConfigResponse> {
    Json(WidgetConfigResponse::from(ctx.widget.as_ref()))
}

fn validate_messages(messages: &[ChatTurn]) -> Result<(), ApiError> {
    if messages.is_empty() {
        return Err(ApiError::BadRequest("At least one message is required".into()));
    }
    for turn in messages {
        if turn.content.trim().is_empty() {
            return Err(ApiError::BadRequest("Message cannot be empty".into()));
        }
        // Assistant turns are this server's own earlier replies
        if turn.role == MessageRole::User {
            check_length(&turn.content)?;
        }
    }
    Ok(())
}

fn check_length(content: &str) -> Result<(), ApiError> {
    if content.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Message too long (max {MAX_MESSAGE_CHARS} chars)"
        )));
    }
    Ok(())
}
