//! HTTP relay router.
//!
//! Returns a composable `Router` with all routes nested under `/api/`.
//! Layers (outermost → innermost): CORS → Cache-Control → handler.

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the chat API router.
///
/// CORS is permissive so the widget can call it from any portfolio origin.
/// Replies are never cached.
pub fn chat_api_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/chat", post(endpoints::chat::relay))
        .route("/chat/config", get(endpoints::chat::widget_config))
        .route("/chat/fallback", post(endpoints::chat::fallback))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CorsLayer::permissive())
}
