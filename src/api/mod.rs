//! HTTP relay surface.
//!
//! Exposes the AI relay and the keyword fallback as JSON endpoints for the
//! browser chat widget, so the provider credential stays server-side.
//! Routes are nested under `/api/`.
//!
//! The router is composable: `chat_api_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::chat_api_router;
pub use server::{start_chat_server, ChatServer, ServerError, ServerSession};
pub use types::{ApiContext, SharedRelay};
