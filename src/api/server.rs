//! Chat API server lifecycle: bind, spawn the axum server in a background
//! task, return a handle with a shutdown channel.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::chat_api_router;
use crate::api::types::ApiContext;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind chat API server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Failed to get server address: {0}")]
    LocalAddr(std::io::Error),
}

/// Session metadata for a running server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running chat API server.
pub struct ChatServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ChatServer {
    /// Base URL clients (e.g. `RemoteRelay`) should call.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.session.server_addr)
    }

    /// Signal a graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Chat API server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn wait(self) {
        if let Err(e) = self.task.await {
            tracing::error!("Chat API server task failed: {e}");
        }
    }
}

/// Bind `addr` (port 0 picks an ephemeral port) and serve the chat API
/// in a background task.
pub async fn start_chat_server(
    ctx: ApiContext,
    addr: SocketAddr,
) -> Result<ChatServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let local = listener.local_addr().map_err(ServerError::LocalAddr)?;

    let app = chat_api_router(ctx);

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: local.to_string(),
        port: local.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Chat API server received shutdown signal");
        };

        tracing::info!(addr = %local, "Chat API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Chat API server error: {e}");
        }

        tracing::info!("Chat API server stopped");
    });

    Ok(ChatServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    use crate::config::ApiKeySource;
    use crate::pipeline::relay::testing::ScriptedRelay;
    use crate::pipeline::relay::{ChatTurn, Relay, RelayOutcome, RemoteRelay};

    fn loopback() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    fn test_ctx(relay: ScriptedRelay) -> ApiContext {
        ApiContext::new(Arc::new(relay), ApiKeySource::Fixed("sk-test".into()))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let mut server = start_chat_server(test_ctx(ScriptedRelay::replying("hi")), loopback())
            .await
            .expect("server should start");

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);

        let url = format!("{}/api/health", server.base_url());
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let mut server = start_chat_server(test_ctx(ScriptedRelay::replying("hi")), loopback())
            .await
            .expect("server should start");

        let url = format!("{}/nonexistent", server.base_url());
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_chat_server(test_ctx(ScriptedRelay::replying("hi")), loopback())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown(); // Second call should be safe
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let mut first = start_chat_server(test_ctx(ScriptedRelay::replying("hi")), loopback())
            .await
            .expect("server should start");
        let taken: SocketAddr = first.session.server_addr.parse().unwrap();

        let second = start_chat_server(test_ctx(ScriptedRelay::replying("hi")), taken).await;
        assert!(matches!(second, Err(ServerError::Bind { .. })));

        first.shutdown();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn remote_relay_round_trips_through_server() {
        let mut server = start_chat_server(
            test_ctx(ScriptedRelay::replying("Daniel built Metropoint in 2023.")),
            loopback(),
        )
        .await
        .expect("server should start");
        let base = server.base_url();

        let outcome = tokio::task::spawn_blocking(move || {
            let relay = RemoteRelay::new(&base, 5).unwrap();
            relay.relay(&[ChatTurn::user("Tell me about Metropoint")])
        })
        .await
        .unwrap();

        assert_eq!(
            outcome,
            RelayOutcome::Reply("Daniel built Metropoint in 2023.".into())
        );

        server.shutdown();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn remote_relay_carries_server_failure_reason() {
        let mut server = start_chat_server(
            test_ctx(ScriptedRelay::failing("missing credential")),
            loopback(),
        )
        .await
        .expect("server should start");
        let base = server.base_url();

        let outcome = tokio::task::spawn_blocking(move || {
            let relay = RemoteRelay::new(&base, 5).unwrap();
            relay.relay(&[ChatTurn::user("hello")])
        })
        .await
        .unwrap();

        assert_eq!(outcome, RelayOutcome::Failed("missing credential".into()));

        server.shutdown();
    }
}
