//! `portfolio-chat serve`: run the HTTP relay surface until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{start_chat_server, ApiContext, SharedRelay};
use crate::config::{self, RelayConfig};
use crate::pipeline::relay::AiRelay;

use super::{load_context, CommandError, ServeArgs};

/// Build the relay, then serve on a multi-threaded runtime.
///
/// The relay's HTTP client is blocking, so it is created here, before the
/// runtime exists, and handlers call it through `spawn_blocking`.
pub fn serve(args: &ServeArgs) -> Result<(), CommandError> {
    let relay_config = RelayConfig::from_env()?;
    let context = load_context(args.context.as_deref())?;
    let bind = resolve_bind(args.bind)?;

    let credential = relay_config.api_key.clone();
    if !credential.is_configured() {
        tracing::warn!("No provider credential set; every relay call will fail over to keyword answers");
    }
    tracing::info!(
        model = %relay_config.model,
        endpoint = %relay_config.endpoint,
        "Relay configured"
    );

    let relay: SharedRelay = Arc::new(AiRelay::from_config(relay_config, &context)?);
    let ctx = ApiContext::new(relay.clone(), credential);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CommandError::Runtime)?;

    let served = runtime.block_on(run_until_ctrl_c(ctx, bind));

    // Last handle on the blocking client drops outside the runtime.
    drop(runtime);
    drop(relay);

    served
}

async fn run_until_ctrl_c(ctx: ApiContext, bind: SocketAddr) -> Result<(), CommandError> {
    let mut server = start_chat_server(ctx, bind).await?;
    tracing::info!(
        addr = %server.session.server_addr,
        version = config::APP_VERSION,
        "Serving chat API (Ctrl+C to stop)"
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
    }

    server.shutdown();
    server.wait().await;
    Ok(())
}

fn resolve_bind(flag: Option<SocketAddr>) -> Result<SocketAddr, CommandError> {
    match flag {
        Some(addr) => Ok(addr),
        None => Ok(config::bind_addr()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_flag_wins() {
        let addr: SocketAddr = "0.0.0.0:9999".parse().unwrap();
        assert_eq!(resolve_bind(Some(addr)).unwrap(), addr);
    }
}
