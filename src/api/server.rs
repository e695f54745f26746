//! HTTP server lifecycle: bind, serve, shut down on Ctrl-C.

use std::io;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Bind the listener. Split from [`serve`] so callers (and tests) can
/// learn the actual address when binding to port 0.
pub async fn bind(addr: SocketAddr) -> io::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    Ok((listener, local))
}

/// Serve the API until Ctrl-C.
pub async fn serve(listener: TcpListener, ctx: ApiContext) -> io::Result<()> {
    let app = api_router(ctx);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {e}");
        }
        tracing::info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_to_ephemeral_port_reports_real_address() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let (_listener, local) = bind(addr).await.unwrap();
        assert!(local.port() > 0);
        assert!(local.ip().is_loopback());
    }
}
