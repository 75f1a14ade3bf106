//! HTTP server lifecycle for the booking service.
//!
//! Pattern: bind → spawn background task → return handle with
//! shutdown channel. The binary keeps the handle alive until Ctrl-C;
//! tests bind port 0 and drive the server over real sockets.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::booking_router;
use crate::api::types::ApiContext;

/// Handle to a running booking server.
pub struct BookingServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl BookingServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("booking server shutdown signal sent");
        }
    }
}

/// Start the booking server on the given address.
///
/// Binds the listener, mounts `booking_router`, and spawns the axum
/// server in a background tokio task. Returns a handle carrying the
/// bound address (useful when binding port 0) and a shutdown channel.
pub async fn start_server(ctx: ApiContext, bind: SocketAddr) -> Result<BookingServer, String> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| format!("failed to bind {bind}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("failed to get server address: {e}"))?;

    let app = booking_router(ctx);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("booking server received shutdown signal");
        };

        tracing::info!(%addr, "booking server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("booking server error: {e}");
        }

        tracing::info!("booking server stopped");
    });

    Ok(BookingServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BusinessHours;
    use crate::db::open_memory_database;

    fn test_ctx() -> ApiContext {
        let conn = open_memory_database().unwrap();
        ApiContext::new(conn, BusinessHours::default(), "server-test-token")
    }

    fn localhost() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let mut server = start_server(test_ctx(), localhost())
            .await
            .expect("server should start");

        assert!(server.addr.port() > 0);

        let url = format!("http://{}/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn protected_route_rejected_over_http() {
        let mut server = start_server(test_ctx(), localhost())
            .await
            .expect("server should start");

        let url = format!("http://{}/logs-agendamentos", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

        let client = reqwest::Client::new();
        let resp = client
            .get(&url)
            .bearer_auth("server-test-token")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_server(test_ctx(), localhost())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown();
    }
}
