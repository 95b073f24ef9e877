//! HTTP server runtime.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Mutex;

use super::api::router;
use super::state::SessionStore;

/// Run the vote server until Ctrl-C.
pub async fn run(host: &str, port: u16) -> crate::Result<()> {
    let store = Arc::new(Mutex::new(SessionStore::new()));
    let app = router(store);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Scrum vote server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
