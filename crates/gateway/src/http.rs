use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use cats_mcp_core::dispatch::{Dispatcher, TransportMode};
use cats_mcp_core::rpc::JsonRpcResponse;

pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/", post(handle_rpc))
        .route("/health", get(health))
        .with_state(dispatcher)
}

/// The body is taken as raw text so that unparseable input still gets a
/// JSON-RPC Parse error envelope. The HTTP status is always 200; outcomes
/// live inside the envelope.
async fn handle_rpc(
    State(dispatcher): State<Arc<Dispatcher>>,
    body: String,
) -> Json<JsonRpcResponse> {
    Json(dispatcher.handle_request(&body, TransportMode::Http).await)
}

async fn health() -> &'static str {
    "OK"
}

pub async fn serve(dispatcher: Arc<Dispatcher>, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(dispatcher);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("cats gateway listening on port {port}");
    axum::serve(listener, app).await?;
    Ok(())
}
