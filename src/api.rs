use crate::session::SessionManager;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

pub fn make_router(manager: Arc<SessionManager>) -> Router {
    Router::new().route("/status", get(get_status)).with_state(manager)
}

/// Serves the status endpoint until the listener fails.
pub async fn serve(manager: Arc<SessionManager>, port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    log::info!("Status endpoint listening on {}", listener.local_addr()?);
    axum::serve(listener, make_router(manager)).await?;
    Ok(())
}

async fn get_status(State(manager): State<Arc<SessionManager>>) -> Result<Json<impl Serialize>, StatusCode> {
    Ok(Json(json!({
        "num_games": manager.num_games(),
        "num_running": manager.num_running()
    })))
}
