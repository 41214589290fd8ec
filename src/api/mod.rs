//! HTTP layer exposing interaction-type prediction.

pub mod routes;
pub mod types;

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::interaction::InteractionService;

#[derive(Clone)]
pub struct AppState {
    pub service: InteractionService,
}

/// Build the router without binding a socket.
pub fn router(service: InteractionService) -> Router {
    let state = AppState { service };
    Router::new()
        .route("/home", get(routes::home))
        .route("/about", get(routes::about))
        .route("/health", get(routes::health))
        .route("/Drug_interaction", post(routes::drug_interaction))
        .route("/drug_interaction", post(routes::drug_interaction))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(service: InteractionService, host: String, port: u16) -> Result<()> {
    let router = router(service);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving ddi-predictor API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
