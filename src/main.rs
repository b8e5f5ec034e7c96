// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use axum::{Router, routing::get};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::controller::DashboardController;
use crate::infrastructure::catalog::builtin_widgets;
use crate::infrastructure::config::load_config;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_widget, health_check, list_widgets, stream_updates, widget_link,
};

const USER_AGENT: &str = concat!("api-dashboard/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration; a missing API key surfaces per-widget at fetch
    // time, not here.
    let config = load_config()?;

    // One HTTP client shared by every fetcher. Some of the APIs reject
    // requests without a User-Agent.
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    // Mount the dashboard (application layer): one widget state and one
    // refresh scheduler per built-in source.
    let controller = DashboardController::mount(builtin_widgets(&client, &config));
    let state = Arc::new(AppState { controller });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/widgets", get(list_widgets))
        .route("/widgets/:id", get(get_widget))
        .route("/widgets/:id/link", get(widget_link))
        .route("/stream", get(stream_updates))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let addr: SocketAddr = config.server.listen_addr.parse()?;
    tracing::info!(%addr, "starting api-dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    // Stop every scheduler before exiting; in-flight fetches are abandoned.
    state.controller.unmount();

    Ok(())
}
