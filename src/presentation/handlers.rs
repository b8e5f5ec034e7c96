// HTTP request handlers
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    response::sse::{Event, KeepAlive, Sse},
};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::presentation::app_state::AppState;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Snapshots of every mounted widget, in mount order.
pub async fn list_widgets(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.controller.snapshots())
}

/// Snapshot of one widget, or 404 once it is unmounted.
pub async fn get_widget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.controller.query(&id) {
        Some(snapshot) => Json(snapshot).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub url: String,
}

/// Click-to-open target for one widget.
pub async fn widget_link(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.controller.link(&id) {
        Some(url) => Json(LinkResponse { url }).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Server-sent events: one `widget` event per applied fetch outcome.
/// Subscribers that lag simply miss updates; the next event carries the
/// full snapshot, so nothing needs replaying.
pub async fn stream_updates(
    State(state): State<Arc<AppState>>,
) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
    let updates = state.controller.subscribe();
    let stream = BroadcastStream::new(updates).filter_map(|update| {
        let snapshot = update.ok()?;
        let event = Event::default().event("widget").json_data(&snapshot).ok()?;
        Some(Ok(event))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
