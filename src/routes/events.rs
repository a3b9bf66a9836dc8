use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::Router;
use futures::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/events", get(events))
}

/// Live feed of store changes as server-sent events.
async fn events(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(|received| async move {
        match received {
            Ok(event) => match Event::default().json_data(&event) {
                Ok(sse) => Some(Ok(sse)),
                Err(e) => {
                    tracing::warn!("Failed to encode store event: {}", e);
                    None
                }
            },
            // Slow clients skip what they missed.
            Err(e) => {
                tracing::debug!("Event subscriber lagged: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
