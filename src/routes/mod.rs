pub mod admin;
pub mod auth;
pub mod events;
pub mod public;
pub mod theme;
pub mod uploads;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart framing on top of the file itself.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

/// The full application router.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.storage.max_upload_bytes + UPLOAD_OVERHEAD_BYTES;

    Router::new()
        .merge(public::router())
        .merge(auth::router())
        .merge(theme::router())
        .merge(events::router())
        .merge(uploads::router())
        .merge(admin::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Reject blank required text fields.
pub(crate) fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}
