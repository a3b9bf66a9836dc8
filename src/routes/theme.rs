use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;
use crate::store::Theme;

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/theme", get(current))
        .route("/api/theme/toggle", post(toggle))
}

async fn current(State(state): State<AppState>) -> Json<ThemeResponse> {
    let theme = state.store.lock().await.theme();
    Json(ThemeResponse { theme })
}

/// Visitors may flip the theme; it is a site-wide display preference.
async fn toggle(State(state): State<AppState>) -> AppResult<Json<ThemeResponse>> {
    let theme = state.store.lock().await.toggle_theme()?;
    tracing::info!("Theme switched to {}", theme);
    Ok(Json(ThemeResponse { theme }))
}
