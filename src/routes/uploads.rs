use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::uploads::PUBLIC_PREFIX;

pub fn router() -> Router<AppState> {
    Router::new().route(&format!("{}/{{name}}", PUBLIC_PREFIX), get(serve))
}

pub async fn serve(State(state): State<AppState>, Path(name): Path<String>) -> AppResult<Response> {
    let bytes = state.uploads.read(&name)?.ok_or(AppError::NotFound)?;
    let mime = mime_guess::from_path(&name).first_or_octet_stream();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
        ],
        bytes,
    )
        .into_response())
}
