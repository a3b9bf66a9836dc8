use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extractors::get_cookie_value;
use crate::state::AppState;

// -- Request / response types --

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
}

// -- Cookie helpers --

fn session_cookie(name: &str, token: &str, max_age_hours: u64) -> String {
    let max_age_secs = max_age_hours * 3600;
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        name, token, max_age_secs
    )
}

fn clear_session_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0", name)
}

// -- Handlers --

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Response> {
    if !state.credentials.verify(&req.email, &req.password).await? {
        tracing::warn!("Rejected admin login for {}", req.email);
        return Err(AppError::Unauthorized);
    }

    let token = state.sessions.lock().await.create();
    state.store.lock().await.login();
    tracing::info!("Admin {} logged in", req.email);

    let cookie = session_cookie(
        &state.config.auth.cookie_name,
        &token,
        state.config.auth.session_hours,
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthStatus {
            authenticated: true,
        }),
    )
        .into_response())
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, request: Request) -> AppResult<Response> {
    let (parts, _body) = request.into_parts();
    let cookie_name = &state.config.auth.cookie_name;

    if let Some(token) = get_cookie_value(&parts, cookie_name) {
        state.sessions.lock().await.revoke(token);
    }
    close_gate_if_idle(&state).await;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie(cookie_name))],
        Json(AuthStatus {
            authenticated: false,
        }),
    )
        .into_response())
}

/// GET /api/auth/status
pub async fn status(State(state): State<AppState>) -> Json<AuthStatus> {
    close_gate_if_idle(&state).await;
    Json(AuthStatus {
        authenticated: state.store.lock().await.is_authenticated(),
    })
}

/// Log the store out once no admin session is live, expired ones included.
/// The gate stays open while any other session remains.
async fn close_gate_if_idle(state: &AppState) {
    let mut sessions = state.sessions.lock().await;
    if sessions.active_count() > 0 {
        return;
    }

    let mut store = state.store.lock().await;
    if store.is_authenticated() {
        tracing::info!("No live admin sessions, closing the admin gate");
        store.logout();
    }
}
