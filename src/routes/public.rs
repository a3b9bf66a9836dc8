use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::content::{
    BlogPost, Comment, Education, Experience, ListQuery, Message, NewComment, NewMessage, Page,
    ProfileConfig, Project,
};
use crate::error::{AppError, AppResult};
use crate::routes::require;
use crate::state::AppState;

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/profile", get(profile))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{slug}", get(project_by_slug))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/{post}", get(post_by_slug))
        .route("/api/posts/{post}/comments", post(add_comment))
        .route("/api/experience", get(list_experience))
        .route("/api/education", get(list_education))
        .route("/api/contact", post(contact))
}

// --- Handlers ---

async fn profile(State(state): State<AppState>) -> Json<ProfileConfig> {
    Json(state.store.lock().await.profile().clone())
}

async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<Project>>> {
    let projects = state.store.lock().await.projects()?;
    Ok(Json(query.apply(projects)))
}

async fn project_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Project>> {
    state
        .store
        .lock()
        .await
        .project_by_slug(&slug)?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<BlogPost>>> {
    let posts = state.store.lock().await.posts()?;
    Ok(Json(query.apply(posts)))
}

async fn post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<BlogPost>> {
    state
        .store
        .lock()
        .await
        .post_by_slug(&slug)?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(new): Json<NewComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    require("name", &new.name)?;
    require("text", &new.text)?;

    let comment = NewComment {
        name: new.name.trim().to_string(),
        text: new.text.trim().to_string(),
    };

    state
        .store
        .lock()
        .await
        .append_comment(&id, comment)?
        .map(|c| (StatusCode::CREATED, Json(c)))
        .ok_or(AppError::NotFound)
}

async fn list_experience(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<Experience>>> {
    let entries = state.store.lock().await.experience()?;
    Ok(Json(query.apply(entries)))
}

async fn list_education(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<Education>>> {
    let entries = state.store.lock().await.education()?;
    Ok(Json(query.apply(entries)))
}

/// Contact form submission; lands in the admin inbox unread.
async fn contact(
    State(state): State<AppState>,
    Json(new): Json<NewMessage>,
) -> AppResult<(StatusCode, Json<Message>)> {
    require("name", &new.name)?;
    require("email", &new.email)?;
    require("message", &new.message)?;
    if !new.email.contains('@') {
        return Err(AppError::BadRequest("email is invalid".to_string()));
    }

    let message = state.store.lock().await.add_message(NewMessage {
        name: new.name.trim().to_string(),
        email: new.email.trim().to_string(),
        message: new.message.trim().to_string(),
    })?;
    tracing::info!("New contact message {} from {}", message.id, message.email);

    Ok((StatusCode::CREATED, Json(message)))
}
