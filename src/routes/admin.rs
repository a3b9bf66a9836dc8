use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde::Serialize;

use crate::content::{
    BlogPost, BlogPostPatch, Education, EducationPatch, Experience, ExperiencePatch, Message,
    MessagePatch, NewBlogPost, NewEducation, NewExperience, NewProject, ProfileConfig, Project,
    ProjectPatch,
};
use crate::error::{AppError, AppResult};
use crate::extractors::AdminSession;
use crate::routes::require;
use crate::state::AppState;

// --- Responses ---

#[derive(Serialize)]
pub struct UnreadCount {
    pub unread: usize,
}

#[derive(Serialize)]
pub struct MarkedRead {
    pub marked: usize,
}

#[derive(Serialize)]
pub struct Uploaded {
    pub url: String,
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/projects", get(list_projects).post(create_project))
        .route(
            "/api/admin/projects/{id}",
            patch(update_project).delete(delete_project),
        )
        .route("/api/admin/posts", get(list_posts).post(create_post))
        .route(
            "/api/admin/posts/{id}",
            patch(update_post).delete(delete_post),
        )
        .route(
            "/api/admin/experience",
            get(list_experience).post(create_experience),
        )
        .route(
            "/api/admin/experience/{id}",
            patch(update_experience).delete(delete_experience),
        )
        .route(
            "/api/admin/education",
            get(list_education).post(create_education),
        )
        .route(
            "/api/admin/education/{id}",
            patch(update_education).delete(delete_education),
        )
        .route("/api/admin/messages", get(list_messages))
        .route("/api/admin/messages/unread", get(unread_count))
        .route("/api/admin/messages/read-all", post(mark_all_read))
        .route("/api/admin/messages/{id}/read", post(mark_read))
        .route(
            "/api/admin/messages/{id}",
            patch(update_message).delete(delete_message),
        )
        .route("/api/admin/profile", put(replace_profile))
        .route("/api/admin/uploads", post(upload))
}

fn not_found(kind: &str, id: &str) -> AppError {
    tracing::warn!("Admin request for unknown {} {}", kind, id);
    AppError::NotFound
}

fn require_if_set(field: &str, value: &Option<String>) -> AppResult<()> {
    match value {
        Some(v) => require(field, v),
        None => Ok(()),
    }
}

// --- Projects ---

async fn list_projects(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(state.store.lock().await.projects()?))
}

async fn create_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(new): Json<NewProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    require("title", &new.title)?;
    let project = state.store.lock().await.add_project(new)?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn update_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProjectPatch>,
) -> AppResult<Json<Project>> {
    require_if_set("title", &patch.title)?;
    require_if_set("slug", &patch.slug)?;
    state
        .store
        .lock()
        .await
        .update_project(&id, patch)?
        .map(Json)
        .ok_or_else(|| not_found("project", &id))
}

async fn delete_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_project(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("project", &id))
    }
}

// --- Posts ---

async fn list_posts(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BlogPost>>> {
    Ok(Json(state.store.lock().await.posts()?))
}

async fn create_post(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(new): Json<NewBlogPost>,
) -> AppResult<(StatusCode, Json<BlogPost>)> {
    require("title", &new.title)?;
    let post = state.store.lock().await.add_post(new)?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<BlogPostPatch>,
) -> AppResult<Json<BlogPost>> {
    require_if_set("title", &patch.title)?;
    require_if_set("slug", &patch.slug)?;
    state
        .store
        .lock()
        .await
        .update_post(&id, patch)?
        .map(Json)
        .ok_or_else(|| not_found("post", &id))
}

async fn delete_post(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_post(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("post", &id))
    }
}

// --- Experience ---

async fn list_experience(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Experience>>> {
    Ok(Json(state.store.lock().await.experience()?))
}

async fn create_experience(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(new): Json<NewExperience>,
) -> AppResult<(StatusCode, Json<Experience>)> {
    require("role", &new.role)?;
    require("company", &new.company)?;
    let entry = state.store.lock().await.add_experience(new)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_experience(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ExperiencePatch>,
) -> AppResult<Json<Experience>> {
    require_if_set("role", &patch.role)?;
    require_if_set("company", &patch.company)?;
    state
        .store
        .lock()
        .await
        .update_experience(&id, patch)?
        .map(Json)
        .ok_or_else(|| not_found("experience", &id))
}

async fn delete_experience(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_experience(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("experience", &id))
    }
}

// --- Education ---

async fn list_education(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Education>>> {
    Ok(Json(state.store.lock().await.education()?))
}

async fn create_education(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(new): Json<NewEducation>,
) -> AppResult<(StatusCode, Json<Education>)> {
    require("degree", &new.degree)?;
    require("school", &new.school)?;
    let entry = state.store.lock().await.add_education(new)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_education(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EducationPatch>,
) -> AppResult<Json<Education>> {
    require_if_set("degree", &patch.degree)?;
    require_if_set("school", &patch.school)?;
    state
        .store
        .lock()
        .await
        .update_education(&id, patch)?
        .map(Json)
        .ok_or_else(|| not_found("education", &id))
}

async fn delete_education(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_education(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("education", &id))
    }
}

// --- Messages ---

async fn list_messages(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Message>>> {
    Ok(Json(state.store.lock().await.messages()?))
}

async fn unread_count(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<UnreadCount>> {
    let unread = state.store.lock().await.unread_count()?;
    Ok(Json(UnreadCount { unread }))
}

async fn mark_read(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if state.store.lock().await.mark_message_read(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("message", &id))
    }
}

async fn mark_all_read(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<MarkedRead>> {
    let marked = state.store.lock().await.mark_all_read()?;
    Ok(Json(MarkedRead { marked }))
}

async fn update_message(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<MessagePatch>,
) -> AppResult<Json<Message>> {
    state
        .store
        .lock()
        .await
        .update_message(&id, patch)?
        .map(Json)
        .ok_or_else(|| not_found("message", &id))
}

async fn delete_message(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_message(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("message", &id))
    }
}

// --- Profile ---

async fn replace_profile(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(profile): Json<ProfileConfig>,
) -> AppResult<Json<ProfileConfig>> {
    require("name", &profile.name)?;
    let mut store = state.store.lock().await;
    store.replace_profile(profile)?;
    Ok(Json(store.profile().clone()))
}

// --- Uploads ---

/// Multipart upload; the file must be in a field named `file`.
async fn upload(
    _admin: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Uploaded>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let url = state.uploads.save(file_name.as_deref(), &bytes)?;
        return Ok((StatusCode::CREATED, Json(Uploaded { url })));
    }

    Err(AppError::BadRequest("Missing file field".to_string()))
}
