//! Request handlers.

use super::{ApiError, AppState};
use crate::document::{Post, User};
use crate::error::Result;
use crate::store::Store;
use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Json, Response};
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /api/chirps`.
#[derive(Debug, Deserialize)]
pub struct NewChirp {
    /// Raw text, checked and filtered before storing.
    pub body: String,
}

/// Body of `POST /api/users`.
#[derive(Debug, Deserialize)]
pub struct NewUser {
    /// Stored as given.
    pub email: String,
}

/// Counts requests to the file server.
pub async fn count_hits(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.record_hit();
    next.run(request).await
}

/// GET /api/healthz
pub async fn readiness() -> &'static str {
    "OK"
}

/// GET /api/reset - zero the hit counter
pub async fn reset_hits(State(state): State<AppState>) -> &'static str {
    state.reset_hits();
    "OK"
}

/// GET /admin/metrics
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html><body><h1>Welcome, Chirpy Admin</h1><p>Chirpy has been visited {} times!</p></body></html>",
        state.hits()
    ))
}

// ---- chirps ----

/// POST /api/chirps
pub async fn create_chirp(
    State(state): State<AppState>,
    payload: Bytes,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let NewChirp { body } = decode(&payload)?;
    let body = state.filter.validate_post(&body)?;
    let post = blocking(&state, move |store| store.posts().create(body)).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/chirps
pub async fn list_chirps(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<Post>>, ApiError> {
    let posts = blocking(&state, |store| store.posts().list()).await?;
    Ok(Json(posts))
}

/// GET /api/chirps/:id
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<Post>, ApiError> {
    let id = parse_id(&id, "chirp")?;
    let post = blocking(&state, move |store| store.posts().get(id)).await?;
    Ok(Json(post))
}

// ---- users ----

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Bytes,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let NewUser { email } = decode(&payload)?;
    let user = blocking(&state, move |store| store.users().create(email)).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<User>>, ApiError> {
    let users = blocking(&state, |store| store.users().list()).await?;
    Ok(Json(users))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<User>, ApiError> {
    let id = parse_id(&id, "user")?;
    let user = blocking(&state, move |store| store.users().get(id)).await?;
    Ok(Json(user))
}

// ---- helpers ----

fn decode<T: for<'de> Deserialize<'de>>(payload: &[u8]) -> std::result::Result<T, ApiError> {
    serde_json::from_slice(payload)
        .map_err(|e| ApiError::bad_request(format!("Couldn't decode parameters: {e}")))
}

fn parse_id(raw: &str, kind: &str) -> std::result::Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {kind} ID")))
}

async fn blocking<T, F>(state: &AppState, f: F) -> std::result::Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Store) -> Result<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(ApiError::from)
}
