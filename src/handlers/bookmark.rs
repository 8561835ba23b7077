//! Bookmark handlers: root document, list, create, read.

use crate::error::AppError;
use crate::hal::{BookmarkCollection, BookmarkResource, RootDocument, HAL_JSON};
use crate::model::NewBookmark;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};

fn hal<T: serde::Serialize>(body: T) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, HAL_JSON)], Json(body))
}

fn parse_bookmark_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid bookmark id '{}'", raw)))
}

/// GET /bookmarks — one link per known user.
#[utoipa::path(
    get,
    path = "/bookmarks",
    responses((status = 200, description = "Link per account", body = RootDocument))
)]
pub async fn root(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let doc = state.service.root().await?;
    Ok(hal(doc))
}

/// GET /bookmarks/:user_id
#[utoipa::path(
    get,
    path = "/bookmarks/{user_id}",
    params(("user_id" = String, Path, description = "Account username")),
    responses(
        (status = 200, description = "Bookmarks owned by the user", body = BookmarkCollection),
        (status = 404, description = "Unknown user", body = crate::error::ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let collection = state.service.list(&user_id).await?;
    Ok(hal(collection))
}

/// POST /bookmarks/:user_id — 201 with `Location` set to the new bookmark.
#[utoipa::path(
    post,
    path = "/bookmarks/{user_id}",
    params(("user_id" = String, Path, description = "Account username")),
    request_body = NewBookmark,
    responses(
        (status = 201, description = "Created; Location points at the bookmark"),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown user", body = crate::error::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<NewBookmark>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (_, location) = state.service.create(&user_id, input).await?;
    let location = HeaderValue::try_from(location.as_str())
        .map_err(|e| AppError::Assembly(format!("location '{}': {}", location, e)))?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

/// GET /bookmarks/:user_id/:bookmark_id
#[utoipa::path(
    get,
    path = "/bookmarks/{user_id}/{bookmark_id}",
    params(
        ("user_id" = String, Path, description = "Account username"),
        ("bookmark_id" = i64, Path, description = "Bookmark id")
    ),
    responses(
        (status = 200, description = "The bookmark", body = BookmarkResource),
        (status = 400, description = "Malformed bookmark id", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown user or bookmark", body = crate::error::ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path((user_id, bookmark_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let bookmark_id = parse_bookmark_id(&bookmark_id)?;
    let resource = state.service.read(&user_id, bookmark_id).await?;
    Ok(hal(resource))
}
