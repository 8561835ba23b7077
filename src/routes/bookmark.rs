//! Bookmark routes plus the OpenAPI document.

use crate::doc::ApiDoc;
use crate::handlers::bookmark::{create, list, read, root};
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Maximum accepted request body.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /bookmarks, GET|POST /bookmarks/:user_id, GET /bookmarks/:user_id/:bookmark_id, GET /openapi.json.
pub fn bookmark_routes(state: AppState) -> Router {
    Router::new()
        .route("/bookmarks", get(root))
        .route("/bookmarks/:user_id", get(list).post(create))
        .route("/bookmarks/:user_id/:bookmark_id", get(read))
        .route("/openapi.json", get(openapi))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES)),
        )
        .with_state(state)
}
