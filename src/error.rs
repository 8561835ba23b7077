//! Typed errors and HTTP mapping.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Content type of the error envelope.
pub const VND_ERROR_JSON: &str = "application/vnd.error+json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("invalid schema name '{0}' (expected a plain identifier)")]
    SchemaName(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("could not find user '{0}'.")]
    UserNotFound(String),
    #[error("could not find bookmark '{0}'.")]
    BookmarkNotFound(String),
    /// Building a hypermedia representation failed for a bookmark that exists.
    #[error("resource assembly failed: {0}")]
    Assembly(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store: {0}")]
    Store(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UserNotFound(_) | AppError::BookmarkNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Assembly(_) | AppError::Db(_) | AppError::Store(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// vnd.error envelope: one entry per raised error.
#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct ErrorBody {
    pub logref: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody {
            logref: "error".into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        let mut response = (status, Json(ErrorBody::new(message))).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(VND_ERROR_JSON));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::UserNotFound("carol".into()), "could not find user 'carol'.")]
    #[case(AppError::BookmarkNotFound("99".into()), "could not find bookmark '99'.")]
    fn not_found_messages_name_the_missing_id(#[case] err: AppError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_map_to_500() {
        assert_eq!(
            AppError::Assembly("bad href".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Store("poisoned".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn envelope_carries_vnd_error_content_type() {
        let response = AppError::UserNotFound("carol".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            VND_ERROR_JSON
        );
    }
}
