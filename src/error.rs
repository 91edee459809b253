use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::api::ErrorResponse;

pub const NOT_FOUND_MESSAGE: &str = "Bookmark doesn't exist";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized request";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Url,
    Description,
    Rating,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Url => "url",
            Field::Description => "description",
            Field::Rating => "rating",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing '{0}' in request body")]
    MissingField(Field),
    #[error("Request must contain 'title', 'url', 'description', or 'rating'")]
    NoFieldsProvided,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error")]
    Database(#[from] libsql::Error),
    #[error("insert returned no row")]
    NoRowReturned,
    #[error("unsupported value in column {column}: {value:?}")]
    UnsupportedValue { column: &'static str, value: libsql::Value },
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("failed to read request body")]
    Body(#[from] BytesRejection),
    #[error("storage failure")]
    Storage(#[from] StorageError),
}

/// Attached to 500 responses so the fault renderer can decide how much of
/// the failure to show.
#[derive(Debug, Clone)]
pub struct InternalFault {
    pub message: String,
    pub detail: String,
}

impl InternalFault {
    pub fn from_error(err: &(dyn std::error::Error)) -> Self {
        InternalFault {
            message: err.to_string(),
            detail: crate::unpack_error(err),
        }
    }

    pub fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(&e.to_string()))).into_response()
            }
            ApiError::InvalidBody(reason) => {
                let message = format!("Invalid request body: {reason}");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(&message))).into_response()
            }
            ApiError::Body(rejection) => {
                (rejection.status(), Json(ErrorResponse::new(&rejection.body_text()))).into_response()
            }
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(NOT_FOUND_MESSAGE))).into_response()
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": UNAUTHORIZED_MESSAGE })),
            )
                .into_response(),
            ApiError::Storage(e) => {
                tracing::error!(error = %crate::unpack_error(&e), "storage failure");
                InternalFault::from_error(&e).into_response()
            }
        }
    }
}
