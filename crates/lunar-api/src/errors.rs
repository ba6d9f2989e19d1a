//! HTTP エラー応答 - `{"code": <status>, "message": <text>}`

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use lunar_core::{IngestError, QueryError};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        code: status.as_u16(),
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

/// Error type returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Ingest(IngestError),
    Query(QueryError),
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        ApiError::Ingest(e)
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::Query(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => json_error(StatusCode::BAD_REQUEST, message),
            ApiError::Ingest(e @ IngestError::Validation(_)) => {
                json_error(StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Ingest(e @ IngestError::Publish(_)) => {
                json_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Query(e @ QueryError::NotFound(_)) => {
                json_error(StatusCode::NOT_FOUND, e.to_string())
            }
            ApiError::Query(e) => json_error(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }
}
