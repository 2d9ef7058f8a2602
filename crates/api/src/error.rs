//! Service Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use datasets::DatasetError;
use serde::Serialize;
use thiserror::Error;

/// Errors that stop the service from starting or serving
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),
    #[error(transparent)]
    Datasets(#[from] DatasetError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("Metrics setup failed: {0}")]
    Metrics(String),
    #[error("Invalid rate limit configuration: {0}")]
    RateLimit(String),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors answered to an HTTP client
#[derive(Debug, Error)]
pub enum RequestError {
    /// Blank query text
    #[error("{}", query_router::BLANK_QUERY_WARNING)]
    BlankQuery,
    /// Preview requested for a table that does not exist
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = match self {
            RequestError::BlankQuery => StatusCode::BAD_REQUEST,
            RequestError::UnknownTable(_) => StatusCode::NOT_FOUND,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
