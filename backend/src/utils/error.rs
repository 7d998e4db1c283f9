use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API Error with rich context and automatic error trait implementations
///
/// Design: Uses thiserror for ergonomic error handling with context.
/// Request-data-driven conditions (an unsupported or malformed locale) are
/// never errors: negotiation degrades to the default culture instead. The
/// variants here cover the service surface around it.
#[derive(Error, Debug)]
pub enum ApiError {
    // Resource errors 3xxx
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    // Validation errors 4xxx
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),

    // Generic wrapper for other errors - auto-convert from anyhow::Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Helper to create not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound(message.into())
    }

    /// Helper to create invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Stable error code carried in the response body
    pub fn error_code(&self) -> i32 {
        match self {
            // Resource errors 3xxx
            Self::ResourceNotFound(_) => 3000,

            // Validation errors 4xxx
            Self::InvalidInput(_) => 4002,

            // System errors 5xxx
            Self::InternalError(_) => 5001,
            Self::Other(_) => 5001,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let message = self.to_string();

        let status = match code {
            3000..=3999 => StatusCode::NOT_FOUND,
            4001..=4999 => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let response = ApiErrorResponse { code, message, details: None };

        (status, Json(response)).into_response()
    }
}

/// Implement From for serde_json::Error
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal_error(format!("JSON serialization error: {}", err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
