//! API Error Module
//!
//! Maps content errors onto HTTP statuses and the `{error, message, details}`
//! body. Full details are logged server-side.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use copilot_core::{CopilotError, ErrorKind};
use tracing::{error, warn};

use crate::models::ErrorBody;

/// Errors returned by the handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller input was rejected
    #[error("{0}")]
    Validation(String),

    /// A content operation failed
    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: CopilotError,
    },
}

impl ApiError {
    /// Wrap an operation error; validation failures keep their own message
    pub fn operation(operation: &'static str, source: CopilotError) -> Self {
        match source {
            CopilotError::Validation(message) => ApiError::Validation(message),
            source => ApiError::Operation { operation, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::Operation { source, .. } => source.kind(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(message) => ErrorBody {
                error: ErrorKind::Validation.as_str().to_string(),
                message: message.clone(),
                details: None,
            },
            ApiError::Operation { operation, source } => ErrorBody {
                error: source.kind().as_str().to_string(),
                message: format!("{} failed", operation),
                details: Some(source.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Validation(message) => warn!(%message, "Rejected request"),
            ApiError::Operation { operation, source } => error!(
                operation = *operation,
                kind = %source.kind(),
                error = %source,
                "Operation failed"
            ),
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
