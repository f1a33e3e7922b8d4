// Proxy error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::rates::RateError;
use crate::upstream::UpstreamError;

/// Every proxy failure renders as `{ "message": ... }` with one of these statuses,
/// so callers never need to know which proxy produced it.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // Upstream non-success, relayed with upstream's own status
    Upstream { status: StatusCode, message: String },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => *status,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Upstream { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn upstream(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn internal_server_error() -> Self {
        ApiError::InternalServerError("Internal Server Error".to_string())
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Rejected { status, message } => ApiError::upstream(status, message),
            UpstreamError::Transport(e) => {
                // Don't expose transport details to clients
                tracing::error!("Upstream transport error: {}", e);
                ApiError::internal_server_error()
            }
            UpstreamError::Decode(e) => {
                tracing::error!("Upstream payload could not be decoded: {}", e);
                ApiError::internal_server_error()
            }
            UpstreamError::Url(e) => {
                tracing::error!("Upstream URL could not be built: {}", e);
                ApiError::internal_server_error()
            }
        }
    }
}

/// Rate provider failures are never relayed; the body carries `status: false`.
#[derive(Debug)]
pub struct RateApiError(pub RateError);

impl From<RateError> for RateApiError {
    fn from(err: RateError) -> Self {
        RateApiError(err)
    }
}

impl IntoResponse for RateApiError {
    fn into_response(self) -> axum::response::Response {
        let message = match &self.0 {
            RateError::Provider(status) => {
                tracing::warn!("Exchange rate provider answered {}", status);
                "Failed to fetch exchange rate"
            }
            other => {
                tracing::error!("Exchange rate error: {}", other);
                "Server error"
            }
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": false, "message": message })),
        )
            .into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
