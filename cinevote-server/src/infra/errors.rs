use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use cinevote_core::CoreError;
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

/// Error returned by handlers; rendered as `{"detail": message}`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// The response for any missing, invalid or expired bearer token.
    pub fn invalid_token() -> Self {
        Self::unauthorized(CoreError::Unauthorized.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response =
            (self.status, Json(json!({ "detail": self.message }))).into_response();

        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::bad_request(msg),
            CoreError::DuplicateEmail => Self::bad_request(err.to_string()),
            CoreError::InvalidCredentials | CoreError::Unauthorized => {
                Self::unauthorized(err.to_string())
            }
            CoreError::InvalidVote(_) => Self::bad_request("Invalid user vote, must be -1 or 1"),
            CoreError::CatalogUnavailable { .. } => {
                warn!(error = %err, "Catalog request failed");
                Self::bad_request("External API request failed after multiple retries")
            }
            CoreError::CatalogParse(_) => {
                warn!(error = %err, "Catalog response could not be parsed");
                Self::bad_request("Error parsing external API response")
            }
            CoreError::Database(_) | CoreError::Internal(_) => {
                error!(error = %err, "Request failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
