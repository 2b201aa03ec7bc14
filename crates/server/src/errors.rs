use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// JSON error envelope shared by every handler.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { status, title: title.to_string(), detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, title = %self.title, detail = ?self.detail, "request failed");
        }
        let body = serde_json::json!({ "error": self.title, "detail": self.detail });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => {
                Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg))
            }
            ServiceError::IntegrityViolation(msg) => {
                Self::new(StatusCode::BAD_REQUEST, "Integrity Violation", Some(msg))
            }
            ServiceError::Db(msg) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error", Some(msg))
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        warn!(code = e.code(), err = %e, "auth failure");
        match e {
            AuthError::Unauthorized => {
                Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(e.to_string()))
            }
            AuthError::TokenError(_) => {
                Self::new(StatusCode::UNAUTHORIZED, "Invalid Token", Some(e.to_string()))
            }
            AuthError::HashError(_) | AuthError::Repository(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Auth Failed", Some(e.to_string()))
            }
        }
    }
}
