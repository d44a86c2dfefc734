//! API error type shared by all route handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database not configured")]
    StoreUnavailable,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("serialization error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::StoreUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, (*msg).to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, (*msg).to_string()),
            ApiError::Database(_) | ApiError::Bson(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn error_status_codes() {
        assert_eq!(
            status_of(ApiError::StoreUnavailable),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::BadRequest("Phone is required")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::NotFound("User not found")),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ApiError::StoreUnavailable.to_string(),
            "Database not configured"
        );
        assert_eq!(ApiError::BadRequest("Invalid OTP").to_string(), "Invalid OTP");
    }
}
