//! Application error taxonomy and its HTTP mapping.
//!
//! Every service returns [`AppError`]; the API layer turns it into a JSON
//! response of the form `{"error": "<message>"}`. Server-side failures never
//! expose their internal details to the caller, only to the logs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Message returned for every `500` response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors produced by the shortener and resolver.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed, missing or oversized URL or identifier.
    #[error("{0}")]
    InvalidInput(String),

    /// The identifier is not present in the mapping store.
    #[error("Not found")]
    NotFound,

    /// Every generated identifier collided with an existing one.
    #[error("failed to generate a unique short_id after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    /// The mapping store could not be reached.
    #[error("mapping store unavailable: {0}")]
    StoreUnavailable(String),

    /// Any other unexpected fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_url() -> Self {
        Self::InvalidInput("Invalid URL".to_string())
    }

    pub fn invalid_short_id() -> Self {
        Self::InvalidInput("Invalid short_id".to_string())
    }

    pub fn invalid_body() -> Self {
        Self::InvalidInput("Invalid request body".to_string())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::GenerationExhausted { .. }
            | AppError::StoreUnavailable(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(message) => message.clone(),
            AppError::NotFound => "Not found".to_string(),
            AppError::GenerationExhausted { .. }
            | AppError::StoreUnavailable(_)
            | AppError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::invalid_url().status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::GenerationExhausted { attempts: 5 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::StoreUnavailable("down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_hides_internal_details() {
        let err = AppError::StoreUnavailable("connection refused on 10.0.0.5:5432".to_string());
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);

        let err = AppError::internal("stack trace here");
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_public_message_for_client_errors() {
        assert_eq!(AppError::invalid_url().public_message(), "Invalid URL");
        assert_eq!(
            AppError::invalid_short_id().public_message(),
            "Invalid short_id"
        );
        assert_eq!(AppError::NotFound.public_message(), "Not found");
    }

    #[test]
    fn test_display_keeps_details_for_logs() {
        let err = AppError::GenerationExhausted { attempts: 5 };
        assert!(err.to_string().contains("5 attempts"));
    }
}
