//! Custom error types for flowname
//!
//! User-friendly error messages for all failure scenarios, plus the mapping
//! from each failure to the JSON body returned by the HTTP API.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the flowname application
#[derive(Error, Debug)]
pub enum FlownameError {
    /// Invalid input from the caller
    #[error("{0}")]
    InvalidInput(String),

    /// Branch type outside the Git Flow registry
    #[error("Unknown branch type '{0}'. Expected one of: feature, bugfix, hotfix, release, support")]
    UnknownBranchType(String),

    /// HTTP method other than POST on a write endpoint
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// No OpenRouter credential available
    #[error("OpenRouter API key is not set up.\n\n  → Get an API key from https://openrouter.ai/keys\n  → Export it as OPENROUTER_API_KEY before starting the server.")]
    NotConfigured,

    /// Provider answered with a non-success status
    #[error("AI generation failed ({status}): {message}")]
    Upstream {
        /// HTTP status returned by the provider
        status: u16,
        /// Provider error message or raw body
        message: String,
    },

    /// Provider answered 2xx without usable completion text
    #[error("No response from AI model")]
    EmptyResponse,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Network request error
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for FlownameError {
    fn from(err: toml::de::Error) -> Self {
        FlownameError::Toml(err.to_string())
    }
}

/// Result type alias using FlownameError
pub type Result<T> = std::result::Result<T, FlownameError>;

/// Summary line used for every failure that happened while talking to the model
const GENERATION_FAILED: &str = "Failed to generate branch name";

/// JSON error body returned by the HTTP API
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl FlownameError {
    /// Build the `{error, details}` body for this failure
    pub fn to_body(&self) -> ErrorBody {
        match self {
            FlownameError::InvalidInput(_)
            | FlownameError::UnknownBranchType(_)
            | FlownameError::MethodNotAllowed => ErrorBody {
                error: self.to_string(),
                details: None,
            },
            FlownameError::NotConfigured => ErrorBody {
                error: "API key not configured".to_string(),
                details: Some("Set OPENROUTER_API_KEY in the server environment".to_string()),
            },
            FlownameError::Upstream { message, .. } => ErrorBody {
                error: GENERATION_FAILED.to_string(),
                details: Some(message.clone()),
            },
            FlownameError::EmptyResponse | FlownameError::Network(_) => ErrorBody {
                error: GENERATION_FAILED.to_string(),
                details: Some(self.to_string()),
            },
            FlownameError::Config(_)
            | FlownameError::Toml(_)
            | FlownameError::Io(_)
            | FlownameError::Json(_) => ErrorBody {
                error: "Internal server error".to_string(),
                details: Some(self.to_string()),
            },
        }
    }
}

impl ResponseError for FlownameError {
    fn status_code(&self) -> StatusCode {
        match self {
            FlownameError::InvalidInput(_) | FlownameError::UnknownBranchType(_) => {
                StatusCode::BAD_REQUEST
            }
            FlownameError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            // Mirror the provider; anything that is not an error status falls back to 500
            FlownameError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_client_errors() {
        assert_eq!(
            FlownameError::InvalidInput("Description is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FlownameError::UnknownBranchType("chore".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FlownameError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_upstream_status_is_mirrored() {
        let err = FlownameError::Upstream {
            status: 429,
            message: "Rate limited".into(),
        };
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let body = err.to_body();
        assert_eq!(body.error, "Failed to generate branch name");
        assert_eq!(body.details.as_deref(), Some("Rate limited"));
    }

    #[test]
    fn test_upstream_success_status_falls_back_to_500() {
        let err = FlownameError::Upstream {
            status: 200,
            message: "odd".into(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_configured_body() {
        let err = FlownameError::NotConfigured;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = err.to_body();
        assert_eq!(body.error, "API key not configured");
        assert!(body.details.is_some());
    }

    #[test]
    fn test_validation_body_has_no_details() {
        let body = FlownameError::InvalidInput("Description is required".into()).to_body();
        assert_eq!(body.error, "Description is required");
        assert!(body.details.is_none());
    }
}
