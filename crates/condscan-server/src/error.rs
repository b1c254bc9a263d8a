//! Server error types and structured API error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while configuring or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Bind address could not be parsed
    #[error("Invalid bind address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Listener or connection I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structured error response
///
/// Every request-level failure is reported with this body; the status code
/// is derived from `code`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error code (e.g., "INVALID_JSON", "VALIDATION_ERROR", "INTERNAL_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional details for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn invalid_json(msg: impl Into<String>) -> Self {
        Self {
            code: "INVALID_JSON".to_string(),
            message: "Request body is not valid JSON.".to_string(),
            details: Some(msg.into()),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            code: "VALIDATION_ERROR".to_string(),
            message: "Request body does not match the expected unit shape.".to_string(),
            details: Some(msg.into()),
        }
    }

    pub fn unsupported_media_type(msg: impl Into<String>) -> Self {
        Self {
            code: "UNSUPPORTED_MEDIA_TYPE".to_string(),
            message: "Expected an application/json request body.".to_string(),
            details: Some(msg.into()),
        }
    }

    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        Self {
            code: "PAYLOAD_TOO_LARGE".to_string(),
            message: "Request body exceeds the configured limit.".to_string(),
            details: Some(msg.into()),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: "An internal error occurred.".to_string(),
            details: Some(msg.into()),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.code.as_str() {
            "INVALID_JSON" => StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR" => StatusCode::UNPROCESSABLE_ENTITY,
            "UNSUPPORTED_MEDIA_TYPE" => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "PAYLOAD_TOO_LARGE" => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let details = rejection.body_text();
        match rejection {
            JsonRejection::JsonSyntaxError(_) => Self::invalid_json(details),
            JsonRejection::JsonDataError(_) => Self::validation(details),
            JsonRejection::MissingJsonContentType(_) => Self::unsupported_media_type(details),
            _ if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Self::payload_too_large(details)
            }
            _ => Self::invalid_json(details),
        }
    }
}
