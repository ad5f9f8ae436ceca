//! Typed error handling for the API
//!
//! Every failure a handler can produce is one of five categories, each with a
//! fixed HTTP status and machine-readable code:
//!
//! - [`ApiError::Validation`]: aggregated field violations (400)
//! - [`ApiError::NotFound`]: entity absent (404)
//! - [`ApiError::Duplicate`]: unique-constraint collision, e.g. username (400)
//! - [`ApiError::Auth`]: generic invalid-credentials outcome (400)
//! - [`ApiError::Internal`]: unexpected store/hash/sign failure (500)
//!
//! Internal errors deliberately expose no detail to the caller: the message is
//! logged through `tracing` and the response body carries a generic string.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// A single field validation violation.
///
/// `field` is the path into the payload, using dots for nesting and `[i]` for
/// array elements (e.g. `shippingAddress.city`, `products[0].price`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The error type shared by all handlers.
#[derive(Debug)]
pub enum ApiError {
    /// One or more field violations; the whole list is surfaced to the caller.
    Validation(Vec<Violation>),

    /// The requested entity does not exist.
    NotFound { entity: &'static str },

    /// A uniqueness constraint was violated (currently only usernames).
    Duplicate { message: String },

    /// Authentication failed. One variant for unknown user and wrong
    /// password alike, so the response never reveals which it was.
    Auth,

    /// Unexpected failure in the store, hasher, or signer. The detail is
    /// logged but never returned to the caller.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(violations) => {
                let msgs: Vec<String> = violations
                    .iter()
                    .map(|v| format!("{}: {}", v.field, v.message))
                    .collect();
                write!(f, "Validation failed: {}", msgs.join(", "))
            }
            ApiError::NotFound { entity } => write!(f, "{} not found", entity),
            ApiError::Duplicate { message } => write!(f, "{}", message),
            ApiError::Auth => write!(f, "Invalid credentials"),
            ApiError::Internal(detail) => write!(f, "Internal error: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            ApiError::Auth => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Duplicate { .. } => "DUPLICATE",
            ApiError::Auth => "INVALID_CREDENTIALS",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body.
    ///
    /// Internal errors are collapsed to a fixed message here; the detail only
    /// exists in the log.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Validation(violations) => {
                Some(serde_json::json!({ "fields": violations }))
            }
            ApiError::NotFound { entity } => Some(serde_json::json!({ "entity": entity })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed with internal error");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<Vec<Violation>> for ApiError {
    fn from(violations: Vec<Violation>) -> Self {
        ApiError::Validation(violations)
    }
}

/// Storage-layer errors surface as `anyhow::Error`; at the handler boundary
/// they all collapse to Internal.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Serialization of an already-validated payload should never fail; if it
/// does, that is an internal bug, not a caller error.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("serialization error: {}", err))
    }
}

/// A specialized Result type for handler and service operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_returns_400() {
        let err = ApiError::Validation(vec![Violation::new("title", "is required")]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_not_found_returns_404() {
        let err = ApiError::NotFound { entity: "Order" };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("Order not found"));
    }

    #[test]
    fn test_duplicate_returns_400() {
        let err = ApiError::Duplicate {
            message: "User already exists".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "DUPLICATE");
    }

    #[test]
    fn test_auth_error_is_generic() {
        let err = ApiError::Auth;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = ApiError::Internal("mongo connection reset".to_string());
        let response = err.to_response();
        assert_eq!(response.code, "INTERNAL_ERROR");
        assert_eq!(response.message, "Internal server error");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_validation_details_carry_all_fields() {
        let err = ApiError::Validation(vec![
            Violation::new("title", "is required"),
            Violation::new("price.original", "must be greater than 0"),
        ]);
        let response = err.to_response();
        let details = response.details.expect("validation errors carry details");
        let fields = details["fields"].as_array().expect("fields is an array");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["field"], "price.original");
    }

    #[test]
    fn test_from_anyhow_collapses_to_internal() {
        let err: ApiError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_violations() {
        let err: ApiError = vec![Violation::new("user", "must be a 24-character hexadecimal id")]
            .into();
        assert!(matches!(err, ApiError::Validation(v) if v.len() == 1));
    }
}
