//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type on the service side, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a staff-not-found error for a mobile number
    pub fn staff_not_found(mobile: impl Into<String>) -> Self {
        let m = mobile.into();
        Self::with_message(
            ErrorCode::StaffNotFound,
            format!("no staff entry for mobile {m}"),
        )
        .with_detail("mobile", m)
    }

    /// Create a duty-not-found error
    pub fn duty_not_found(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DutyNotFound, msg)
    }

    /// Create an already-reported conflict error
    pub fn already_reported(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyReported, msg)
    }

    /// Create a not-reported error (submit before check-in)
    pub fn not_reported(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotReported, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// Unified API response structure
///
/// Provides a consistent response format for all endpoints:
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Create a success response with custom message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: Some(0),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }

    /// Whether the envelope carries a success code
    pub fn is_success(&self) -> bool {
        self.code == Some(0) || self.code.is_none()
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }

    /// Create an error response from a code with a custom message
    pub fn error_with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.code()),
            message: message.into(),
            data: None,
            details: None,
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // Log system errors
        if self.code.is_system() {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = if self.is_success() {
            StatusCode::OK
        } else {
            ErrorCode::try_from(self.code.unwrap_or(1))
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::DutyNotFound);
        assert_eq!(err.code, ErrorCode::DutyNotFound);
        assert_eq!(err.message, "Duty record not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_constructors() {
        let err = AppError::staff_not_found("9876543210");
        assert_eq!(err.code, ErrorCode::StaffNotFound);
        assert_eq!(err.message, "no staff entry for mobile 9876543210");
        assert_eq!(
            err.details.unwrap().get("mobile").unwrap(),
            "9876543210"
        );

        let err = AppError::already_reported("duty already checked in");
        assert_eq!(err.code, ErrorCode::AlreadyReported);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);

        let err = AppError::not_reported("no check-in on record");
        assert_eq!(err.code, ErrorCode::NotReported);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err = AppError::validation("mobile must be 10 digits");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::DutyNotFound, "no duty for B. Singh today");
        assert_eq!(format!("{}", err), "no duty for B. Singh today");
    }

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(42);
        assert_eq!(response.code, Some(0));
        assert_eq!(response.message, "OK");
        assert_eq!(response.data, Some(42));
        assert!(response.is_success());
    }

    #[test]
    fn test_api_response_error_envelope() {
        let err = AppError::staff_not_found("0000000000");
        let response: ApiResponse<()> = err.into();
        assert_eq!(response.code, Some(1001));
        assert!(!response.is_success());
        assert!(response.data.is_none());
        assert!(response.details.is_some());

        let response =
            ApiResponse::error_with_message(ErrorCode::AlreadyReported, "duty already checked in");
        assert_eq!(response.code, Some(2002));
        assert_eq!(response.message, "duty already checked in");
        assert!(!response.is_success());
    }

    #[test]
    fn test_api_response_serde_skips_empty() {
        let response = ApiResponse::<()>::ok();
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("data"));
        assert!(!json.contains("details"));
        assert!(json.contains("\"code\":0"));
    }
}
