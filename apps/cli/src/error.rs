//! # API Error Type
//!
//! Unified error type for calculator commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ShopCalc                               │
//! │                                                                         │
//! │  Presentation layer          Rust host                                  │
//! │  ──────────────────          ─────────                                  │
//! │                                                                         │
//! │  shopcalc --plan platinum breakdown                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown id? ──── CoreError::PlanNotFound ────────┐              │  │
//! │  │         │                                         │              │  │
//! │  │         ▼                                         ▼              │  │
//! │  │  Bad number? ──── CoreError::InvalidInput ──── ApiError ────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: {"code":"NOT_FOUND","message":"Plan not found: platinum"}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopcalc_core::CoreError;

use crate::state::ConfigError;

/// API error returned from calculator commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Invalid input: monthly_orders must not be negative"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown plan, billing period, month or input field
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Internal error (e.g. output serialization)
    Internal,
}

impl ErrorCode {
    /// Process exit code for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::NotFound | ErrorCode::ValidationError => 2,
            ErrorCode::ConfigError => 3,
            ErrorCode::Internal => 1,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_not_found() {
            ApiError::new(ErrorCode::NotFound, err.to_string())
        } else {
            ApiError::validation(err.to_string())
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Failed to serialize response: {}", err);
        ApiError::internal("Failed to serialize response")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcalc_core::ValidationError;

    #[test]
    fn test_not_found_mapping() {
        let err: ApiError = CoreError::PlanNotFound("platinum".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Plan not found: platinum");
    }

    #[test]
    fn test_validation_mapping() {
        let err: ApiError = CoreError::from(ValidationError::Negative {
            field: "monthly_orders".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Invalid input: monthly_orders must not be negative");
        assert_eq!(err.code.exit_code(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::ConfigError, "bad toml");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "CONFIG_ERROR");
        assert_eq!(json["message"], "bad toml");
    }
}
