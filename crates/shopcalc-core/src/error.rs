//! # Error Types
//!
//! Domain-specific error types for shopcalc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopcalc-core errors (this file)                                      │
//! │  ├── CoreError        - Unknown keys + invalid input                   │
//! │  └── ValidationError  - Non-finite / negative / unrepresentable values │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Presentation layer     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two categories matter to callers:
//! - **Not found**: an id outside a closed table (plan, billing period,
//!   month, input field). Unreachable from a closed selector UI, still checked.
//! - **Invalid input**: a number the engine refuses to compute with.
//!
//! The engine never clamps: it fails the whole call instead of producing a
//! silently wrong number.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core calculation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Plan id is not one of the catalog keys.
    #[error("Plan not found: {0}")]
    PlanNotFound(String),

    /// Billing period is neither monthly nor yearly.
    #[error("Billing period not found: {0}")]
    BillingPeriodNotFound(String),

    /// Calendar month number outside 1-12.
    #[error("Calendar month not found: {0}")]
    MonthNotFound(u8),

    /// Input field name does not match any store input.
    #[error("Input field not found: {0}")]
    InputFieldNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for errors caused by an unknown lookup key.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::PlanNotFound(_)
                | CoreError::BillingPeriodNotFound(_)
                | CoreError::MonthNotFound(_)
                | CoreError::InputFieldNotFound(_)
        )
    }

    /// Returns true for errors caused by a rejected numeric input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CoreError::InvalidInput(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the engine boundary, or when a derived figure would not fit in
/// exact integer cents. `field` names the input or the derived figure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// NaN or infinity.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value (or a figure derived from it) beyond exact integer range.
    #[error("{field} is too large to represent")]
    Unrepresentable { field: String },
}

impl ValidationError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::NotFinite { field }
            | ValidationError::Negative { field }
            | ValidationError::Unrepresentable { field } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
