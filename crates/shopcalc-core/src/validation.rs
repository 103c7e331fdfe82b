//! # Validation Module
//!
//! Boundary validation for numbers entered by the user.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (form widgets)                                  │
//! │  ├── Digits and one decimal point only                                 │
//! │  └── Immediate inline feedback                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine boundary (THIS MODULE)                                │
//! │  ├── Finite (no NaN / infinity)                                        │
//! │  ├── Non-negative                                                      │
//! │  └── Representable as an exact six-decimal quantity                    │
//! │                                                                         │
//! │  Rejection, never clamping: a bad number fails the call.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fractional order counts and large volumes are valid input; only values
//! the engine cannot hold exactly are refused.
//!
//! ## Usage
//! ```rust
//! use shopcalc_core::quantity::Quantity;
//! use shopcalc_core::types::InputField;
//! use shopcalc_core::validation::validate_quantity;
//!
//! let price = validate_quantity(InputField::SellingPrice, 49.99).unwrap();
//! assert_eq!(price, Quantity::from_cents(4999));
//!
//! let orders = validate_quantity(InputField::MonthlyOrders, 12.5).unwrap();
//! assert_eq!(orders.micros(), 12_500_000);
//!
//! assert!(validate_quantity(InputField::MonthlyOrders, f64::NAN).is_err());
//! ```

use crate::error::ValidationError;
use crate::quantity::{Quantity, QuantityError};
use crate::types::{InputField, StoreInputs};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Raw Number Validators
// =============================================================================

/// Validates a user-entered number and converts it to an exact quantity.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (zero is allowed)
/// - Must fit in six-decimal fixed point (about 9.2 trillion)
pub fn validate_quantity(field: InputField, value: f64) -> ValidationResult<Quantity> {
    Quantity::from_f64(value).map_err(|err| quantity_error(field, err))
}

fn quantity_error(field: InputField, err: QuantityError) -> ValidationError {
    let field = field.to_string();
    match err {
        QuantityError::NotFinite => ValidationError::NotFinite { field },
        QuantityError::Negative => ValidationError::Negative { field },
        QuantityError::TooLarge => ValidationError::Unrepresentable { field },
    }
}

// =============================================================================
// Snapshot Validators
// =============================================================================

/// Validates an already-typed snapshot before computing with it.
///
/// `StoreInputs` fields are public, so a caller can build one without
/// going through [`StoreInputs::set`]. The engine re-checks every field.
pub fn validate_store_inputs(inputs: &StoreInputs) -> ValidationResult<()> {
    match InputField::ALL
        .into_iter()
        .find(|&field| inputs.get(field).is_negative())
    {
        Some(field) => Err(quantity_error(field, QuantityError::Negative)),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        let field = InputField::SellingPrice;
        assert_eq!(validate_quantity(field, 0.0).unwrap(), Quantity::zero());
        assert_eq!(validate_quantity(field, 49.99).unwrap(), Quantity::from_cents(4999));
        // Sub-cent prices are kept, not rounded to the cent
        assert_eq!(validate_quantity(field, 0.125).unwrap().micros(), 125_000);
        assert_eq!(validate_quantity(field, 1.005).unwrap().micros(), 1_005_000);
        // Negative zero is zero
        assert_eq!(validate_quantity(field, -0.0).unwrap(), Quantity::zero());
    }

    #[test]
    fn test_fractional_and_large_order_counts() {
        let field = InputField::MonthlyOrders;
        assert_eq!(validate_quantity(field, 10.5).unwrap().micros(), 10_500_000);
        assert_eq!(
            validate_quantity(field, 2_000_000.0).unwrap(),
            Quantity::from_units(2_000_000)
        );
    }

    #[test]
    fn test_validate_quantity_rejections() {
        let field = InputField::StaffCost;
        assert_eq!(
            validate_quantity(field, f64::NAN),
            Err(ValidationError::NotFinite {
                field: "staff_cost".to_string()
            })
        );
        assert!(matches!(
            validate_quantity(field, f64::NEG_INFINITY),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            validate_quantity(field, -0.01),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            validate_quantity(field, 1e20),
            Err(ValidationError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_validate_store_inputs() {
        let mut inputs = StoreInputs::default();
        assert!(validate_store_inputs(&inputs).is_ok());

        inputs.selling_price = Quantity::from_micros(-1);
        let err = validate_store_inputs(&inputs).unwrap_err();
        assert_eq!(err.field(), "selling_price");

        inputs.selling_price = Quantity::from_cents(4999);
        inputs.monthly_orders = Quantity::from_units(-5);
        let err = validate_store_inputs(&inputs).unwrap_err();
        assert_eq!(err.field(), "monthly_orders");

        inputs.monthly_orders = Quantity::from_micros(i64::MAX);
        assert!(validate_store_inputs(&inputs).is_ok());
    }
}
