//! # Validation Module
//!
//! Input validation utilities for Drape Quote.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request file (CLI)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Float → Money conversion (rejects NaN / ∞)                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Pricing Engine / Quote Assembly                              │
//! │  └── THIS MODULE: dimension, price, and field rules                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Renderer                                                     │
//! │  └── Quote::validate_for_render (non-empty, client complete)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use drape_core::validation::{validate_dimension, validate_required};
//!
//! assert!(validate_required("room name", "Majlis").is_ok());
//! assert!(validate_dimension("width", 0.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is not empty after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a physical dimension (meters) or ratio.
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive
///
/// ## Example
/// ```rust
/// use drape_core::validation::validate_dimension;
///
/// assert!(validate_dimension("width", 2.4).is_ok());
/// assert!(validate_dimension("width", 0.0).is_err());
/// assert!(validate_dimension("width", f64::NAN).is_err());
/// ```
pub fn validate_dimension(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::not_finite(field));
    }
    if value <= 0.0 {
        return Err(ValidationError::must_be_positive(field));
    }
    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (e.g. a remote included free of charge)
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::must_not_be_negative(field));
    }
    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
