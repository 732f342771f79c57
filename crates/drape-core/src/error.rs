//! # Error Types
//!
//! Domain-specific error types for drape-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  drape-core errors (this file)                                         │
//! │  ├── CoreError        - Quote assembly failures                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  drape-render errors (separate crate)                                  │
//! │  └── RenderError      - Document could not be produced                 │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees (message + exit code)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError / RenderError → AppError → stderr   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, position)
//! 3. Errors are enum variants, never String
//! 4. A failed operation never leaves a quote half-modified

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Quote assembly errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line item carries the given handle.
    ///
    /// ## When This Occurs
    /// - The item was already removed
    /// - The handle belongs to a different quote
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// Positional removal outside the current item list.
    #[error("Position {position} is out of range (quote has {len} items)")]
    PositionOutOfRange { position: usize, len: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the pricing engine and by quote assembly. Always recoverable:
/// the caller corrects the input and retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// NaN or infinite input.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A quote without line items cannot be rendered.
    #[error("quote has no line items")]
    EmptyQuote,
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_not_be_negative(field: &str) -> Self {
        ValidationError::MustNotBeNegative {
            field: field.to_string(),
        }
    }

    pub(crate) fn not_finite(field: &str) -> Self {
        ValidationError::NotFinite {
            field: field.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PositionOutOfRange { position: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Position 4 is out of range (quote has 2 items)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("room name").to_string(),
            "room name is required"
        );
        assert_eq!(
            ValidationError::must_be_positive("fabric width").to_string(),
            "fabric width must be positive"
        );
        assert_eq!(ValidationError::EmptyQuote.to_string(), "quote has no line items");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("width").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
