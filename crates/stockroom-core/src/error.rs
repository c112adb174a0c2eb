//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Purchase, pricing and checkout failures        │
//! │  └── ValidationError  - Bad constructor/setter input                   │
//! │                                                                         │
//! │  stockroom-cli errors (separate crate)                                 │
//! │  ├── ConfigError      - Malformed environment variables                │
//! │  └── CatalogError     - Unreadable or inconsistent catalog files       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → menu prints message, re-prompts   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String
//! 4. Every error is scoped to the single operation that raised it

use thiserror::Error;

use crate::product::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations during pricing, purchase
/// or checkout. None of them is fatal; the caller decides whether to retry.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Purchase or promotion call with a quantity of zero or less.
    #[error("Quantity must be greater than zero, got {requested}")]
    InvalidQuantity { requested: i64 },

    /// Promotion applied to a negative unit price.
    #[error("Unit price cannot be negative, got {cents} cents")]
    InvalidPrice { cents: i64 },

    /// Insufficient stock to complete the purchase.
    ///
    /// ## User Workflow
    /// ```text
    /// Order "Google Pixel 7" (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Google Pixel 7", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Menu shows: "Not enough stock for Google Pixel 7: ..."
    /// ```
    #[error("Not enough stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A capped product was ordered above its per-order maximum.
    #[error("Cannot buy {requested} of {name}: at most {maximum} per order")]
    LimitExceeded {
        name: String,
        maximum: i64,
        requested: i64,
    },

    /// Basket references a product that is not part of the store.
    #[error("Product {id} is not available in this store")]
    ProductNotInStore { id: ProductId },

    /// Basket references a product that is deactivated.
    #[error("Product {name} is inactive and cannot be ordered")]
    ProductInactive { name: String },

    /// A price, total or stock sum does not fit in 64 bits.
    #[error("Amount overflow while computing {operation}")]
    Overflow { operation: &'static str },

    /// Malformed promotion parameters.
    #[error("Invalid configuration for promotion {promotion}: {reason}")]
    Configuration { promotion: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by constructors and setters before any state is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Field cannot be changed from its fixed value.
    #[error("{field} is fixed at {value}")]
    Fixed { field: String, value: i64 },
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
        let err = CoreError::InsufficientStock {
            name: "Tablet".to_string(),
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for Tablet: available 2, requested 3"
        );

        let err = CoreError::LimitExceeded {
            name: "Shipping".to_string(),
            maximum: 1,
            requested: 2,
        };
        assert_eq!(
            err.to_string(),
            "Cannot buy 2 of Shipping: at most 1 per order"
        );

        let err = CoreError::Overflow {
            operation: "line price",
        };
        assert_eq!(err.to_string(), "Amount overflow while computing line price");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Fixed {
            field: "stock".to_string(),
            value: 0,
        };
        assert_eq!(err.to_string(), "stock is fixed at 0");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
