//! # Validation Module
//!
//! Input validation for product and promotion constructors and setters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / catalog file                                           │
//! │  ├── Parsing (integers, JSON shape)                                    │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── name, price, stock, maximum, percent                              │
//! │  └── Runs before any state is mutated                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Product / Store invariants                                   │
//! │  └── stock ≥ 0, stock == 0 ⇒ inactive, checkout membership             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::MAX_PRODUCT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (whitespace-only counts as empty)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_product_name;
///
/// assert!(validate_product_name("MacBook Air M2").is_ok());
/// assert!(validate_product_name("").is_err());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a per-order purchase maximum. Zero is allowed and blocks every
/// purchase of the product.
pub fn validate_maximum(maximum: i64) -> ValidationResult<()> {
    if maximum < 0 {
        return Err(ValidationError::OutOfRange {
            field: "maximum".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be a finite number between 0 and 100 inclusive
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_percent;
///
/// assert!(validate_percent(30.0).is_ok());
/// assert!(validate_percent(100.0).is_ok());
/// assert!(validate_percent(-1.0).is_err());
/// assert!(validate_percent(f64::NAN).is_err());
/// ```
pub fn validate_percent(percent: f64) -> ValidationResult<()> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a purchase quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// Unlike the other validators this surfaces `CoreError::InvalidQuantity`,
/// since a bad quantity is a purchase failure rather than bad setup input.
pub fn validate_quantity(quantity: i64) -> CoreResult<()> {
    if quantity <= 0 {
        return Err(CoreError::InvalidQuantity {
            requested: quantity,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Google Pixel 7").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(" \t ").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(125_00)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_stock_and_maximum() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(500).is_ok());
        assert!(validate_stock(-5).is_err());

        assert!(validate_maximum(0).is_ok());
        assert!(validate_maximum(1).is_ok());
        assert!(validate_maximum(-1).is_err());
    }

    #[test]
    fn test_validate_percent() {
        assert!(validate_percent(0.0).is_ok());
        assert!(validate_percent(12.5).is_ok());
        assert!(validate_percent(100.0).is_ok());
        assert!(validate_percent(100.01).is_err());
        assert!(validate_percent(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(matches!(
            validate_quantity(0),
            Err(CoreError::InvalidQuantity { requested: 0 })
        ));
        assert!(matches!(
            validate_quantity(-3),
            Err(CoreError::InvalidQuantity { requested: -3 })
        ));
    }
}
