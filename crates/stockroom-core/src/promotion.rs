//! # Promotions
//!
//! Pure pricing strategies over `(unit price, quantity)`.
//!
//! ## Promotion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule              Formula (q = quantity, p = unit price)               │
//! │  ────────────────  ───────────────────────────────────────────────────  │
//! │  PercentDiscount   p × q × (1 − percent/100)                           │
//! │  SecondHalfPrice   ceil(q/2) × p + floor(q/2) × p/2                    │
//! │  ThirdOneFree      (q − floor(q/3)) × p                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A promotion is shared between products through `Arc<Promotion>`. Its only
//! mutable parameter is the percentage of a percent discount, stored
//! atomically so an update through any handle is seen by every product
//! carrying it.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_percent, validate_quantity};

/// The pricing rule behind a [`Promotion`].
#[derive(Debug)]
pub(crate) enum PromotionRule {
    /// Percentage off the whole line, held in basis points (1000 = 10%).
    PercentDiscount { bps: AtomicU32 },
    /// Every second unit costs half.
    SecondHalfPrice,
    /// Every third unit is free.
    ThirdOneFree,
}

/// A named promotion that can be attached to any number of products.
#[derive(Debug)]
pub struct Promotion {
    name: String,
    rule: PromotionRule,
}

impl Promotion {
    /// Creates a percentage discount.
    ///
    /// The percentage is kept to two decimal places (basis points), rounded
    /// to the nearest: `12.346` is stored and read back as `12.35`.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{Money, Promotion};
    ///
    /// let promo = Promotion::percent_discount("10% off", 10.0).unwrap();
    /// let total = promo.apply(Money::from_cents(100_000), 2).unwrap();
    /// assert_eq!(total, Money::from_cents(180_000));
    ///
    /// assert!(Promotion::percent_discount("bogus", 120.0).is_err());
    /// ```
    pub fn percent_discount(name: impl Into<String>, percent: f64) -> CoreResult<Self> {
        let name = name.into();
        let bps = percent_to_bps(&name, percent)?;
        Promotion::with_rule(
            name,
            PromotionRule::PercentDiscount {
                bps: AtomicU32::new(bps),
            },
        )
    }

    /// Creates a "second unit half price" promotion.
    pub fn second_half_price(name: impl Into<String>) -> CoreResult<Self> {
        Promotion::with_rule(name.into(), PromotionRule::SecondHalfPrice)
    }

    /// Creates a "every third unit free" promotion.
    pub fn third_one_free(name: impl Into<String>) -> CoreResult<Self> {
        Promotion::with_rule(name.into(), PromotionRule::ThirdOneFree)
    }

    fn with_rule(name: String, rule: PromotionRule) -> CoreResult<Self> {
        if name.trim().is_empty() {
            return Err(CoreError::Configuration {
                promotion: name,
                reason: "name is required".to_string(),
            });
        }
        Ok(Promotion { name, rule })
    }

    /// Display name, e.g. "Second Half price!".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current discount percentage, for percent discounts only.
    pub fn percent(&self) -> Option<f64> {
        match &self.rule {
            PromotionRule::PercentDiscount { bps } => {
                Some(bps.load(Ordering::Relaxed) as f64 / 100.0)
            }
            _ => None,
        }
    }

    /// Replaces the percentage of a percent discount.
    ///
    /// Fails with `CoreError::Configuration` when the value is outside
    /// `0..=100` or the promotion is not a percent discount. On failure the
    /// previous percentage stays in effect. Precision is the same as for
    /// [`Promotion::percent_discount`]: two decimal places.
    pub fn set_percent(&self, percent: f64) -> CoreResult<()> {
        match &self.rule {
            PromotionRule::PercentDiscount { bps } => {
                let new_bps = percent_to_bps(&self.name, percent)?;
                bps.store(new_bps, Ordering::Relaxed);
                Ok(())
            }
            _ => Err(CoreError::Configuration {
                promotion: self.name.clone(),
                reason: "only percent discounts carry a percentage".to_string(),
            }),
        }
    }

    /// Prices `quantity` units at `unit_price` under this promotion.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `InvalidPrice` if `unit_price` is negative
    /// - `Overflow` if the line total does not fit in 64 bits
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{Money, Promotion};
    ///
    /// let half = Promotion::second_half_price("Second Half price!").unwrap();
    /// assert_eq!(half.apply(Money::from_cents(20_000), 3).unwrap().cents(), 50_000);
    ///
    /// let free = Promotion::third_one_free("Third One Free!").unwrap();
    /// assert_eq!(free.apply(Money::from_cents(15_000), 3).unwrap().cents(), 30_000);
    /// ```
    pub fn apply(&self, unit_price: Money, quantity: i64) -> CoreResult<Money> {
        validate_quantity(quantity)?;
        if unit_price.is_negative() {
            return Err(CoreError::InvalidPrice {
                cents: unit_price.cents(),
            });
        }

        let total = match &self.rule {
            PromotionRule::PercentDiscount { bps } => unit_price
                .checked_multiply_quantity(quantity)
                .map(|gross| gross.apply_percentage_discount(bps.load(Ordering::Relaxed))),
            PromotionRule::SecondHalfPrice => {
                let half_units = quantity / 2;
                let full_units = quantity - half_units;
                let full = unit_price.checked_multiply_quantity(full_units);
                let half = unit_price.checked_multiply_quantity(half_units);
                match (full, half) {
                    (Some(full), Some(half)) => full.checked_add(half.half()),
                    _ => None,
                }
            }
            PromotionRule::ThirdOneFree => {
                let paid_units = quantity - quantity / 3;
                unit_price.checked_multiply_quantity(paid_units)
            }
        };

        total.ok_or(CoreError::Overflow {
            operation: "promotion price",
        })
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn percent_to_bps(name: &str, percent: f64) -> CoreResult<u32> {
    validate_percent(percent).map_err(|e| CoreError::Configuration {
        promotion: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok((percent * 100.0).round() as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
