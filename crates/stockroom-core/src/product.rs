//! # Products
//!
//! A product owns its identity, price, stock and active flag, and may carry
//! a shared [`Promotion`].
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Variant     Stock                           Cap        describe()      │
//! │  ──────────  ──────────────────────────────  ─────────  ──────────────  │
//! │  Standard    mutable, ≥0, inactive at 0      none       name,price,qty  │
//! │  Unlimited   fixed at 0, never depletes      none       name,price      │
//! │  Capped      mutable, ≥0, inactive at 0      maximum    +maximum        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purchase Flow
//! ```text
//! purchase(q)
//!   ├── q ≤ 0?              → InvalidQuantity
//!   ├── Capped, q > max?    → LimitExceeded
//!   ├── tracked, q > stock? → InsufficientStock
//!   ├── price = promotion.apply(price, q) or price × q
//!   └── stock -= q (tracked only; 0 ⇒ inactive)
//! ```
//! Every check runs before the stock is touched, so a failed purchase leaves
//! the product unchanged.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::promotion::Promotion;
use crate::validation::{
    validate_maximum, validate_price, validate_product_name, validate_quantity, validate_stock,
};

// =============================================================================
// Product Id
// =============================================================================

/// Identity of a product (UUID v4), assigned at construction.
///
/// Two products with the same name are still different products; store
/// membership and baskets go through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    fn generate() -> Self {
        ProductId(Uuid::new_v4())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// Stock and purchase-limit behavior of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Stock-tracked, no purchase cap.
    Standard,
    /// Not stocked: stock is always 0 and never limits a purchase.
    Unlimited,
    /// Stock-tracked with a per-order purchase ceiling.
    Capped { maximum: i64 },
}

impl ProductKind {
    /// Whether stock is a depletion signal for this kind.
    #[inline]
    pub const fn tracks_stock(&self) -> bool {
        !matches!(self, ProductKind::Unlimited)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// ## Invariants
/// - `name` is non-empty and never changes
/// - `price >= 0`, `stock >= 0`
/// - stock-tracked kinds: `stock == 0` ⇒ `!active`
/// - `Unlimited`: `stock == 0` forever
///
/// Not `Clone`: a copy would share the id and pass store membership checks.
#[derive(Debug)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    stock: i64,
    active: bool,
    kind: ProductKind,
    promotion: Option<Arc<Promotion>>,
}

impl Product {
    /// Creates a standard, stock-tracked product.
    ///
    /// A product created with zero stock starts inactive.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{Money, Product};
    ///
    /// let laptop = Product::new("Laptop", Money::from_cents(100_000), 10).unwrap();
    /// assert_eq!(laptop.stock(), 10);
    /// assert!(laptop.is_active());
    ///
    /// assert!(Product::new("", Money::from_cents(145_000), 100).is_err());
    /// assert!(Product::new("MacBook Air M2", Money::from_cents(-10), 100).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: Money, stock: i64) -> CoreResult<Self> {
        Product::build(name.into(), price, stock, ProductKind::Standard)
    }

    /// Creates a non-stocked product (licenses, services).
    pub fn unlimited(name: impl Into<String>, price: Money) -> CoreResult<Self> {
        Product::build(name.into(), price, 0, ProductKind::Unlimited)
    }

    /// Creates a stock-tracked product that can be bought at most `maximum`
    /// units per order.
    pub fn capped(
        name: impl Into<String>,
        price: Money,
        stock: i64,
        maximum: i64,
    ) -> CoreResult<Self> {
        validate_maximum(maximum)?;
        Product::build(name.into(), price, stock, ProductKind::Capped { maximum })
    }

    fn build(name: String, price: Money, stock: i64, kind: ProductKind) -> CoreResult<Self> {
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_stock(stock)?;

        Ok(Product {
            id: ProductId::generate(),
            name,
            price,
            stock,
            active: !kind.tracks_stock() || stock > 0,
            kind,
            promotion: None,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Current stock. Always 0 for unlimited products.
    #[inline]
    pub fn stock(&self) -> i64 {
        self.stock
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Per-order ceiling, for capped products only.
    pub fn maximum(&self) -> Option<i64> {
        match self.kind {
            ProductKind::Capped { maximum } => Some(maximum),
            _ => None,
        }
    }

    pub fn promotion(&self) -> Option<&Arc<Promotion>> {
        self.promotion.as_ref()
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Sets the stock level.
    ///
    /// ## Behavior
    /// - Negative values fail with a validation error
    /// - Standard/Capped: reaching 0 deactivates the product
    /// - Unlimited: any value other than 0 fails
    pub fn set_stock(&mut self, stock: i64) -> CoreResult<()> {
        validate_stock(stock)?;

        if !self.kind.tracks_stock() {
            if stock != 0 {
                return Err(ValidationError::Fixed {
                    field: "stock".to_string(),
                    value: 0,
                }
                .into());
            }
            return Ok(());
        }

        self.stock = stock;
        if self.stock == 0 {
            self.deactivate();
        }
        Ok(())
    }

    /// Administrative override of the active flag, independent of stock.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn activate(&mut self) {
        self.set_active(true);
    }

    pub fn deactivate(&mut self) {
        self.set_active(false);
    }

    /// Attaches, replaces or (with `None`) removes the promotion.
    pub fn set_promotion(&mut self, promotion: Option<Arc<Promotion>>) {
        self.promotion = promotion;
    }

    // -------------------------------------------------------------------------
    // Purchase
    // -------------------------------------------------------------------------

    /// Checks whether `quantity` units could be bought right now.
    ///
    /// Does not look at the active flag; that is a store-level concern.
    pub fn validate_purchase(&self, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let ProductKind::Capped { maximum } = self.kind {
            if quantity > maximum {
                return Err(CoreError::LimitExceeded {
                    name: self.name.clone(),
                    maximum,
                    requested: quantity,
                });
            }
        }

        if self.kind.tracks_stock() && quantity > self.stock {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.stock,
                requested: quantity,
            });
        }

        Ok(())
    }

    /// Prices `quantity` units without buying them.
    pub fn quote(&self, quantity: i64) -> CoreResult<Money> {
        self.validate_purchase(quantity)?;
        self.line_price(quantity)
    }

    /// Buys `quantity` units and returns the promotion-adjusted total.
    ///
    /// Either the price is computed and the stock reduced, or the call fails
    /// and nothing changes. A line total too large for 64 bits fails with
    /// `Overflow` before the stock is touched.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{CoreError, Money, Product};
    ///
    /// let mut phone = Product::new("Smartphone", Money::from_cents(50_000), 5).unwrap();
    /// assert_eq!(phone.purchase(2).unwrap(), Money::from_cents(100_000));
    /// assert_eq!(phone.stock(), 3);
    ///
    /// let err = phone.purchase(4).unwrap_err();
    /// assert!(matches!(err, CoreError::InsufficientStock { available: 3, .. }));
    /// assert_eq!(phone.stock(), 3);
    /// ```
    pub fn purchase(&mut self, quantity: i64) -> CoreResult<Money> {
        let total = self.quote(quantity)?;
        self.take_stock(quantity)?;
        Ok(total)
    }

    /// Removes `quantity` units from stock. Callers quote first, so the
    /// quantity is already known to be available.
    pub(crate) fn take_stock(&mut self, quantity: i64) -> CoreResult<()> {
        if self.kind.tracks_stock() {
            self.set_stock(self.stock - quantity)?;
        }
        Ok(())
    }

    fn line_price(&self, quantity: i64) -> CoreResult<Money> {
        match &self.promotion {
            Some(promotion) => promotion.apply(self.price, quantity),
            None => self
                .price
                .checked_multiply_quantity(quantity)
                .ok_or(CoreError::Overflow {
                    operation: "line price",
                }),
        }
    }

    // -------------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------------

    /// One-line human-readable summary.
    ///
    /// ```text
    /// Standard:  MacBook Air M2, Price: $1450.00, Quantity: 100, Promotion: Second Half price!
    /// Unlimited: Windows License, Price: $125.00, Promotion: 30% off!
    /// Capped:    Shipping, Price: $10.00, Quantity: 250, Maximum: 1
    /// ```
    pub fn describe(&self) -> String {
        let mut line = format!("{}, Price: {}", self.name, self.price);

        match self.kind {
            ProductKind::Standard => {
                line.push_str(&format!(", Quantity: {}", self.stock));
            }
            ProductKind::Unlimited => {}
            ProductKind::Capped { maximum } => {
                line.push_str(&format!(", Quantity: {}, Maximum: {}", self.stock, maximum));
            }
        }

        if let Some(promotion) = &self.promotion {
            line.push_str(&format!(", Promotion: {}", promotion.name()));
        }

        line
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dollars(amount: i64) -> Money {
        Money::from_major_minor(amount, 0)
    }

    #[test]
    fn test_create_normal_product() {
        let product = Product::new("Laptop", dollars(1000), 10).unwrap();
        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.price(), dollars(1000));
        assert_eq!(product.stock(), 10);
        assert!(product.is_active());
        assert_eq!(product.kind(), ProductKind::Standard);
        assert!(product.promotion().is_none());
    }

    #[test]
    fn test_create_invalid_product() {
        assert!(matches!(
            Product::new("", dollars(1450), 100),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            Product::new("MacBook Air M2", dollars(-10), 100),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(Product::new("MacBook Air M2", dollars(1450), -1).is_err());
        assert!(Product::capped("Shipping", dollars(10), 5, -1).is_err());
    }

    #[test]
    fn test_ids_are_unique_per_product() {
        let a = Product::new("Same", dollars(1), 1).unwrap();
        let b = Product::new("Same", dollars(1), 1).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_zero_stock_at_creation_is_inactive() {
        let product = Product::new("Sold Out", dollars(5), 0).unwrap();
        assert!(!product.is_active());

        let unlimited = Product::unlimited("Windows License", dollars(125)).unwrap();
        assert!(unlimited.is_active());
    }

    #[test]
    fn test_set_stock_negative_rejected() {
        let mut product = Product::new("MacBook Air M2", dollars(1450), 100).unwrap();
        assert!(product.set_stock(-5).is_err());
        assert_eq!(product.stock(), 100);
        assert!(product.is_active());
    }

    #[test]
    fn test_product_becomes_inactive_when_quantity_zero() {
        let mut product = Product::new("Headphones", dollars(200), 1).unwrap();
        product.purchase(1).unwrap();

        assert_eq!(product.stock(), 0);
        assert!(!product.is_active());
    }

    #[test]
    fn test_capped_product_inactive_at_zero_stock() {
        let mut bought_out = Product::capped("Shipping", dollars(10), 2, 5).unwrap();
        bought_out.purchase(2).unwrap();
        assert_eq!(bought_out.stock(), 0);
        assert!(!bought_out.is_active());

        let mut emptied = Product::capped("Gift Wrap", dollars(5), 3, 1).unwrap();
        emptied.set_stock(0).unwrap();
        assert!(!emptied.is_active());
    }

    #[test]
    fn test_overflowing_line_price_leaves_product_unchanged() {
        let mut product = Product::new("Bulk Item", Money::from_cents(i64::MAX / 2), 10).unwrap();

        assert!(matches!(
            product.purchase(3),
            Err(CoreError::Overflow { .. })
        ));
        assert_eq!(product.stock(), 10);
        assert!(product.is_active());
    }

    #[test]
    fn test_restock_does_not_reactivate() {
        let mut product = Product::new("Headphones", dollars(200), 1).unwrap();
        product.set_stock(0).unwrap();
        product.set_stock(10).unwrap();
        assert!(!product.is_active());

        product.activate();
        assert!(product.is_active());
    }

    #[test]
    fn test_purchase_modifies_quantity_and_returns_total() {
        let mut product = Product::new("Smartphone", dollars(500), 5).unwrap();
        assert_eq!(product.purchase(2).unwrap(), dollars(1000));
        assert_eq!(product.stock(), 3);
    }

    #[test]
    fn test_buying_more_than_stock_fails() {
        let mut product = Product::new("Tablet", dollars(300), 2).unwrap();
        let err = product.purchase(3).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            }
        ));
        assert_eq!(product.stock(), 2);
    }

    #[test]
    fn test_buying_non_positive_quantity_fails() {
        let mut product = Product::new("Monitor", dollars(150), 10).unwrap();
        assert!(matches!(
            product.purchase(0),
            Err(CoreError::InvalidQuantity { requested: 0 })
        ));
        assert!(matches!(
            product.purchase(-1),
            Err(CoreError::InvalidQuantity { requested: -1 })
        ));
        assert_eq!(product.stock(), 10);
    }

    #[test]
    fn test_non_stocked_product() {
        let mut product = Product::unlimited("Windows License", dollars(125)).unwrap();
        assert_eq!(product.stock(), 0);

        assert!(matches!(
            product.set_stock(1),
            Err(CoreError::Validation(ValidationError::Fixed { value: 0, .. }))
        ));
        assert!(product.set_stock(0).is_ok());

        assert_eq!(product.purchase(1_000).unwrap(), dollars(125_000));
        assert_eq!(product.stock(), 0);
        assert!(product.is_active());
    }

    #[test]
    fn test_limited_product() {
        let mut product = Product::capped("Shipping", dollars(10), 5, 1).unwrap();
        assert_eq!(product.maximum(), Some(1));

        assert!(matches!(
            product.purchase(2),
            Err(CoreError::LimitExceeded {
                maximum: 1,
                requested: 2,
                ..
            })
        ));
        assert_eq!(product.purchase(1).unwrap(), dollars(10));
        assert_eq!(product.stock(), 4);
    }

    #[test]
    fn test_limit_checked_before_stock() {
        let mut product = Product::capped("Shipping", dollars(10), 1, 2).unwrap();
        assert!(matches!(
            product.purchase(3),
            Err(CoreError::LimitExceeded { .. })
        ));
        assert!(matches!(
            product.purchase(2),
            Err(CoreError::InsufficientStock { .. })
        ));
    }

    #[test]
    fn test_quote_does_not_mutate() {
        let mut product = Product::new("Laptop", dollars(1000), 10).unwrap();
        product.set_promotion(Some(Arc::new(
            Promotion::percent_discount("10% Off", 10.0).unwrap(),
        )));

        assert_eq!(product.quote(2).unwrap(), dollars(1800));
        assert_eq!(product.stock(), 10);
        assert!(product.quote(11).is_err());
    }

    #[test]
    fn test_product_with_promotions() {
        let mut laptop = Product::new("Laptop", dollars(1000), 10).unwrap();
        laptop.set_promotion(Some(Arc::new(
            Promotion::percent_discount("10% Off", 10.0).unwrap(),
        )));
        assert_eq!(laptop.purchase(2).unwrap(), dollars(1800));
        assert_eq!(laptop.stock(), 8);

        let mut headphones = Product::new("Headphones", dollars(200), 10).unwrap();
        headphones.set_promotion(Some(Arc::new(
            Promotion::second_half_price("Second Half Price").unwrap(),
        )));
        assert_eq!(headphones.purchase(3).unwrap(), dollars(500));
        assert_eq!(headphones.stock(), 7);

        let mut monitor = Product::new("Monitor", dollars(150), 10).unwrap();
        monitor.set_promotion(Some(Arc::new(
            Promotion::third_one_free("Buy 2 Get 1 Free").unwrap(),
        )));
        assert_eq!(monitor.purchase(3).unwrap(), dollars(300));
        assert_eq!(monitor.stock(), 7);
    }

    #[test]
    fn test_remove_promotion() {
        let mut tablet = Product::new("Tablet", dollars(300), 5).unwrap();
        tablet.set_promotion(Some(Arc::new(
            Promotion::percent_discount("15% Off", 15.0).unwrap(),
        )));
        assert_eq!(tablet.purchase(2).unwrap(), dollars(510));

        tablet.set_promotion(None);
        assert_eq!(tablet.purchase(1).unwrap(), dollars(300));
    }

    #[test]
    fn test_promotion_shared_between_products() {
        let promo = Arc::new(Promotion::third_one_free("Third One Free!").unwrap());
        let mut a = Product::new("A", dollars(10), 10).unwrap();
        let mut b = Product::new("B", dollars(20), 10).unwrap();
        a.set_promotion(Some(Arc::clone(&promo)));
        b.set_promotion(Some(Arc::clone(&promo)));

        assert_eq!(a.purchase(3).unwrap(), dollars(20));
        assert_eq!(b.purchase(3).unwrap(), dollars(40));
        assert_eq!(Arc::strong_count(&promo), 3);
    }

    #[test]
    fn test_describe_standard() {
        let mut product = Product::new("Smartphone", dollars(800), 5).unwrap();
        assert_eq!(product.describe(), "Smartphone, Price: $800.00, Quantity: 5");

        product.set_promotion(Some(Arc::new(
            Promotion::percent_discount("20% Off", 20.0).unwrap(),
        )));
        assert!(product.describe().contains("Promotion: 20% Off"));
        assert_eq!(product.to_string(), product.describe());
    }

    #[test]
    fn test_describe_unlimited_and_capped() {
        let license = Product::unlimited("Windows License", dollars(125)).unwrap();
        assert_eq!(license.describe(), "Windows License, Price: $125.00");

        let shipping = Product::capped("Shipping", dollars(10), 250, 1).unwrap();
        assert_eq!(
            shipping.describe(),
            "Shipping, Price: $10.00, Quantity: 250, Maximum: 1"
        );
    }
}
