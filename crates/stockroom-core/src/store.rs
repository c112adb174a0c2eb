//! # Store
//!
//! The store owns an ordered collection of products and checks out baskets
//! against it.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout([(id, qty), ...])     processed strictly in basket order     │
//! │                                                                         │
//! │  for each line:                                                         │
//! │    id not in store?   ──► ProductNotInStore  ─┐                         │
//! │    product inactive?  ──► ProductInactive    ─┤  abort; lines already   │
//! │    product.quote()    ──► Invalid/Insufficient├─ purchased keep their   │
//! │                           /LimitExceeded     ─┤  stock mutation         │
//! │    total + price      ──► Overflow           ─┘                         │
//! │    take stock, total += line price                                      │
//! │                                                                         │
//! │  ──► Ok(total)                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Name Lookup
//! - [`Store::find_exact`]: case-insensitive equality, active products only
//! - [`Store::find_partial`]: case-insensitive substring, any product, for
//!   display only

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::{Product, ProductId};

/// One basket entry: which product, how many units.
pub type BasketLine = (ProductId, i64);

/// In-memory store.
///
/// Products keep their insertion order. Promotions are not owned here; each
/// product holds its own shared handle.
#[derive(Debug, Default)]
pub struct Store {
    products: Vec<Product>,
}

impl Store {
    /// Creates a store from an initial product set.
    pub fn new(products: Vec<Product>) -> Self {
        Store { products }
    }

    /// Appends a product and returns its id.
    pub fn add_product(&mut self, product: Product) -> ProductId {
        let id = product.id();
        debug!(%id, name = %product.name(), "Adding product");
        self.products.push(product);
        id
    }

    /// Removes a product, handing it back to the caller.
    pub fn remove_product(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        debug!(%id, "Removing product");
        Some(self.products.remove(index))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id() == id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    /// All products, active or not, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Active products in insertion order.
    pub fn list_active(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    /// Sum of stock over active products. Unlimited products contribute 0.
    ///
    /// Fails with `Overflow` if the sum does not fit in an `i64`.
    pub fn total_active_quantity(&self) -> CoreResult<i64> {
        self.products
            .iter()
            .filter(|p| p.is_active())
            .try_fold(0i64, |sum, p| sum.checked_add(p.stock()))
            .ok_or(CoreError::Overflow {
                operation: "total active quantity",
            })
    }

    /// Exact, case-insensitive name match among active products.
    pub fn find_exact(&self, name: &str) -> Option<&Product> {
        let needle = name.to_lowercase();
        self.products
            .iter()
            .find(|p| p.is_active() && p.name().to_lowercase() == needle)
    }

    /// Products (active or not) whose name contains `name`, ignoring case.
    pub fn find_partial(&self, name: &str) -> Vec<&Product> {
        let needle = name.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Buys every basket line in order and returns the summed price.
    ///
    /// The first failing line aborts the checkout. Lines before it stay
    /// purchased (their stock is not restored); lines after it are not
    /// touched.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{CoreError, Money, Product, Store};
    ///
    /// let pixel = Product::new("Google Pixel 7", Money::from_cents(50_000), 250).unwrap();
    /// let pixel_id = pixel.id();
    /// let mut store = Store::new(vec![pixel]);
    ///
    /// let total = store.checkout(&[(pixel_id, 2)]).unwrap();
    /// assert_eq!(total, Money::from_cents(100_000));
    ///
    /// let stranger = Product::new("Not stocked here", Money::from_cents(100), 1).unwrap();
    /// let err = store.checkout(&[(stranger.id(), 1)]).unwrap_err();
    /// assert!(matches!(err, CoreError::ProductNotInStore { .. }));
    /// ```
    pub fn checkout(&mut self, basket: &[BasketLine]) -> CoreResult<Money> {
        let mut total = Money::zero();

        for (line, &(id, quantity)) in basket.iter().enumerate() {
            match self.checkout_line(id, quantity, total) {
                Ok((price, running)) => {
                    debug!(line, %id, quantity, price = %price, "Line purchased");
                    total = running;
                }
                Err(err) => {
                    warn!(
                        line,
                        %id,
                        quantity,
                        error = %err,
                        "Checkout aborted"
                    );
                    return Err(err);
                }
            }
        }

        info!(lines = basket.len(), total = %total, "Checkout complete");
        Ok(total)
    }

    /// Buys one line, returning its price and the new running total.
    ///
    /// The running total is checked before the stock moves, so an overflow
    /// leaves this line untouched.
    fn checkout_line(
        &mut self,
        id: ProductId,
        quantity: i64,
        total: Money,
    ) -> CoreResult<(Money, Money)> {
        let product = self
            .product_mut(id)
            .ok_or(CoreError::ProductNotInStore { id })?;

        if !product.is_active() {
            return Err(CoreError::ProductInactive {
                name: product.name().to_string(),
            });
        }

        let price = product.quote(quantity)?;
        let running = total.checked_add(price).ok_or(CoreError::Overflow {
            operation: "checkout total",
        })?;
        product.take_stock(quantity)?;

        Ok((price, running))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
