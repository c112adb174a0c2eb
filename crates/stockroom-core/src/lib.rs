//! # stockroom-core: Pricing & Inventory Engine
//!
//! This crate is the **heart** of Stockroom. It prices purchases, applies
//! promotions and mutates stock, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stockroom-cli (text menu)                    │   │
//! │  │    List ──► Total quantity ──► Make order ──► Quit             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │  product  │  │ promotion │  │   money   │  │   │
//! │  │   │  Store    │  │  Product  │  │ Promotion │  │   Money   │  │   │
//! │  │   │ checkout  │  │ purchase  │  │   apply   │  │ discounts │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • SYNCHRONOUS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Constructor and setter input rules
//! - [`promotion`] - Pricing strategies attached to products
//! - [`product`] - Products and their stock/purchase-limit variants
//! - [`store`] - The product collection, queries and checkout
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use stockroom_core::{Money, Product, Promotion, Store};
//!
//! let promo = Arc::new(Promotion::second_half_price("Second Half price!").unwrap());
//! let mut laptop = Product::new("MacBook Air M2", Money::from_cents(145_000), 100).unwrap();
//! laptop.set_promotion(Some(promo));
//!
//! let mut store = Store::new(vec![laptop]);
//! let id = store.find_exact("macbook air m2").unwrap().id();
//!
//! let total = store.checkout(&[(id, 2)]).unwrap();
//! assert_eq!(total, Money::from_cents(217_500));
//! assert_eq!(store.total_active_quantity().unwrap(), 98);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod product;
pub mod promotion;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product::{Product, ProductId, ProductKind};
pub use promotion::Promotion;
pub use store::{BasketLine, Store};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
