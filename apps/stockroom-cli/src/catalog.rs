//! # Catalog
//!
//! Describes the initial stock and promotion set, and turns it into a
//! [`Store`].
//!
//! ## File Format (JSON)
//! ```text
//! {
//!   "promotions": [
//!     { "kind": "percent_discount", "name": "30% off!", "percent": 30.0 },
//!     { "kind": "second_half_price", "name": "Second Half price!" }
//!   ],
//!   "products": [
//!     { "kind": "standard", "name": "Google Pixel 7", "price_cents": 50000, "stock": 250 },
//!     { "kind": "unlimited", "name": "Windows License", "price_cents": 12500,
//!       "promotion": "30% off!" },
//!     { "kind": "capped", "name": "Shipping", "price_cents": 1000, "stock": 250, "maximum": 1 }
//!   ]
//! }
//! ```
//! Products reference promotions by name; one promotion may be shared by
//! several products.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stockroom_core::{CoreError, Money, Product, Promotion, Store};
use tracing::{debug, info};

/// A promotion definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionEntry {
    PercentDiscount { name: String, percent: f64 },
    SecondHalfPrice { name: String },
    ThirdOneFree { name: String },
}

impl PromotionEntry {
    pub fn name(&self) -> &str {
        match self {
            PromotionEntry::PercentDiscount { name, .. }
            | PromotionEntry::SecondHalfPrice { name }
            | PromotionEntry::ThirdOneFree { name } => name,
        }
    }

    fn build(&self) -> Result<Promotion, CoreError> {
        match self {
            PromotionEntry::PercentDiscount { name, percent } => {
                Promotion::percent_discount(name.as_str(), *percent)
            }
            PromotionEntry::SecondHalfPrice { name } => Promotion::second_half_price(name.as_str()),
            PromotionEntry::ThirdOneFree { name } => Promotion::third_one_free(name.as_str()),
        }
    }
}

/// A product definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductEntry {
    Standard {
        name: String,
        price_cents: i64,
        stock: i64,
        #[serde(default)]
        promotion: Option<String>,
    },
    Unlimited {
        name: String,
        price_cents: i64,
        #[serde(default)]
        promotion: Option<String>,
    },
    Capped {
        name: String,
        price_cents: i64,
        stock: i64,
        maximum: i64,
        #[serde(default)]
        promotion: Option<String>,
    },
}

impl ProductEntry {
    pub fn name(&self) -> &str {
        match self {
            ProductEntry::Standard { name, .. }
            | ProductEntry::Unlimited { name, .. }
            | ProductEntry::Capped { name, .. } => name,
        }
    }

    pub fn promotion(&self) -> Option<&str> {
        match self {
            ProductEntry::Standard { promotion, .. }
            | ProductEntry::Unlimited { promotion, .. }
            | ProductEntry::Capped { promotion, .. } => promotion.as_deref(),
        }
    }

    fn build(&self) -> Result<Product, CoreError> {
        match self {
            ProductEntry::Standard {
                name,
                price_cents,
                stock,
                ..
            } => Product::new(name.as_str(), Money::from_cents(*price_cents), *stock),
            ProductEntry::Unlimited {
                name, price_cents, ..
            } => Product::unlimited(name.as_str(), Money::from_cents(*price_cents)),
            ProductEntry::Capped {
                name,
                price_cents,
                stock,
                maximum,
                ..
            } => Product::capped(
                name.as_str(),
                Money::from_cents(*price_cents),
                *stock,
                *maximum,
            ),
        }
    }
}

/// Initial store contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub promotions: Vec<PromotionEntry>,
    pub products: Vec<ProductEntry>,
}

impl Catalog {
    /// The demo store: three phones/computers, a license and shipping.
    pub fn builtin() -> Self {
        Catalog {
            promotions: vec![
                PromotionEntry::SecondHalfPrice {
                    name: "Second Half price!".to_string(),
                },
                PromotionEntry::ThirdOneFree {
                    name: "Third One Free!".to_string(),
                },
                PromotionEntry::PercentDiscount {
                    name: "30% off!".to_string(),
                    percent: 30.0,
                },
            ],
            products: vec![
                ProductEntry::Standard {
                    name: "MacBook Air M2".to_string(),
                    price_cents: 145_000,
                    stock: 100,
                    promotion: Some("Second Half price!".to_string()),
                },
                ProductEntry::Standard {
                    name: "Bose QuietComfort Earbuds".to_string(),
                    price_cents: 25_000,
                    stock: 500,
                    promotion: Some("Third One Free!".to_string()),
                },
                ProductEntry::Standard {
                    name: "Google Pixel 7".to_string(),
                    price_cents: 50_000,
                    stock: 250,
                    promotion: None,
                },
                ProductEntry::Unlimited {
                    name: "Windows License".to_string(),
                    price_cents: 12_500,
                    promotion: Some("30% off!".to_string()),
                },
                ProductEntry::Capped {
                    name: "Shipping".to_string(),
                    price_cents: 1_000,
                    stock: 250,
                    maximum: 1,
                    promotion: None,
                },
            ],
        }
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = json.len(), "Read catalog file");
        Catalog::from_json(&json)
    }

    /// Builds the store, wiring each product to its shared promotion.
    pub fn build(&self) -> Result<Store, CatalogError> {
        let mut promotions: HashMap<&str, Arc<Promotion>> = HashMap::new();
        for entry in &self.promotions {
            let promotion = entry.build()?;
            if promotions.insert(entry.name(), Arc::new(promotion)).is_some() {
                return Err(CatalogError::DuplicatePromotion(entry.name().to_string()));
            }
        }

        let mut store = Store::default();
        for entry in &self.products {
            let mut product = entry.build()?;
            if let Some(promotion_name) = entry.promotion() {
                let promotion = promotions.get(promotion_name).ok_or_else(|| {
                    CatalogError::UnknownPromotion {
                        product: entry.name().to_string(),
                        promotion: promotion_name.to_string(),
                    }
                })?;
                product.set_promotion(Some(Arc::clone(promotion)));
            }
            store.add_product(product);
        }

        info!(
            products = store.len(),
            promotions = promotions.len(),
            "Catalog loaded"
        );
        Ok(store)
    }
}

/// Catalog loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Promotion '{0}' is defined more than once")]
    DuplicatePromotion(String),

    #[error("Product '{product}' references unknown promotion '{promotion}'")]
    UnknownPromotion { product: String, promotion: String },

    #[error("Invalid catalog entry: {0}")]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_builds_demo_store() {
        let store = Catalog::builtin().build().unwrap();

        assert_eq!(store.len(), 5);
        assert_eq!(store.total_active_quantity().unwrap(), 100 + 500 + 250 + 250);

        let lines: Vec<String> = store.list_active().iter().map(|p| p.describe()).collect();
        assert_eq!(
            lines[0],
            "MacBook Air M2, Price: $1450.00, Quantity: 100, Promotion: Second Half price!"
        );
        assert_eq!(lines[3], "Windows License, Price: $125.00, Promotion: 30% off!");
        assert_eq!(lines[4], "Shipping, Price: $10.00, Quantity: 250, Maximum: 1");
    }

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(
            r#"{
                "promotions": [
                    { "kind": "percent_discount", "name": "10% off", "percent": 10 }
                ],
                "products": [
                    { "kind": "standard", "name": "Laptop", "price_cents": 100000,
                      "stock": 10, "promotion": "10% off" },
                    { "kind": "capped", "name": "Gift Wrap", "price_cents": 500,
                      "stock": 20, "maximum": 2 }
                ]
            }"#,
        )
        .unwrap();

        let mut store = catalog.build().unwrap();
        let laptop = store.find_exact("laptop").unwrap().id();
        let total = store.checkout(&[(laptop, 2)]).unwrap();
        assert_eq!(total, Money::from_cents(180_000));
    }

    #[test]
    fn test_promotions_are_shared() {
        let catalog = Catalog::from_json(
            r#"{
                "promotions": [{ "kind": "third_one_free", "name": "3for2" }],
                "products": [
                    { "kind": "standard", "name": "A", "price_cents": 100, "stock": 3,
                      "promotion": "3for2" },
                    { "kind": "standard", "name": "B", "price_cents": 100, "stock": 3,
                      "promotion": "3for2" }
                ]
            }"#,
        )
        .unwrap();
        let store = catalog.build().unwrap();

        let a = store.products()[0].promotion().unwrap();
        let b = store.products()[1].promotion().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_unknown_promotion_rejected() {
        let catalog = Catalog {
            promotions: vec![],
            products: vec![ProductEntry::Standard {
                name: "Laptop".to_string(),
                price_cents: 100,
                stock: 1,
                promotion: Some("missing".to_string()),
            }],
        };
        assert!(matches!(
            catalog.build(),
            Err(CatalogError::UnknownPromotion { .. })
        ));
    }

    #[test]
    fn test_duplicate_promotion_rejected() {
        let catalog = Catalog {
            promotions: vec![
                PromotionEntry::SecondHalfPrice {
                    name: "dup".to_string(),
                },
                PromotionEntry::ThirdOneFree {
                    name: "dup".to_string(),
                },
            ],
            products: vec![],
        };
        assert!(matches!(
            catalog.build(),
            Err(CatalogError::DuplicatePromotion(name)) if name == "dup"
        ));
    }

    #[test]
    fn test_invalid_entries_surface_core_errors() {
        let catalog = Catalog {
            promotions: vec![PromotionEntry::PercentDiscount {
                name: "bad".to_string(),
                percent: 150.0,
            }],
            products: vec![],
        };
        assert!(matches!(
            catalog.build(),
            Err(CatalogError::Core(CoreError::Configuration { .. }))
        ));

        assert!(matches!(
            Catalog::from_json(r#"{ "products": [ { "kind": "standard" } ] }"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::from_path(Path::new("/nonexistent/stockroom/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
