use meridian_shared::config::{CatalogConfig, ProductEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Subscription level of the requesting user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Basic,
    Pro,
    Admin,
}

impl FromStr for Tier {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BASIC" => Ok(Tier::Basic),
            "PRO" => Ok(Tier::Pro),
            "ADMIN" => Ok(Tier::Admin),
            other => Err(CatalogError::UnknownTier(other.to_string())),
        }
    }
}

/// How the customer pays. `Crux` is the protocol's native token and may
/// carry an extra discount on top of the tier discount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Crux,
}

impl FromStr for PaymentMethod {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARD" => Ok(PaymentMethod::Card),
            "CRUX" => Ok(PaymentMethod::Crux),
            other => Err(CatalogError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// A purchasable item with its discount schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub base_price: f64,
    /// Privilege tier -> percent off (0-100). Tiers without an entry pay
    /// full price.
    pub tier_discounts: HashMap<Tier, f64>,
    /// Payment method -> percent off (0-100), stacked multiplicatively on
    /// top of the tier discount.
    pub payment_method_discounts: HashMap<PaymentMethod, f64>,
    pub metadata: serde_json::Value,
}

impl Product {
    /// Build a typed product from a raw config entry. Unknown tier or
    /// payment-method keys are load-time errors, not silent zero
    /// discounts.
    pub fn from_entry(entry: &ProductEntry) -> Result<Self, CatalogError> {
        let mut tier_discounts = HashMap::new();
        for (key, percent) in &entry.tier_discounts {
            tier_discounts.insert(Tier::from_str(key)?, *percent);
        }

        let mut payment_method_discounts = HashMap::new();
        for (key, percent) in &entry.payment_method_discounts {
            payment_method_discounts.insert(PaymentMethod::from_str(key)?, *percent);
        }

        let product = Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            base_price: entry.base_price,
            tier_discounts,
            payment_method_discounts,
            metadata: entry.metadata.clone(),
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(CatalogError::InvalidProduct {
                id: self.id.clone(),
                reason: format!("base price {} out of range", self.base_price),
            });
        }

        let percents = self
            .tier_discounts
            .values()
            .chain(self.payment_method_discounts.values());
        for percent in percents {
            if !(0.0..=100.0).contains(percent) {
                return Err(CatalogError::InvalidProduct {
                    id: self.id.clone(),
                    reason: format!("discount {}% out of range", percent),
                });
            }
        }

        Ok(())
    }
}

/// In-memory product catalog, keyed by product id.
pub struct Catalog {
    products: HashMap<String, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
        }
    }

    /// Load the catalog from configuration entries.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for entry in &config.products {
            catalog.insert(Product::from_entry(entry)?)?;
        }
        Ok(catalog)
    }

    /// Add a product, validating its discount schedule.
    pub fn insert(&mut self, product: Product) -> Result<(), CatalogError> {
        product.validate()?;
        self.products.insert(product.id.clone(), product);
        Ok(())
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown privilege tier: {0}")]
    UnknownTier(String),

    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_shared::config::ProductEntry;

    fn report_entry() -> ProductEntry {
        serde_json::from_value(serde_json::json!({
            "id": "report",
            "name": "Accounting report",
            "base_price": 40.0,
            "tier_discounts": { "PRO": 10.0 },
            "payment_method_discounts": { "CRUX": 30.0 }
        }))
        .unwrap()
    }

    #[test]
    fn typed_product_from_entry() {
        let product = Product::from_entry(&report_entry()).unwrap();

        assert_eq!(product.tier_discounts[&Tier::Pro], 10.0);
        assert_eq!(product.payment_method_discounts[&PaymentMethod::Crux], 30.0);
    }

    #[test]
    fn unknown_tier_key_is_rejected() {
        let mut entry = report_entry();
        entry.tier_discounts.insert("GOLD".to_string(), 5.0);

        let result = Product::from_entry(&entry);
        assert!(matches!(result, Err(CatalogError::UnknownTier(_))));
    }

    #[test]
    fn out_of_range_discount_is_rejected() {
        let mut entry = report_entry();
        entry.tier_discounts.insert("PRO".to_string(), 150.0);

        let result = Product::from_entry(&entry);
        assert!(matches!(result, Err(CatalogError::InvalidProduct { .. })));
    }

    #[test]
    fn catalog_lookup() {
        let mut catalog = Catalog::new();
        catalog
            .insert(Product::from_entry(&report_entry()).unwrap())
            .unwrap();

        assert!(catalog.product("report").is_some());
        assert!(catalog.product("unknown-product").is_none());
    }
}
