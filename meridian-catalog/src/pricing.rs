use crate::product::{Catalog, PaymentMethod, Tier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a price computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub base_price: f64,
    pub discounted_price: f64,
    /// Tier percent-off that was applied (0 if the tier has no entry).
    pub percent_off: f64,
    /// Payment-method percent-off that was applied (0 if none matched).
    pub additional_percent_off: f64,
    pub quoted_at: DateTime<Utc>,
}

/// Computes the price a given user actually pays for a product.
pub struct PricingEngine {
    catalog: Catalog,
}

impl PricingEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Quote a product for a user.
    ///
    /// The tier discount applies first, then the payment-method discount
    /// multiplicatively on the already-discounted price: 10% then 30%
    /// yields 0.9 * 0.7 = 63% of base, not 60%. No rounding happens here;
    /// callers round for display only.
    ///
    /// Unknown product ids fail with [`PricingError::NotFound`]. A tier or
    /// payment method without an entry pays full price for that step.
    pub fn quote(
        &self,
        product_id: &str,
        tier: Tier,
        payment_method: Option<PaymentMethod>,
    ) -> Result<PriceQuote, PricingError> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| PricingError::NotFound(product_id.to_string()))?;

        let percent_off = match product.tier_discounts.get(&tier) {
            Some(percent) => *percent,
            None => {
                debug!(product = %product_id, ?tier, "no tier discount, full price");
                0.0
            }
        };
        let mut discounted_price = product.base_price * (1.0 - percent_off / 100.0);

        let additional_percent_off = payment_method
            .and_then(|method| product.payment_method_discounts.get(&method))
            .copied()
            .unwrap_or(0.0);
        discounted_price *= 1.0 - additional_percent_off / 100.0;

        Ok(PriceQuote {
            base_price: product.base_price,
            discounted_price,
            percent_off,
            additional_percent_off,
            quoted_at: Utc::now(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Product not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_shared::config::CatalogConfig;

    fn engine() -> PricingEngine {
        let config: CatalogConfig = serde_json::from_value(serde_json::json!({
            "products": [{
                "id": "report",
                "name": "Accounting report",
                "base_price": 40.0,
                "tier_discounts": { "PRO": 10.0 },
                "payment_method_discounts": { "CRUX": 30.0 }
            }]
        }))
        .unwrap();

        PricingEngine::new(Catalog::from_config(&config).unwrap())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn tier_discount_applies() {
        let quote = engine().quote("report", Tier::Pro, None).unwrap();

        assert_close(quote.base_price, 40.0);
        assert_close(quote.discounted_price, 36.0);
        assert_close(quote.percent_off, 10.0);
        assert_close(quote.additional_percent_off, 0.0);
    }

    #[test]
    fn payment_method_discount_stacks_multiplicatively() {
        let quote = engine()
            .quote("report", Tier::Pro, Some(PaymentMethod::Crux))
            .unwrap();

        // 40 * 0.9 * 0.7, not 40 * (1 - 0.40)
        assert_close(quote.discounted_price, 25.2);
        assert_close(quote.percent_off, 10.0);
        assert_close(quote.additional_percent_off, 30.0);
    }

    #[test]
    fn unknown_product_fails() {
        let result = engine().quote("unknown-product", Tier::Pro, None);
        assert!(matches!(result, Err(PricingError::NotFound(_))));
    }

    #[test]
    fn tier_without_entry_pays_full_price() {
        let quote = engine().quote("report", Tier::Basic, None).unwrap();

        assert_close(quote.discounted_price, 40.0);
        assert_close(quote.percent_off, 0.0);
    }

    #[test]
    fn method_without_entry_changes_nothing() {
        let quote = engine()
            .quote("report", Tier::Pro, Some(PaymentMethod::Card))
            .unwrap();

        assert_close(quote.discounted_price, 36.0);
        assert_close(quote.additional_percent_off, 0.0);
    }

    #[test]
    fn zero_base_price_stays_zero() {
        let mut product = engine().catalog().product("report").unwrap().clone();
        product.base_price = 0.0;

        let mut catalog = Catalog::new();
        catalog.insert(product).unwrap();

        let quote = PricingEngine::new(catalog)
            .quote("report", Tier::Pro, Some(PaymentMethod::Crux))
            .unwrap();
        assert_close(quote.discounted_price, 0.0);
    }
}
