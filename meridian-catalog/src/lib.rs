pub mod pricing;
pub mod product;

pub use pricing::{PriceQuote, PricingEngine, PricingError};
pub use product::{Catalog, CatalogError, PaymentMethod, Product, Tier};
