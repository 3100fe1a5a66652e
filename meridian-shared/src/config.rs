use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub notifications: NotificationConfig,
    pub catalog: CatalogConfig,
}

/// Timing for the alert lifecycle, in milliseconds.
#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    /// How long an alert stays visible before it is dismissed automatically.
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,

    /// Grace period between the exiting mark and the final purge. Must be
    /// at least as long as the UI's exit animation.
    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,
}

fn default_display_ms() -> u64 {
    4000
}

fn default_exit_ms() -> u64 {
    300
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
            exit_ms: default_exit_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub products: Vec<ProductEntry>,
}

/// A purchasable item as it appears in configuration files.
///
/// Discount maps are string-keyed here; `meridian-catalog` converts them
/// to typed tier/payment-method keys and rejects unknown keys at load.
#[derive(Debug, Deserialize, Clone)]
pub struct ProductEntry {
    pub id: String,
    pub name: String,
    pub base_price: f64,
    /// Privilege tier -> percent off (0-100).
    #[serde(default)]
    pub tier_discounts: HashMap<String, f64>,
    /// Payment method -> percent off (0-100), applied on top of the tier
    /// discount.
    #[serde(default)]
    pub payment_method_discounts: HashMap<String, f64>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Base configuration, always present
            .add_source(config::File::with_name("config/default"))
            // Environment-specific overrides (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in (optional)
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `MERIDIAN_NOTIFICATIONS__DISPLAY_MS=2000`
            .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
