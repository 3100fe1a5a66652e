pub mod address;
pub mod config;

pub use config::{CatalogConfig, Config, NotificationConfig, ProductEntry};
