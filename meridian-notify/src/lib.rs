pub mod models;
pub mod preferences;
pub mod queue;

pub use models::{Alert, AlertKind, NotifyError};
pub use preferences::NotificationPreferences;
pub use queue::AlertQueue;
