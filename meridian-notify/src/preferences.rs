use crate::models::AlertKind;
use serde::{Deserialize, Serialize};

/// Per-user toggles for which alert kinds actually surface. Loaded from
/// the user's stored preferences by the consuming app; everything is
/// enabled by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default = "enabled")]
    pub success: bool,
    #[serde(default = "enabled")]
    pub info: bool,
    #[serde(default = "enabled")]
    pub warning: bool,
    #[serde(default = "enabled")]
    pub error: bool,
}

fn enabled() -> bool {
    true
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            success: true,
            info: true,
            warning: true,
            error: true,
        }
    }
}

impl NotificationPreferences {
    pub fn allows(&self, kind: AlertKind) -> bool {
        match kind {
            AlertKind::Success => self.success,
            AlertKind::Info => self.info,
            AlertKind::Warning => self.warning,
            AlertKind::Error => self.error,
        }
    }
}
