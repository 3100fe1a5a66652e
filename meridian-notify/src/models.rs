use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Severity of a user-facing alert, matching the four visual styles the
/// dashboard renders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

impl FromStr for AlertKind {
    type Err = NotifyError;

    /// Case-insensitive parse for producers holding untyped strings.
    /// Anything outside the four kinds fails fast.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(AlertKind::Success),
            "INFO" => Ok(AlertKind::Info),
            "WARNING" => Ok(AlertKind::Warning),
            "ERROR" => Ok(AlertKind::Error),
            _ => Err(NotifyError::InvalidKind(s.to_string())),
        }
    }
}

/// A transient user-facing status message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub message: String,
    /// True once removal has been requested. The alert stays in the
    /// collection for the exit-animation window before it is purged.
    pub exiting: bool,
    pub created_at: DateTime<Utc>,
    pub metadata: serde_json::Value,
}

impl Alert {
    pub fn new(kind: AlertKind, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message,
            exiting: false,
            created_at: Utc::now(),
            metadata: serde_json::json!({}),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid alert kind: {0}")]
    InvalidKind(String),
}
