use crate::error::RemError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a reminder reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMode {
    /// Native OS notification.
    System,
    /// Always-on-top popup owned by this process.
    #[default]
    Custom,
}

impl NotificationMode {
    pub fn label(self) -> &'static str {
        match self {
            NotificationMode::System => "system notification",
            NotificationMode::Custom => "custom popup",
        }
    }
}

impl fmt::Display for NotificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationMode::System => write!(f, "system"),
            NotificationMode::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for NotificationMode {
    type Err = RemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(NotificationMode::System),
            "custom" => Ok(NotificationMode::Custom),
            other => Err(RemError::InvalidMode(other.to_string())),
        }
    }
}
