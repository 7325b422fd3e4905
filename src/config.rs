use crate::{
    error::{RemError, Result},
    mode::NotificationMode,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Time to drink water";

/// Independent switches for the optional parts of the reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub history: bool,
    pub custom_message: bool,
    pub native_notifications: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            history: true,
            custom_message: true,
            native_notifications: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub interval_minutes: u32,
    pub mode: NotificationMode,
    pub autostart: bool,
    pub title: String,
    /// Replaces the built-in messages when non-empty.
    pub messages: Vec<String>,
    pub features: Features,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_minutes: 30,
            mode: NotificationMode::Custom,
            autostart: false,
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            features: Features::default(),
        }
    }
}

impl Config {
    pub fn interval(&self) -> Result<NonZeroU32> {
        NonZeroU32::new(self.interval_minutes).ok_or_else(|| {
            RemError::InvalidInterval("interval_minutes must be greater than zero".to_string())
        })
    }

    pub fn message_pool(&self) -> Option<Vec<String>> {
        if self.messages.is_empty() {
            None
        } else {
            Some(self.messages.clone())
        }
    }

    /// A missing file is not an error: the defaults apply and nothing is written.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("no config at {}, using defaults", config_path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)?;
        let config = parse_config(&content)?;
        info!("config loaded from {}", config_path.display());

        Ok(config)
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_json::from_str(content)?;
    config.interval()?;
    Ok(config)
}

/// Write the bundled example config unless something is already there.
/// Returns whether a file was written.
pub fn generate_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let ex_config = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/access/example_config.json"));
    fs::write(path, ex_config)?;

    Ok(true)
}
