//! Application configuration persistence
//!
//! Stores user preferences in `~/.config/warpkeys/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::keymap::KeymapSettings;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Repeat delay of held rate controls, in milliseconds
    #[serde(default = "default_repeat_delay_ms")]
    pub repeat_delay_ms: u64,
    /// Seconds before an unanswered chord capture is cancelled
    #[serde(default = "default_capture_timeout_secs")]
    pub capture_timeout_secs: u64,
}

fn default_repeat_delay_ms() -> u64 {
    200
}

fn default_capture_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repeat_delay_ms: default_repeat_delay_ms(),
            capture_timeout_secs: default_capture_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load config from the user config dir, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, or return defaults if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn keymap_settings(&self) -> KeymapSettings {
        KeymapSettings {
            repeat_delay: Duration::from_millis(self.repeat_delay_ms),
            capture_timeout: Duration::from_secs(self.capture_timeout_secs),
        }
    }
}

impl From<&AppConfig> for KeymapSettings {
    fn from(config: &AppConfig) -> Self {
        config.keymap_settings()
    }
}
