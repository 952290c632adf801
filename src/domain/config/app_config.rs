//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default lessons directory relative to the working directory
pub const DEFAULT_LESSONS_DIR: &str = "lessons";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding lesson JSON files
    pub lessons_dir: Option<String>,
    /// Run with silent no-op audio adapters
    pub mute: Option<bool>,
    /// Start each step's audio without waiting for a play command
    pub autoplay: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            lessons_dir: Some(DEFAULT_LESSONS_DIR.to_string()),
            mute: Some(false),
            autoplay: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            lessons_dir: other.lessons_dir.or(self.lessons_dir),
            mute: other.mute.or(self.mute),
            autoplay: other.autoplay.or(self.autoplay),
        }
    }

    /// Get the lessons directory, or the default if not set
    pub fn lessons_dir_or_default(&self) -> &str {
        self.lessons_dir.as_deref().unwrap_or(DEFAULT_LESSONS_DIR)
    }

    /// Get the mute setting, or false if not set
    pub fn mute_or_default(&self) -> bool {
        self.mute.unwrap_or(false)
    }

    /// Get the autoplay setting, or false if not set
    pub fn autoplay_or_default(&self) -> bool {
        self.autoplay.unwrap_or(false)
    }
}
