//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for configuration storage.
///
/// A missing file is not an error: `load` yields an empty config and the
/// caller's defaults apply.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration; empty when no file exists
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist the configuration
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the config file
    fn path(&self) -> PathBuf;

    /// Whether a config file is present
    fn exists(&self) -> bool;

    /// Write a fresh config file with defaults. Refuses to overwrite.
    async fn init(&self) -> Result<(), ConfigError>;
}
