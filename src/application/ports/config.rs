//! Config store port interface

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisting application configuration
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the config, returning an empty config if none exists
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Save the config, creating parent directories as needed
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the config file path
    fn path(&self) -> PathBuf;

    /// Check whether a config file exists
    fn exists(&self) -> bool;

    /// Create the config file with defaults; fails if it already exists
    async fn init(&self) -> Result<(), ConfigError>;
}
