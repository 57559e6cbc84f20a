//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::StudioConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the user config file and environment.
    pub fn load() -> Result<StudioConfig, ApiError> {
        let config = MergeService::load(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with an explicit file layered over the user config.
    pub fn load_from_file(path: &Path) -> Result<StudioConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = MergeService::load(Some(path))?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> StudioConfig {
        StudioConfig::default()
    }
}
