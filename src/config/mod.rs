//! Studio configuration
//!
//! Layered with the `config` crate: built-in defaults, then the user config
//! file, then an explicit `--config` file, then `STORYFORGE__*` environment
//! variables.

mod facade;
mod merge;
pub mod paths;
mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::generation::AssistKind;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Project name shown in headers
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Start sessions with the sample project instead of an empty tree
    #[serde(default = "default_true")]
    pub seed_sample_project: bool,

    /// Colored CLI output when writing to a terminal
    #[serde(default = "default_true")]
    pub color: bool,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generation defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Assistant mode used when a command does not name one
    #[serde(default = "default_assist_kind")]
    pub default_kind: AssistKind,

    /// Serve canned responses instead of calling a provider
    #[serde(default = "default_true")]
    pub use_demo_generator: bool,
}

fn default_project_name() -> String {
    "My Writing Project".to_string()
}

fn default_assist_kind() -> AssistKind {
    AssistKind::Continue
}

fn default_true() -> bool {
    true
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_kind: default_assist_kind(),
            use_demo_generator: default_true(),
        }
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            seed_sample_project: default_true(),
            color: default_true(),
            generation: GenerationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StudioConfig {
    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.project_name.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "project_name must not be empty".to_string(),
            ));
        }
        self.logging.validate()?;
        Ok(())
    }

    /// Effective configuration rendered as TOML.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
