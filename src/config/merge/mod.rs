//! Merge policy: defaults every layer starts from.

pub mod service;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Builder seeded with the defaults that must exist before any source is read.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("project_name", "My Writing Project")?
        .set_default("seed_sample_project", true)?
        .set_default("color", true)
}
