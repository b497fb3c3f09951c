//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;

/// Builder for creating FollowTrackerConfig instances.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: FollowTrackerConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: FollowTrackerConfig::default(),
        }
    }

    /// Start from an existing configuration (e.g. one produced by [`super::ConfigLoader`]).
    pub fn from_config(config: FollowTrackerConfig) -> Self {
        Self { config }
    }

    /// Set the base data directory.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the document file name, relative to the data directory.
    pub fn with_data_file<P: AsRef<Path>>(mut self, file: P) -> Self {
        self.config.storage.data_file = file.as_ref().to_path_buf();
        self
    }

    /// Set the backup file name, relative to the data directory.
    pub fn with_backup_file<P: AsRef<Path>>(mut self, file: P) -> Self {
        self.config.storage.backup_file = file.as_ref().to_path_buf();
        self
    }

    /// Set the username length limits.
    pub fn with_username_length(mut self, min: usize, max: usize) -> Self {
        self.config.validation.min_username_length = min;
        self.config.validation.max_username_length = max;
        self
    }

    /// Set the profile URL template (`{username}` is substituted).
    pub fn with_profile_url_template(mut self, template: impl Into<String>) -> Self {
        self.config.profile.url_template = template.into();
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Log to a file instead of the console.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Choose the console stream used when no log file is set.
    pub fn with_log_console(mut self, console: ConsoleTarget) -> Self {
        self.config.logging.console = console;
        self
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<FollowTrackerConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }
}
