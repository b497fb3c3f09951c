//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;
use crate::models::UsernameRules;

/// Validate the entire configuration.
pub fn validate_config(config: &FollowTrackerConfig) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_username_rules(&config.validation)?;
    validate_profile_config(&config.profile)?;

    Ok(())
}

/// Validate storage configuration.
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Data directory cannot be empty".to_string(),
        ));
    }

    if config.data_file.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Data file name cannot be empty".to_string(),
        ));
    }

    if config.backup_file.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Backup file name cannot be empty".to_string(),
        ));
    }

    if config.data_file == config.backup_file {
        return Err(ConfigError::ValidationError(
            "Backup file must differ from the data file".to_string(),
        ));
    }

    Ok(())
}

/// Validate username limits.
fn validate_username_rules(rules: &UsernameRules) -> Result<(), ConfigError> {
    if rules.min_username_length == 0 {
        return Err(ConfigError::ValidationError(
            "min_username_length must be at least 1".to_string(),
        ));
    }

    if rules.max_username_length < rules.min_username_length {
        return Err(ConfigError::ValidationError(format!(
            "max_username_length ({}) cannot be smaller than min_username_length ({})",
            rules.max_username_length, rules.min_username_length
        )));
    }

    Ok(())
}

/// Validate the profile link template.
fn validate_profile_config(config: &ProfileConfig) -> Result<(), ConfigError> {
    if !config.url_template.contains("{username}") {
        return Err(ConfigError::ValidationError(
            "Profile URL template must contain {username}".to_string(),
        ));
    }

    Ok(())
}
