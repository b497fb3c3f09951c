//! Username normalization and validation

use serde::{Deserialize, Serialize};

/// Marker every stored username starts with
pub const USERNAME_MARKER: char = '@';

/// Reasons a username is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username must be at least {min} characters long")]
    TooShort { min: usize },

    #[error("Username cannot be longer than {max} characters (got {len})")]
    TooLong { max: usize, len: usize },

    #[error("Character '{0}' is not allowed in usernames")]
    InvalidCharacter(char),
}

/// Length limits applied to usernames, excluding the leading marker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UsernameRules {
    pub min_username_length: usize,
    pub max_username_length: usize,
}

impl Default for UsernameRules {
    fn default() -> Self {
        Self {
            min_username_length: 1,
            max_username_length: 30,
        }
    }
}

/// Normalize a username: trim, lower-case, and ensure the `@` prefix.
///
/// `"Foo"`, `"foo"` and `" @foo "` all normalize to `"@foo"`.
pub fn normalize_username(input: &str) -> String {
    let trimmed = input.trim().to_lowercase();
    if trimmed.starts_with(USERNAME_MARKER) {
        trimmed
    } else {
        format!("{}{}", USERNAME_MARKER, trimmed)
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_'
}

/// Validate a username against `rules`, returning the normalized form.
pub fn validate_username(input: &str, rules: &UsernameRules) -> Result<String, UsernameError> {
    if input.trim().is_empty() {
        return Err(UsernameError::Empty);
    }

    let normalized = normalize_username(input);
    let handle = normalized
        .strip_prefix(USERNAME_MARKER)
        .unwrap_or(&normalized);
    let len = handle.chars().count();

    if len < rules.min_username_length.max(1) {
        return Err(UsernameError::TooShort {
            min: rules.min_username_length.max(1),
        });
    }

    if len > rules.max_username_length {
        return Err(UsernameError::TooLong {
            max: rules.max_username_length,
            len,
        });
    }

    if let Some(bad) = handle.chars().find(|c| !is_allowed(*c)) {
        return Err(UsernameError::InvalidCharacter(bad));
    }

    Ok(normalized)
}
