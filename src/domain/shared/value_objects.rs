//! Shared value objects

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Minimum number of characters the client accepts for a phone number
pub const DEFAULT_MIN_PHONE_LENGTH: usize = 10;

/// Call session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Phone number as typed by the user
///
/// Only the length is checked. The number is passed to the dispatcher as-is,
/// the server never inspects its format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str, min_length: usize) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < min_length {
            return Err(DomainError::Validation(format!(
                "Phone number must have at least {} characters",
                min_length
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// API key/secret pair forwarded to the dispatcher
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    api_key: String,
    api_secret: String,
}

impl ApiCredentials {
    /// Build credentials, rejecting blank values and values that would not
    /// fit on a single `KEY=VALUE` line
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self, DomainError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() || api_secret.trim().is_empty() {
            return Err(DomainError::Unauthorized(
                "API key and API secret are required".to_string(),
            ));
        }

        if has_control_chars(&api_key) || has_control_chars(&api_secret) {
            return Err(DomainError::Validation(
                "API key and API secret must not contain line breaks or control characters"
                    .to_string(),
            ));
        }

        Ok(Self { api_key, api_secret })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

fn has_control_chars(value: &str) -> bool {
    value.chars().any(char::is_control)
}

// Never print the secret
impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}
