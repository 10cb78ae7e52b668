//! Call-initiation request

use crate::domain::shared::error::{DomainError, Result};
use crate::domain::shared::value_objects::ApiCredentials;
use serde::{Deserialize, Serialize};

/// Call-initiation request as received on the wire
///
/// Every field is optional here so that a missing one becomes a validation
/// error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    #[serde(rename = "phone", default)]
    pub phone_number: Option<String>,
    #[serde(rename = "apiKey", default)]
    pub api_key: Option<String>,
    #[serde(rename = "apiSecret", default)]
    pub api_secret: Option<String>,
}

/// Request that passed presence checks
#[derive(Debug, Clone)]
pub struct ValidCallRequest {
    pub phone_number: String,
    pub credentials: ApiCredentials,
}

impl CallRequest {
    pub fn new(
        phone_number: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
        }
    }

    /// True when none of the three fields is present
    pub fn is_empty(&self) -> bool {
        self.phone_number.is_none() && self.api_key.is_none() && self.api_secret.is_none()
    }

    /// Check that phone, apiKey and apiSecret are all present and non-blank,
    /// and that the credentials are single-line values
    pub fn validate(self) -> Result<ValidCallRequest> {
        let mut missing = Vec::new();
        let phone_number = present(self.phone_number, "phone", &mut missing);
        let api_key = present(self.api_key, "apiKey", &mut missing);
        let api_secret = present(self.api_secret, "apiSecret", &mut missing);

        match (phone_number, api_key, api_secret) {
            (Some(phone_number), Some(api_key), Some(api_secret)) => Ok(ValidCallRequest {
                phone_number,
                credentials: ApiCredentials::new(api_key, api_secret)?,
            }),
            _ => Err(DomainError::Validation(format!(
                "Missing parameters: {}",
                missing.join(", ")
            ))),
        }
    }
}

fn present(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            missing.push(name);
            None
        }
    }
}
