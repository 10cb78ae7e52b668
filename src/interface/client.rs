//! HTTP client for the call endpoint
//!
//! Sends the phone number and credentials as a JSON body, never in the URL.

use super::api::dto::{CallResponse, ErrorBody};
use crate::config::ClientConfig;
use crate::domain::dispatch::{CallApi, CallRequest, DispatchOutcome};
use crate::domain::shared::error::{DomainError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

pub struct HttpCallApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCallApi {
    pub fn new(server_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), server_url)
    }

    /// Client with an overall request timeout
    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, server_url))
    }

    /// Client for `config.server_url` bounded by `config.request_timeout()`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_timeout(&config.server_url, config.request_timeout())
    }

    pub fn with_client(client: reqwest::Client, server_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/call", server_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl CallApi for HttpCallApi {
    async fn initiate(&self, request: CallRequest) -> Result<DispatchOutcome> {
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Adapter {
                message: "Call request failed".to_string(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let body: CallResponse = response.json().await.map_err(|e| DomainError::Adapter {
                message: "Invalid response from call endpoint".to_string(),
                details: e.to_string(),
            })?;
            return Ok(DispatchOutcome {
                room_name: body.room_name,
                dispatch_id: body.dispatch_id,
            });
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_else(|_| ErrorBody {
            success: false,
            error: status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
            details: None,
        });

        Err(error_from_status(status, body))
    }
}

fn error_from_status(status: StatusCode, body: ErrorBody) -> DomainError {
    match status {
        StatusCode::BAD_REQUEST => DomainError::Validation(body.error),
        StatusCode::METHOD_NOT_ALLOWED => DomainError::MethodNotAllowed(body.error),
        StatusCode::UNAUTHORIZED => DomainError::Unauthorized(body.error),
        StatusCode::GATEWAY_TIMEOUT => DomainError::Timeout {
            details: body.details.unwrap_or(body.error),
        },
        _ => DomainError::Adapter {
            message: body.error,
            details: body.details.unwrap_or_else(|| status.to_string()),
        },
    }
}
