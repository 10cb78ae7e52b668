//! Dispatcher ports
//!
//! The dispatcher is an opaque capability: it takes a phone number and a
//! credential file reference and prints free-form text carrying the room and
//! dispatch identifiers. Any process, library or remote call honouring that
//! contract can sit behind these traits.

use crate::domain::dispatch::output::DispatchOutcome;
use crate::domain::dispatch::request::CallRequest;
use crate::domain::shared::error::DomainError;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Failure reported by a dispatcher implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterFailure {
    #[error("failed to start dispatcher: {0}")]
    Spawn(String),

    #[error("dispatcher exited with code {code:?}: {output}")]
    Exit { code: Option<i32>, output: String },
}

impl AdapterFailure {
    /// Raw detail passed back to API callers
    pub fn details(&self) -> String {
        match self {
            AdapterFailure::Exit { output, .. } => output.clone(),
            other => other.to_string(),
        }
    }
}

/// Call provisioning port
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DispatcherAdapter: Send + Sync {
    /// Provision one call, returning the dispatcher's combined text output
    async fn dispatch(&self, phone_number: &str, credentials: &Path) -> Result<String, AdapterFailure>;
}

/// SIP trunk setup port
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrunkProvisioner: Send + Sync {
    /// Configure the outbound trunk, returning the tool's text output
    async fn setup_trunk(&self) -> Result<String, AdapterFailure>;
}

/// Client-side port to the call-initiation endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallApi: Send + Sync {
    /// Submit one call-initiation request
    async fn initiate(&self, request: CallRequest) -> Result<DispatchOutcome, DomainError>;
}
