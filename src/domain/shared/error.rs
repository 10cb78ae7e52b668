//! Domain errors

use thiserror::Error;

/// Domain result type
pub type Result<T> = std::result::Result<T, DomainError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("{message}: {details}")]
    Adapter { message: String, details: String },

    #[error("Dispatcher timed out: {details}")]
    Timeout { details: String },

    #[error("Failed to release credential resource: {0}")]
    ResourceCleanup(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Raw failure detail for adapter-side errors, if any
    pub fn details(&self) -> Option<&str> {
        match self {
            DomainError::Adapter { details, .. } | DomainError::Timeout { details } => {
                Some(details.as_str())
            }
            _ => None,
        }
    }
}
