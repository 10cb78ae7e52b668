//! Domain layer - Core business logic and rules
//!
//! This layer contains:
//! - Aggregates: the call session and its status rules
//! - Value Objects: identifiers, phone numbers, credentials
//! - Ports: the dispatcher adapter and the call history repository
//! - Parsing of the dispatcher's output contract

pub mod call;
pub mod dispatch;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
