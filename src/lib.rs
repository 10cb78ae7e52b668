//! TeleAgent - launcher for an AI telephone agent
//!
//! A server endpoint provisions outbound calls by running an external
//! dispatcher with per-request credentials; a client-side controller turns
//! each request into a tracked, time-bounded call session.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::error::Result;
