//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - Repository implementations
//! - The process-based dispatcher adapter
//! - Scoped credential files handed to the dispatcher

pub mod credentials;
pub mod dispatcher;
pub mod persistence;
