//! Interface layer - External interfaces
//!
//! This layer handles:
//! - REST API endpoints
//! - The HTTP client used by the call controller
//! - The command line
//! - Request/response formatting

pub mod api;
pub mod cli;
pub mod client;

pub use client::HttpCallApi;
