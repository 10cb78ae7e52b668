//! Shared kernel - Common types used by both the server and the client side

pub mod error;
pub mod value_objects;

pub use error::{DomainError, Result};
pub use value_objects::*;
