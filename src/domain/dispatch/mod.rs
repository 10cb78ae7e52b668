//! Dispatch bounded context - provisioning a call through an external dispatcher

pub mod adapter;
pub mod output;
pub mod request;

pub use adapter::{AdapterFailure, CallApi, DispatcherAdapter, TrunkProvisioner};
pub use output::{parse_dispatch_output, parse_trunk_id, DispatchOutcome, UNKNOWN_TOKEN};
pub use request::{CallRequest, ValidCallRequest};
