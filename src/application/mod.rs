//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases:
//! - Server side: initiating a call through the dispatcher, trunk setup
//! - Client side: login, call submission and call tracking

pub mod controller;
pub mod notifier;
pub mod orchestrator;
pub mod session;
pub mod trunk;

pub use controller::{CallController, ControllerState};
pub use notifier::{ChannelNotifier, Notification, Severity, TracingNotifier, UserNotifier};
pub use orchestrator::{LocalCallApi, SessionOrchestrator};
pub use session::ClientSession;
pub use trunk::TrunkService;
