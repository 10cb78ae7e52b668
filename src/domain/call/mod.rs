//! Call bounded context - the client-side record of call sessions

pub mod aggregate;
pub mod repository;
pub mod value_object;

pub use aggregate::CallSession;
pub use repository::CallHistoryRepository;
pub use value_object::CallStatus;
