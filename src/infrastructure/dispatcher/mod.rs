//! Dispatcher adapter implementations

pub mod process;

pub use process::ProcessDispatcher;
