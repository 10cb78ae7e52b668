//! Call value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a tracked call session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Request sent, waiting for the orchestrator
    Calling,
    /// Dispatch accepted, call considered live
    Active,
    /// Dwell period elapsed
    Ended,
    /// Dispatch failed
    Error,
}

impl CallStatus {
    /// Check if state transition is valid
    pub fn can_transition_to(&self, new_status: &CallStatus) -> bool {
        use CallStatus::*;

        matches!(
            (self, new_status),
            (Calling, Active) | (Calling, Error) | (Active, Ended)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CallStatus::Ended | CallStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Calling => "calling",
            CallStatus::Active => "active",
            CallStatus::Ended => "ended",
            CallStatus::Error => "error",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(CallStatus::Calling.can_transition_to(&CallStatus::Active));
        assert!(CallStatus::Calling.can_transition_to(&CallStatus::Error));
        assert!(CallStatus::Active.can_transition_to(&CallStatus::Ended));
    }

    #[test]
    fn test_never_back_to_calling() {
        for status in [
            CallStatus::Calling,
            CallStatus::Active,
            CallStatus::Ended,
            CallStatus::Error,
        ] {
            assert!(!status.can_transition_to(&CallStatus::Calling));
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        assert!(!CallStatus::Ended.can_transition_to(&CallStatus::Active));
        assert!(!CallStatus::Error.can_transition_to(&CallStatus::Active));
        assert!(!CallStatus::Error.can_transition_to(&CallStatus::Ended));
        assert!(CallStatus::Ended.is_terminal());
        assert!(!CallStatus::Active.is_terminal());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&CallStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }
}
