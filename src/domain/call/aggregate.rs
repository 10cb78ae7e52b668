//! Call session aggregate root

use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::error::{DomainError, Result};
use crate::domain::shared::value_objects::{PhoneNumber, SessionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call session aggregate root
///
/// One entry of the client-side call history. The id and the creation
/// timestamp never change; the room and dispatch identifiers are written once,
/// when the dispatch is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSession {
    id: SessionId,
    phone_number: PhoneNumber,
    timestamp: DateTime<Utc>,
    status: CallStatus,
    room_name: Option<String>,
    dispatch_id: Option<String>,
}

impl CallSession {
    /// Create a new session in the `Calling` state
    pub fn new(phone_number: PhoneNumber) -> Self {
        Self {
            id: SessionId::new(),
            phone_number,
            timestamp: Utc::now(),
            status: CallStatus::Calling,
            room_name: None,
            dispatch_id: None,
        }
    }

    /// Record the dispatch result and mark the session active
    pub fn activate(&mut self, room_name: String, dispatch_id: String) -> Result<()> {
        if self.room_name.is_some() || self.dispatch_id.is_some() {
            return Err(DomainError::InvalidStateTransition(format!(
                "Session {} already has a dispatch attached",
                self.id
            )));
        }

        self.transition_to(CallStatus::Active)?;
        self.room_name = Some(room_name);
        self.dispatch_id = Some(dispatch_id);
        Ok(())
    }

    /// Mark the session ended
    pub fn end(&mut self) -> Result<()> {
        self.transition_to(CallStatus::Ended)
    }

    /// Mark the session failed
    pub fn fail(&mut self) -> Result<()> {
        self.transition_to(CallStatus::Error)
    }

    /// Transition to a new status
    pub fn transition_to(&mut self, new_status: CallStatus) -> Result<()> {
        if !self.status.can_transition_to(&new_status) {
            return Err(DomainError::InvalidStateTransition(format!(
                "Cannot transition session {} from {} to {}",
                self.id, self.status, new_status
            )));
        }

        self.status = new_status;
        Ok(())
    }

    // Getters
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn room_name(&self) -> Option<&str> {
        self.room_name.as_deref()
    }

    pub fn dispatch_id(&self) -> Option<&str> {
        self.dispatch_id.as_deref()
    }
}
