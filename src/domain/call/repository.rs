//! Call history repository interface

use crate::domain::call::aggregate::CallSession;
use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::SessionId;
use async_trait::async_trait;

/// Repository interface for the client-side call history
///
/// Sessions are kept most-recent-first. Only two mutations exist: prepend on
/// a successful submission and a status update when a dwell timer fires.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallHistoryRepository: Send + Sync {
    /// Insert a session at the head of the history
    async fn prepend(&self, session: CallSession) -> Result<()>;

    /// Update the status of a session by id
    async fn update_status(&self, id: &SessionId, status: CallStatus) -> Result<CallSession>;

    /// Find a session by its ID
    async fn get(&self, id: &SessionId) -> Result<Option<CallSession>>;

    /// All sessions, most recent first
    async fn list(&self) -> Result<Vec<CallSession>>;

    /// Number of sessions
    async fn len(&self) -> usize;

    /// Drop every session (client session ended)
    async fn clear(&self) -> Result<()>;
}
