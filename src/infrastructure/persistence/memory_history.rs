//! In-memory implementation of CallHistoryRepository
//!
//! Lives for one client session only; nothing is written to disk.

use crate::domain::call::{CallHistoryRepository, CallSession, CallStatus};
use crate::domain::shared::error::{DomainError, Result};
use crate::domain::shared::value_objects::SessionId;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCallHistory {
    sessions: Arc<RwLock<Vec<CallSession>>>,
}

impl InMemoryCallHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallHistoryRepository for InMemoryCallHistory {
    async fn prepend(&self, session: CallSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;

        if sessions.iter().any(|s| s.id() == session.id()) {
            return Err(DomainError::Internal(format!(
                "Session {} already recorded",
                session.id()
            )));
        }

        debug!("Recording session {} for {}", session.id(), session.phone_number());
        sessions.insert(0, session);
        Ok(())
    }

    async fn update_status(&self, id: &SessionId, status: CallStatus) -> Result<CallSession> {
        let mut sessions = self.sessions.write().await;

        let session = sessions
            .iter_mut()
            .find(|s| s.id() == *id)
            .ok_or_else(|| DomainError::NotFound(format!("Session {}", id)))?;

        session.transition_to(status)?;
        Ok(session.clone())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<CallSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.iter().find(|s| s.id() == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<CallSession>> {
        Ok(self.sessions.read().await.clone())
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn clear(&self) -> Result<()> {
        self.sessions.write().await.clear();
        Ok(())
    }
}
