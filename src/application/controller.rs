//! Client-side call controller
//!
//! Drives the per-call state machine (Idle -> Calling -> Active/Error, then
//! Active -> Ended), talks to the call endpoint and keeps the call history
//! up to date.
//!
//! The Active -> Ended transition is a local dwell timer: nothing on the
//! server reports that a call finished. Each timer is bound to one session
//! id, so overlapping calls end independently.

use crate::application::notifier::{Notification, UserNotifier};
use crate::domain::call::{CallHistoryRepository, CallSession, CallStatus};
use crate::domain::dispatch::{CallApi, CallRequest, DispatchOutcome, UNKNOWN_TOKEN};
use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::{ApiCredentials, PhoneNumber, SessionId};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// State shown by the call panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Calling,
    Active,
    Ended,
    Error,
}

#[derive(Debug)]
struct Inner {
    state: ControllerState,
    current: Option<SessionId>,
}

pub struct CallController {
    api: Arc<dyn CallApi>,
    history: Arc<dyn CallHistoryRepository>,
    notifier: Arc<dyn UserNotifier>,
    credentials: ApiCredentials,
    dwell: Duration,
    min_phone_length: usize,
    inner: Arc<RwLock<Inner>>,
    timers: Mutex<Vec<JoinHandle<()>>>,
}

impl CallController {
    pub fn new(
        api: Arc<dyn CallApi>,
        history: Arc<dyn CallHistoryRepository>,
        notifier: Arc<dyn UserNotifier>,
        credentials: ApiCredentials,
        dwell: Duration,
        min_phone_length: usize,
    ) -> Self {
        Self {
            api,
            history,
            notifier,
            credentials,
            dwell,
            min_phone_length,
            inner: Arc::new(RwLock::new(Inner {
                state: ControllerState::Idle,
                current: None,
            })),
            timers: Mutex::new(Vec::new()),
        }
    }

    /// Submit a call to `phone_number`
    ///
    /// A number shorter than the configured minimum is rejected here and no
    /// request is sent. On success the new session id is returned.
    pub async fn submit(&self, phone_number: &str) -> Result<SessionId> {
        let phone = match PhoneNumber::parse(phone_number, self.min_phone_length) {
            Ok(phone) => phone,
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Please enter a valid phone number"));
                return Err(e);
            }
        };

        self.set_state(ControllerState::Calling, None).await;

        let request = CallRequest::new(
            phone.as_str(),
            self.credentials.api_key(),
            self.credentials.api_secret(),
        );

        let result = match self.api.initiate(request).await {
            Ok(outcome) => self.record(phone, outcome).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(session) => {
                let id = session.id();
                self.set_state(ControllerState::Active, Some(id)).await;
                self.schedule_end(id);

                info!("Session {} active", id);
                self.notifier.notify(Notification::info(format!(
                    "Calling {} (room {})",
                    session.phone_number(),
                    session.room_name().unwrap_or(UNKNOWN_TOKEN)
                )));
                Ok(id)
            }
            Err(e) => {
                self.set_state(ControllerState::Error, None).await;
                self.notifier.notify(Notification::error(format!("Error: {}", e)));
                Err(e)
            }
        }
    }

    /// Add the session for a dispatched call to the history
    async fn record(&self, phone: PhoneNumber, outcome: DispatchOutcome) -> Result<CallSession> {
        let mut session = CallSession::new(phone);
        session.activate(outcome.room_name, outcome.dispatch_id)?;
        self.history.prepend(session.clone()).await?;
        Ok(session)
    }

    /// Mark `id` ended once the dwell period elapses
    fn schedule_end(&self, id: SessionId) {
        let history = self.history.clone();
        let inner = self.inner.clone();
        let dwell = self.dwell;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(dwell).await;

            match history.update_status(&id, CallStatus::Ended).await {
                Ok(_) => debug!("Session {} ended after {:?}", id, dwell),
                Err(e) => warn!("Could not end session {}: {}", id, e),
            }

            let mut inner = inner.write().await;
            if inner.current == Some(id) && inner.state == ControllerState::Active {
                inner.state = ControllerState::Ended;
            }
        });

        if let Ok(mut timers) = self.timers.lock() {
            timers.retain(|timer| !timer.is_finished());
            timers.push(handle);
        }
    }

    async fn set_state(&self, state: ControllerState, current: Option<SessionId>) {
        let mut inner = self.inner.write().await;
        inner.state = state;
        inner.current = current;
    }

    pub async fn state(&self) -> ControllerState {
        self.inner.read().await.state
    }

    /// Session started by the most recent successful submission
    pub async fn current_session(&self) -> Option<SessionId> {
        self.inner.read().await.current
    }

    /// Call history, most recent first
    pub async fn history(&self) -> Result<Vec<CallSession>> {
        self.history.list().await
    }

    /// Tear down at the end of the client session: stop pending timers and
    /// forget the history
    pub async fn shutdown(&self) -> Result<()> {
        if let Ok(mut timers) = self.timers.lock() {
            for timer in timers.drain(..) {
                timer.abort();
            }
        }

        self.history.clear().await?;
        self.set_state(ControllerState::Idle, None).await;
        Ok(())
    }
}

impl Drop for CallController {
    fn drop(&mut self) {
        if let Ok(mut timers) = self.timers.lock() {
            for timer in timers.drain(..) {
                timer.abort();
            }
        }
    }
}
