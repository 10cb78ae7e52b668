//! Client login session
//!
//! The login step only checks that an API key and secret were typed in; the
//! dispatcher is the one that finds out whether they are valid. A call
//! controller exists while logged in and its history dies with it.

use crate::application::controller::CallController;
use crate::application::notifier::{Notification, UserNotifier};
use crate::config::ClientConfig;
use crate::domain::dispatch::CallApi;
use crate::domain::shared::error::{DomainError, Result};
use crate::domain::shared::value_objects::ApiCredentials;
use crate::infrastructure::persistence::InMemoryCallHistory;
use std::sync::Arc;
use tracing::info;

pub struct ClientSession {
    api: Arc<dyn CallApi>,
    notifier: Arc<dyn UserNotifier>,
    config: ClientConfig,
    controller: Option<CallController>,
}

impl ClientSession {
    pub fn new(api: Arc<dyn CallApi>, notifier: Arc<dyn UserNotifier>, config: ClientConfig) -> Self {
        Self {
            api,
            notifier,
            config,
            controller: None,
        }
    }

    /// Log in with the given credentials, replacing any previous session
    pub async fn login(&mut self, api_key: &str, api_secret: &str) -> Result<&CallController> {
        let credentials = match ApiCredentials::new(api_key, api_secret) {
            Ok(credentials) => credentials,
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Please enter your API key and API secret"));
                return Err(e);
            }
        };

        self.logout().await?;

        let controller = CallController::new(
            self.api.clone(),
            Arc::new(InMemoryCallHistory::new()),
            self.notifier.clone(),
            credentials,
            self.config.dwell(),
            self.config.min_phone_length,
        );
        info!("Logged in");

        Ok(self.controller.insert(controller))
    }

    /// End the client session, discarding the call history
    pub async fn logout(&mut self) -> Result<()> {
        if let Some(controller) = self.controller.take() {
            controller.shutdown().await?;
            info!("Logged out");
        }
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.controller.is_some()
    }

    /// Controller for the current session
    pub fn controller(&self) -> Result<&CallController> {
        self.controller
            .as_ref()
            .ok_or_else(|| DomainError::Unauthorized("Not logged in".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::notifier::ChannelNotifier;
    use crate::domain::dispatch::adapter::MockCallApi;
    use crate::domain::dispatch::DispatchOutcome;

    fn session() -> (ClientSession, tokio::sync::mpsc::UnboundedReceiver<Notification>) {
        let mut api = MockCallApi::new();
        api.expect_initiate().returning(|_| {
            Ok(DispatchOutcome {
                room_name: "demo-42".to_string(),
                dispatch_id: "disp-7".to_string(),
            })
        });
        let (notifier, rx) = ChannelNotifier::new();
        (
            ClientSession::new(Arc::new(api), Arc::new(notifier), ClientConfig::default()),
            rx,
        )
    }

    #[tokio::test]
    async fn test_login_requires_both_credentials() {
        let (mut session, mut rx) = session();

        assert!(matches!(
            session.login("key", "").await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(!session.is_logged_in());
        assert!(rx.try_recv().is_ok());

        assert!(session.login("key", "secret").await.is_ok());
        assert!(session.is_logged_in());
    }

    /// Log sink shared with a test subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_login_does_not_log_credentials() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (mut session, _rx) = session();
        session.login("APIkeyVisible", "secretVisible").await.unwrap();
        session.controller().unwrap().submit("0612345678").await.unwrap();
        session.logout().await.unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Logged in"));
        assert!(!output.contains("APIkeyVisible"));
        assert!(!output.contains("secretVisible"));
    }

    #[tokio::test]
    async fn test_controller_requires_login() {
        let (session, _rx) = session();
        assert!(matches!(
            session.controller(),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_logout_forgets_history() {
        let (mut session, _rx) = session();
        session.login("key", "secret").await.unwrap();

        session
            .controller()
            .unwrap()
            .submit("+33612345678")
            .await
            .unwrap();
        assert_eq!(session.controller().unwrap().history().await.unwrap().len(), 1);

        session.logout().await.unwrap();
        assert!(!session.is_logged_in());

        session.login("key", "secret").await.unwrap();
        assert!(session.controller().unwrap().history().await.unwrap().is_empty());
    }
}
