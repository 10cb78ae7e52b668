//! Session orchestrator
//!
//! Server-side use case behind `/api/call`: validate the request, stage the
//! credentials for one dispatcher run, invoke the dispatcher under a timeout,
//! parse its output and always remove the staged credentials.

use crate::domain::dispatch::{
    parse_dispatch_output, CallApi, CallRequest, DispatchOutcome, DispatcherAdapter,
};
use crate::domain::shared::error::{DomainError, Result};
use crate::infrastructure::credentials::TransientCredentialFile;
use async_trait::async_trait;
use axum::http::Method;
use metrics::{counter, histogram};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

pub struct SessionOrchestrator {
    dispatcher: Arc<dyn DispatcherAdapter>,
    timeout: Duration,
    credentials_dir: PathBuf,
}

impl SessionOrchestrator {
    pub fn new(dispatcher: Arc<dyn DispatcherAdapter>, timeout: Duration) -> Self {
        Self {
            dispatcher,
            timeout,
            credentials_dir: std::env::temp_dir(),
        }
    }

    /// Directory where per-request credential files are staged
    pub fn with_credentials_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.credentials_dir = dir.into();
        self
    }

    /// Handle a request received with `method`
    ///
    /// Only `POST` initiates a call; anything else is rejected before the
    /// payload is looked at.
    pub async fn handle(&self, method: &Method, request: CallRequest) -> Result<DispatchOutcome> {
        if method != Method::POST {
            warn!("Rejected {} on call endpoint", method);
            return Err(DomainError::MethodNotAllowed(method.to_string()));
        }

        self.initiate(request).await
    }

    /// Initiate one call. No retries: one dispatcher run per call.
    pub async fn initiate(&self, request: CallRequest) -> Result<DispatchOutcome> {
        let request = request.validate()?;
        counter!("teleagent_calls_total").increment(1);

        let credentials =
            TransientCredentialFile::create_in(&self.credentials_dir, &request.credentials)?;

        let started = Instant::now();
        let result = self.invoke(&request.phone_number, credentials.path()).await;
        histogram!("teleagent_dispatch_duration_seconds").record(started.elapsed().as_secs_f64());

        if let Err(e) = credentials.release() {
            counter!("teleagent_credential_cleanup_failures").increment(1);
            error!("{}", e);
        }

        match &result {
            Ok(outcome) => info!(
                "Call to {} dispatched: room={}, dispatch={}",
                request.phone_number, outcome.room_name, outcome.dispatch_id
            ),
            Err(e) => {
                counter!("teleagent_calls_failed").increment(1);
                error!("Call to {} failed: {}", request.phone_number, e);
            }
        }

        result
    }

    async fn invoke(&self, phone_number: &str, credentials: &Path) -> Result<DispatchOutcome> {
        match tokio::time::timeout(self.timeout, self.dispatcher.dispatch(phone_number, credentials)).await {
            Ok(Ok(output)) => Ok(parse_dispatch_output(&output)),
            Ok(Err(failure)) => Err(DomainError::Adapter {
                message: "Error initiating call".to_string(),
                details: failure.details(),
            }),
            Err(_) => Err(DomainError::Timeout {
                details: format!(
                    "Dispatcher did not finish within {} seconds",
                    self.timeout.as_secs_f64()
                ),
            }),
        }
    }
}

/// In-process [`CallApi`] that goes straight to the orchestrator
pub struct LocalCallApi {
    orchestrator: Arc<SessionOrchestrator>,
}

impl LocalCallApi {
    pub fn new(orchestrator: Arc<SessionOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl CallApi for LocalCallApi {
    async fn initiate(&self, request: CallRequest) -> Result<DispatchOutcome> {
        self.orchestrator.handle(&Method::POST, request).await
    }
}
