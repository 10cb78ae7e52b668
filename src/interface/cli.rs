//! Command line interface
//!
//! `teleagent` (or `teleagent serve`) runs the call API. `teleagent call`
//! places one call through a running server, the way the web panel would.

use super::client::HttpCallApi;
use crate::application::{ClientSession, TracingNotifier};
use crate::config::ClientConfig;
use crate::domain::call::{CallSession, CallStatus};
use crate::domain::shared::error::{DomainError, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "teleagent")]
#[command(author, version, about = "Launcher for an AI telephone agent", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file
    #[arg(short, long, env = "TELEAGENT_CONFIG", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the call API server (default)
    Serve,

    /// Place a call through a running server
    Call {
        /// Number to call
        phone: String,

        #[arg(long, env = "LIVEKIT_API_KEY", hide_env_values = true)]
        api_key: String,

        #[arg(long, env = "LIVEKIT_API_SECRET", hide_env_values = true)]
        api_secret: String,

        /// Server base URL (overrides client.server_url)
        #[arg(long)]
        server: Option<String>,

        /// Stay until the call is marked ended
        #[arg(long)]
        wait: bool,
    },
}

/// Log in, submit one call and return its session
///
/// With `wait`, returns once the dwell period has ended the session.
pub async fn place_call(
    config: ClientConfig,
    phone: &str,
    api_key: &str,
    api_secret: &str,
    wait: bool,
) -> Result<CallSession> {
    let api = HttpCallApi::from_config(&config)?;
    let mut session = ClientSession::new(Arc::new(api), Arc::new(TracingNotifier), config);

    let result = submit_and_track(&mut session, phone, api_key, api_secret, wait).await;
    session.logout().await?;
    result
}

async fn submit_and_track(
    session: &mut ClientSession,
    phone: &str,
    api_key: &str,
    api_secret: &str,
    wait: bool,
) -> Result<CallSession> {
    let controller = session.login(api_key, api_secret).await?;
    let id = controller.submit(phone).await?;

    loop {
        let call = controller
            .history()
            .await?
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| DomainError::NotFound(format!("Session {} not found", id)))?;

        if !wait || call.status() != CallStatus::Active {
            return Ok(call);
        }

        debug!("Session {} still active", id);
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
