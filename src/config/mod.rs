//! Configuration management
//!
//! Defaults are overridden by an optional config file, then by environment
//! variables of the form `TELEAGENT__SECTION__KEY` (e.g.
//! `TELEAGENT__SERVER__PORT=9000`).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::shared::value_objects::DEFAULT_MIN_PHONE_LENGTH;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub dispatcher: DispatcherConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// External dispatcher invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Program to run (an interpreter or the dispatcher binary itself)
    pub program: String,
    /// Arguments placed before `--phone <n> --env <path>`
    pub args: Vec<String>,
    /// Arguments for the trunk setup run
    pub trunk_args: Vec<String>,
    pub working_dir: Option<String>,
    pub timeout_secs: u64,
}

/// Client-side call tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the call API
    pub server_url: String,
    /// Overall timeout of one call request; longer than the dispatcher timeout
    pub request_timeout_secs: u64,
    /// Seconds a call stays active before it is marked ended
    pub dwell_secs: u64,
    pub min_phone_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec!["scripts/setup_dispatch.py".to_string()],
            trunk_args: vec!["scripts/setup_trunk.py".to_string(), "--twilio".to_string()],
            working_dir: None,
            timeout_secs: 30,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_secs: 35,
            dwell_secs: 60,
            min_phone_length: DEFAULT_MIN_PHONE_LENGTH,
        }
    }
}

impl DispatcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ClientConfig {
    pub fn dwell(&self) -> Duration {
        Duration::from_secs(self.dwell_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix("TELEAGENT")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("dispatcher.args")
                    .with_list_parse_key("dispatcher.trunk_args")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
