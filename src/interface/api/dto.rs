//! API DTOs

use crate::domain::dispatch::DispatchOutcome;
use serde::{Deserialize, Serialize};

/// Successful call initiation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResponse {
    pub success: bool,
    pub room_name: String,
    pub dispatch_id: String,
    pub message: String,
}

impl From<DispatchOutcome> for CallResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        CallResponse {
            success: true,
            room_name: outcome.room_name,
            dispatch_id: outcome.dispatch_id,
            message: "Call initiated successfully".to_string(),
        }
    }
}

/// Successful trunk setup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrunkResponse {
    pub success: bool,
    pub trunk_id: Option<String>,
    pub message: String,
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
