//! Call API handlers

use super::dto::{CallResponse, HealthResponse, TrunkResponse};
use super::error::ApiError;
use crate::application::{SessionOrchestrator, TrunkService};
use crate::domain::dispatch::CallRequest;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::Method,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SessionOrchestrator>,
    pub trunk_service: Arc<TrunkService>,
}

/// Initiate an outbound call
///
/// Every verb is routed here so that a wrong one gets the same JSON error
/// shape as the other failures.
pub async fn initiate_call(
    State(state): State<AppState>,
    method: Method,
    query: Option<Query<CallRequest>>,
    body: Bytes,
) -> Result<Json<CallResponse>, ApiError> {
    let request = resolve_request(query.map(|Query(q)| q), &body);
    info!("API: {} call request", method);

    let outcome = state.orchestrator.handle(&method, request).await?;

    Ok(Json(CallResponse::from(outcome)))
}

/// The JSON body wins; query parameters are still read for older clients
fn resolve_request(query: Option<CallRequest>, body: &[u8]) -> CallRequest {
    let from_body = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<CallRequest>(body) {
            Ok(request) => Some(request),
            Err(e) => {
                warn!("Ignoring unparsable call request body: {}", e);
                None
            }
        }
    };

    match (from_body, query) {
        (Some(request), _) if !request.is_empty() => request,
        (_, Some(request)) if !request.is_empty() => {
            warn!("Call parameters received in the query string; send them in the request body");
            request
        }
        _ => CallRequest::default(),
    }
}

/// Configure the outbound SIP trunk
pub async fn setup_trunk(State(state): State<AppState>) -> Result<Json<TrunkResponse>, ApiError> {
    info!("API: Setting up SIP trunk");

    let trunk_id = state.trunk_service.setup().await?;

    Ok(Json(TrunkResponse {
        success: true,
        trunk_id,
        message: "SIP trunk configured successfully".to_string(),
    }))
}

/// Health check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Telephone agent API is up".to_string(),
    })
}
