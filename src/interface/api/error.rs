//! Conversion of domain errors into HTTP responses

use super::dto::ErrorBody;
use crate::domain::shared::error::DomainError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Error returned by API handlers
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::InvalidStateTransition(_) => StatusCode::CONFLICT,
            DomainError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            DomainError::Adapter { .. }
            | DomainError::ResourceCleanup(_)
            | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let error = match &self.0 {
            DomainError::Adapter { message, .. } => message.clone(),
            DomainError::Timeout { .. } => "Dispatcher timed out".to_string(),
            other => other.to_string(),
        };

        ErrorBody {
            success: false,
            error,
            details: self.0.details().map(str::to_string),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
