//! Response types for the Shift Allocation Engine API.
//!
//! This module defines the success bodies that are not plain model types,
//! along with the error response structures and error handling for the
//! HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::allocation::{CapacityPlan, RankedCandidate, RoleFill};
use crate::error::EngineError;
use crate::models::{Allocation, AuditStep};

/// Response body for the stateless `/plan` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    /// The facility code.
    pub facility_code: String,
    /// The planned shift.
    pub shift_code: String,
    /// Number of available workers.
    pub available_count: usize,
    /// Number of absent workers.
    pub absent_count: usize,
    /// Required positions per role.
    pub capacity: CapacityPlan,
    /// The generated team.
    pub allocations: Vec<Allocation>,
    /// Filled versus planned positions per role.
    pub fill_status: Vec<RoleFill>,
    /// Available workers left without a placement.
    pub unallocated: Vec<String>,
    /// Capacity steps followed by placement steps, numbered continuously.
    pub audit_steps: Vec<AuditStep>,
    /// Time spent planning, in microseconds.
    pub duration_us: u64,
}

/// Response body for the candidates endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CandidatesResponse {
    /// The role the candidates were ranked for.
    pub role_id: String,
    /// Unallocated workers, best first.
    pub candidates: Vec<RankedCandidate>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::RoleNotFound { role_id } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "ROLE_NOT_FOUND",
                    message,
                    format!("The role id '{}' is not in the role catalog", role_id),
                ),
            ),
            EngineError::ShiftNotFound { code } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "SHIFT_NOT_FOUND",
                    message,
                    format!("The shift code '{}' is not configured for this facility", code),
                ),
            ),
            EngineError::InvalidWorker { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_WORKER",
                    message,
                    "The worker data contains invalid information",
                ),
            ),
            EngineError::WorkerNotAvailable { .. } => {
                (StatusCode::CONFLICT, ApiError::new("WORKER_NOT_AVAILABLE", message))
            }
            EngineError::WorkerAlreadyAllocated { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("WORKER_ALREADY_ALLOCATED", message),
            ),
            EngineError::CertificationRequired { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "CERTIFICATION_REQUIRED",
                    message,
                    "The certification policy is enforced for this session",
                ),
            ),
            EngineError::InvalidTransition { .. } => {
                (StatusCode::CONFLICT, ApiError::new("INVALID_TRANSITION", message))
            }
            EngineError::StageMismatch { .. } => {
                (StatusCode::CONFLICT, ApiError::new("STAGE_MISMATCH", message))
            }
            EngineError::NoAllocations => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "NO_ALLOCATIONS",
                    message,
                    "Allocate at least one worker before finalizing",
                ),
            ),
            EngineError::SessionNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("SESSION_NOT_FOUND", message))
            }
        };

        ApiErrorResponse { status, error }
    }
}
