//! HTTP API module for the Shift Allocation Engine.
//!
//! This module provides the REST API endpoints for one-shot shift planning
//! and for the stage-by-stage planning session workflow.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AbsencesRequest, AssignRequest, CandidateQuery, CreateSessionRequest, PlanRequest,
    SelectShiftRequest, ZonesRequest,
};
pub use response::{ApiError, ApiErrorResponse, CandidatesResponse, PlanResponse};
pub use state::AppState;
