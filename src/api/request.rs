//! Request types for the Shift Allocation Engine API.
//!
//! Workers and zones are accepted in their model form; the request types
//! here only wrap them with the per-endpoint fields.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::PlanningConfig;
use crate::models::{Worker, Zone};

/// Request body for the stateless `/plan` endpoint.
///
/// Runs roster filtering, capacity planning and team generation in one go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// The shift being planned.
    pub shift_code: String,
    /// The full worker roster.
    pub workers: Vec<Worker>,
    /// Worker ids marked absent.
    #[serde(default)]
    pub absences: BTreeSet<String>,
    /// Zones with their package counts.
    pub zones: Vec<Zone>,
    /// Planning parameters; the facility defaults apply when omitted.
    #[serde(default)]
    pub config: Option<PlanningConfig>,
}

/// Request body for `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// The date being planned.
    pub date: NaiveDate,
    /// The initial shift.
    pub shift_code: String,
    /// The full worker roster.
    pub workers: Vec<Worker>,
    /// Planning parameters; the facility defaults apply when omitted.
    #[serde(default)]
    pub config: Option<PlanningConfig>,
}

/// Request body for `PUT /sessions/:id/shift`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectShiftRequest {
    /// The shift to switch to.
    pub shift_code: String,
}

/// Request body for `PUT /sessions/:id/zones`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonesRequest {
    /// The zones replacing the current ones.
    pub zones: Vec<Zone>,
}

/// Request body for `PUT /sessions/:id/absences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsencesRequest {
    /// Worker ids marked absent.
    pub absences: BTreeSet<String>,
}

/// Request body for `POST /sessions/:id/allocations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    /// The worker to place.
    pub worker_id: String,
    /// The role to place the worker in.
    pub role_id: String,
}

/// Query string for the candidates endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateQuery {
    /// Case-insensitive name filter.
    #[serde(default)]
    pub search: Option<String>,
}
