//! HTTP request handlers for the Shift Allocation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::allocation::{AllocationList, filter_shift_roster, generate_allocation, plan_capacity};
use crate::config::{ConfigLoader, PlanningConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{Allocation, validate_roster};
use crate::session::{PlanningSession, SessionView};

use super::request::{
    AbsencesRequest, AssignRequest, CandidateQuery, CreateSessionRequest, PlanRequest,
    SelectShiftRequest, ZonesRequest,
};
use super::response::{ApiError, ApiErrorResponse, CandidatesResponse, PlanResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/plan", post(plan_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/:id", get(get_session_handler))
        .route("/sessions/:id/shift", put(select_shift_handler))
        .route("/sessions/:id/config", put(update_config_handler))
        .route("/sessions/:id/zones", put(set_zones_handler))
        .route("/sessions/:id/absences", put(set_absences_handler))
        .route("/sessions/:id/advance", post(advance_handler))
        .route("/sessions/:id/back", post(back_handler))
        .route("/sessions/:id/generate", post(generate_handler))
        .route("/sessions/:id/finalize", post(finalize_handler))
        .route("/sessions/:id/allocations", post(assign_handler))
        .route(
            "/sessions/:id/allocations/:worker_id",
            delete(unassign_handler),
        )
        .route("/sessions/:id/candidates/:role_id", get(candidates_handler))
        .with_state(state)
}

/// Handler for POST /plan.
///
/// Plans a shift in one call without opening a session.
async fn plan_handler(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> ApiResult<Json<PlanResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing plan request");

    let request = parse_body(payload, correlation_id)?;

    let start_time = Instant::now();
    match perform_planning(&request, state.config(), start_time) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                shift_code = %response.shift_code,
                available = response.available_count,
                allocated = response.allocations.len(),
                duration_us = response.duration_us,
                "Planning completed successfully"
            );
            Ok(Json(response))
        }
        Err(err) => Err(log_failure(correlation_id, "plan", err)),
    }
}

/// Runs roster filtering, capacity planning and generation for one request.
fn perform_planning(
    request: &PlanRequest,
    config: &ConfigLoader,
    start_time: Instant,
) -> EngineResult<PlanResponse> {
    config.get_shift(&request.shift_code)?;
    validate_roster(&request.workers)?;

    let planning = request
        .config
        .clone()
        .unwrap_or_else(|| config.planning_defaults().clone());
    let catalog = config.catalog();

    let roster = filter_shift_roster(&request.workers, &request.shift_code, &request.absences);
    let available = roster.available_workers();
    let capacity = plan_capacity(&request.zones, catalog, &planning);
    let generation = generate_allocation(&available, &capacity, catalog, &planning)?;

    let mut audit_steps = capacity.audit_steps.clone();
    let offset = audit_steps.len() as u32;
    audit_steps.extend(generation.audit_steps.into_iter().map(|mut step| {
        step.step_number += offset;
        step
    }));

    let allocations = AllocationList::from(generation.allocations);
    let unallocated = allocations
        .unallocated_pool(&available)
        .into_iter()
        .map(|w| w.id.clone())
        .collect();

    Ok(PlanResponse {
        facility_code: config.facility().code.clone(),
        shift_code: request.shift_code.clone(),
        available_count: roster.available.len(),
        absent_count: roster.absent.len(),
        fill_status: allocations.fill_status(&capacity),
        allocations: allocations.as_slice().to_vec(),
        unallocated,
        audit_steps,
        capacity,
        duration_us: start_time.elapsed().as_micros() as u64,
    })
}

/// Handler for POST /sessions.
async fn create_session_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;

    let session = PlanningSession::new(
        state.config().shared_config(),
        request.date,
        request.shift_code,
        request.workers,
        request.config,
    )
    .map_err(|err| log_failure(correlation_id, "create session", err))?;

    let view = session.view();
    let session_id = state.insert_session(session).await;
    let open_sessions = state.session_count().await;
    info!(
        correlation_id = %correlation_id,
        session_id = %session_id,
        open_sessions,
        "Session created"
    );
    Ok((StatusCode::CREATED, Json(view)))
}

/// Handler for GET /sessions/:id.
async fn get_session_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let correlation_id = Uuid::new_v4();
    let view = state
        .read_session(id, |session| Ok(session.view()))
        .await
        .map_err(|err| log_failure(correlation_id, "get session", err))?;
    Ok(Json(view))
}

/// Handler for PUT /sessions/:id/shift.
async fn select_shift_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SelectShiftRequest>, JsonRejection>,
) -> ApiResult<Json<SessionView>> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    apply(&state, id, correlation_id, "select shift", |session| {
        session.select_shift(&request.shift_code)
    })
    .await
}

/// Handler for PUT /sessions/:id/config.
async fn update_config_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<PlanningConfig>, JsonRejection>,
) -> ApiResult<Json<SessionView>> {
    let correlation_id = Uuid::new_v4();
    let config = parse_body(payload, correlation_id)?;
    apply(&state, id, correlation_id, "update config", |session| {
        session.update_config(config)
    })
    .await
}

/// Handler for PUT /sessions/:id/zones.
async fn set_zones_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ZonesRequest>, JsonRejection>,
) -> ApiResult<Json<SessionView>> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    apply(&state, id, correlation_id, "set zones", |session| {
        session.set_zones(request.zones)
    })
    .await
}

/// Handler for PUT /sessions/:id/absences.
async fn set_absences_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<AbsencesRequest>, JsonRejection>,
) -> ApiResult<Json<SessionView>> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    apply(&state, id, correlation_id, "set absences", |session| {
        session.set_absences(request.absences)
    })
    .await
}

/// Handler for POST /sessions/:id/advance.
async fn advance_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let correlation_id = Uuid::new_v4();
    apply(&state, id, correlation_id, "advance", |session| {
        session.advance().map(|_| ())
    })
    .await
}

/// Handler for POST /sessions/:id/back.
async fn back_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let correlation_id = Uuid::new_v4();
    apply(&state, id, correlation_id, "go back", |session| {
        session.go_back().map(|_| ())
    })
    .await
}

/// Handler for POST /sessions/:id/generate.
async fn generate_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let correlation_id = Uuid::new_v4();
    apply(&state, id, correlation_id, "generate", |session| {
        session.generate_ideal_team().map(|_| ())
    })
    .await
}

/// Handler for POST /sessions/:id/finalize.
async fn finalize_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let correlation_id = Uuid::new_v4();
    apply(&state, id, correlation_id, "finalize", |session| {
        session.finalize().map(|_| ())
    })
    .await
}

/// Handler for POST /sessions/:id/allocations.
async fn assign_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<AssignRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Allocation>)> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;

    let allocation = state
        .update_session(id, |session| {
            session.assign(&request.worker_id, &request.role_id)
        })
        .await
        .map_err(|err| log_failure(correlation_id, "assign", err))?;

    info!(
        correlation_id = %correlation_id,
        session_id = %id,
        worker_id = %allocation.worker_id,
        role_id = %allocation.role_id,
        "Worker assigned"
    );
    Ok((StatusCode::CREATED, Json(allocation)))
}

/// Handler for DELETE /sessions/:id/allocations/:worker_id.
async fn unassign_handler(
    State(state): State<AppState>,
    Path((id, worker_id)): Path<(Uuid, String)>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    state
        .update_session(id, |session| session.unassign(&worker_id))
        .await
        .map_err(|err| log_failure(correlation_id, "unassign", err))?;

    info!(
        correlation_id = %correlation_id,
        session_id = %id,
        worker_id = %worker_id,
        "Worker unassigned"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /sessions/:id/candidates/:role_id.
async fn candidates_handler(
    State(state): State<AppState>,
    Path((id, role_id)): Path<(Uuid, String)>,
    Query(query): Query<CandidateQuery>,
) -> ApiResult<Json<CandidatesResponse>> {
    let correlation_id = Uuid::new_v4();
    let candidates = state
        .read_session(id, |session| {
            session.candidates(&role_id, query.search.as_deref())
        })
        .await
        .map_err(|err| log_failure(correlation_id, "rank candidates", err))?;

    Ok(Json(CandidatesResponse {
        role_id,
        candidates,
    }))
}

/// Applies a mutation to a session and returns the updated view.
async fn apply(
    state: &AppState,
    id: Uuid,
    correlation_id: Uuid,
    action: &str,
    f: impl FnOnce(&mut PlanningSession) -> EngineResult<()>,
) -> ApiResult<Json<SessionView>> {
    let view = state
        .update_session(id, |session| {
            f(session)?;
            Ok(session.view())
        })
        .await
        .map_err(|err| log_failure(correlation_id, action, err))?;

    info!(
        correlation_id = %correlation_id,
        session_id = %id,
        action,
        stage = %view.stage,
        allocations = view.allocations.len(),
        "Session updated"
    );
    Ok(Json(view))
}

/// Unwraps a JSON body, turning rejections into 400 responses.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

fn log_failure(correlation_id: Uuid, action: &str, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        action,
        error = %err,
        "Request failed"
    );
    err.into()
}
