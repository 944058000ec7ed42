//! Error types for the Shift Allocation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while planning a shift.

use thiserror::Error;
use uuid::Uuid;

use crate::session::PlanningStage;

/// The main error type for the Shift Allocation Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use allocation_engine::error::EngineError;
///
/// let error = EngineError::RoleNotFound {
///     role_id: "func-099".to_string(),
/// };
/// assert_eq!(error.to_string(), "Role not found: func-099");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Role id is not present in the role catalog.
    #[error("Role not found: {role_id}")]
    RoleNotFound {
        /// The role id that was not found.
        role_id: String,
    },

    /// Shift code is not one of the configured shifts.
    #[error("Shift not found: {code}")]
    ShiftNotFound {
        /// The shift code that was not found.
        code: String,
    },

    /// A worker record was invalid or contained inconsistent data.
    #[error("Invalid worker '{worker_id}': {message}")]
    InvalidWorker {
        /// The ID of the invalid worker.
        worker_id: String,
        /// A description of what made the worker invalid.
        message: String,
    },

    /// The worker is not in the available pool for the selected shift.
    #[error("Worker '{worker_id}' is not available for this shift")]
    WorkerNotAvailable {
        /// The ID of the worker.
        worker_id: String,
    },

    /// The worker already holds a position in the current allocation list.
    #[error("Worker '{worker_id}' is already allocated")]
    WorkerAlreadyAllocated {
        /// The ID of the worker.
        worker_id: String,
    },

    /// The role requires a certification the worker does not hold.
    #[error("Worker '{worker_id}' is not certified for role '{role_id}'")]
    CertificationRequired {
        /// The ID of the worker.
        worker_id: String,
        /// The role requiring certification.
        role_id: String,
    },

    /// A stage transition skipped a step or left the workflow bounds.
    #[error("Invalid stage transition from {from} to {to}")]
    InvalidTransition {
        /// The current stage.
        from: PlanningStage,
        /// The requested stage.
        to: PlanningStage,
    },

    /// An edit was attempted outside the stage that owns it.
    #[error("Cannot {action} while the session is in stage {stage}")]
    StageMismatch {
        /// The edit that was attempted.
        action: String,
        /// The stage the session is in.
        stage: PlanningStage,
    },

    /// Finalization was requested with an empty allocation list.
    #[error("Cannot finalize a plan without allocations")]
    NoAllocations,

    /// No planning session exists with the given id.
    #[error("Planning session not found: {id}")]
    SessionNotFound {
        /// The session id that was not found.
        id: Uuid,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
