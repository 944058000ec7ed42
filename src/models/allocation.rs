//! Allocation result models.
//!
//! This module contains the [`Allocation`] pair produced by the engine and
//! the [`AuditStep`] records that explain how capacities and placements were
//! decided.

use serde::{Deserialize, Serialize};

/// One filled position: a worker placed in a role.
///
/// # Example
///
/// ```
/// use allocation_engine::models::Allocation;
///
/// let allocation = Allocation::new("colab-001", "func-002");
/// assert_eq!(allocation.worker_id, "colab-001");
/// assert_eq!(allocation.role_id, "func-002");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allocation {
    /// The placed worker.
    pub worker_id: String,
    /// The role the worker fills.
    pub role_id: String,
}

impl Allocation {
    /// Creates a new allocation pair.
    pub fn new(worker_id: impl Into<String>, role_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            role_id: role_id.into(),
        }
    }
}

/// A single step in the audit trace recording a planning decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
