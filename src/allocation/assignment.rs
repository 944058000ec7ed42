//! Manual allocation list.
//!
//! An [`AllocationList`] holds the current placements for a shift. Planners
//! adjust it by hand after (or instead of) generating the ideal team; the
//! list itself performs no validation, which is the session's job.

use serde::{Deserialize, Serialize};

use crate::models::{Allocation, Worker};

use super::capacity::CapacityPlan;

/// How far one planned role is filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFill {
    /// The role id.
    pub role_id: String,
    /// Number of workers currently placed in the role.
    pub filled: u32,
    /// Planned positions for the role.
    pub capacity: u32,
    /// True once a non-zero capacity is reached.
    pub is_full: bool,
}

/// The ordered list of current placements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationList {
    allocations: Vec<Allocation>,
}

impl AllocationList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a placement.
    ///
    /// No check is made here for duplicates or capacity.
    pub fn allocate(&mut self, worker_id: impl Into<String>, role_id: impl Into<String>) {
        self.allocations.push(Allocation::new(worker_id, role_id));
    }

    /// Removes every placement of the worker. Unknown workers are a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocation_engine::allocation::AllocationList;
    ///
    /// let mut list = AllocationList::new();
    /// list.allocate("colab-001", "func-002");
    /// list.deallocate("colab-001");
    /// list.deallocate("colab-001");
    /// assert!(list.is_empty());
    /// ```
    pub fn deallocate(&mut self, worker_id: &str) {
        self.allocations.retain(|a| a.worker_id != worker_id);
    }

    /// Returns true if the worker holds any placement.
    pub fn is_allocated(&self, worker_id: &str) -> bool {
        self.allocations.iter().any(|a| a.worker_id == worker_id)
    }

    /// Number of workers placed in a role.
    pub fn count_for_role(&self, role_id: &str) -> u32 {
        self.allocations.iter().filter(|a| a.role_id == role_id).count() as u32
    }

    /// Workers from `available` with no placement, in input order.
    pub fn unallocated_pool<'a>(&self, available: &'a [Worker]) -> Vec<&'a Worker> {
        available.iter().filter(|w| !self.is_allocated(&w.id)).collect()
    }

    /// Filled versus planned positions for every role in the plan.
    pub fn fill_status(&self, capacity: &CapacityPlan) -> Vec<RoleFill> {
        capacity
            .roles
            .iter()
            .map(|role| {
                let filled = self.count_for_role(&role.role_id);
                RoleFill {
                    role_id: role.role_id.clone(),
                    filled,
                    capacity: role.positions,
                    is_full: role.positions > 0 && filled >= role.positions,
                }
            })
            .collect()
    }

    /// Replaces all placements.
    pub fn replace(&mut self, allocations: Vec<Allocation>) {
        self.allocations = allocations;
    }

    /// Removes all placements.
    pub fn clear(&mut self) {
        self.allocations.clear();
    }

    /// Returns the placements in insertion order.
    pub fn as_slice(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Returns true if nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}

impl From<Vec<Allocation>> for AllocationList {
    fn from(allocations: Vec<Allocation>) -> Self {
        Self { allocations }
    }
}
