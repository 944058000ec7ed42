//! Allocation engine.
//!
//! This module contains the pure planning steps for one shift:
//!
//! 1. [`filter_shift_roster`] - the available and absent workers
//! 2. [`plan_capacity`] - required positions per role from the workload
//! 3. [`adequacy_score`] - the 0-100 fit of a worker for a role
//! 4. [`generate_allocation`] - greedy "ideal team" generation
//!
//! Manual adjustments go through [`AllocationList`], and
//! [`rank_candidates`] orders the unallocated pool for a manual pick.

mod assignment;
mod capacity;
mod generator;
mod ranking;
mod roster;
mod scoring;

pub use assignment::{AllocationList, RoleFill};
pub use capacity::{
    CapacityPlan, RoleCapacity, bulky_packages, bulky_sorting_positions,
    conventional_sorting_positions, plan_capacity, zone_sorting_positions,
};
pub use generator::{GenerationResult, generate_allocation, is_eligible, processing_order};
pub use ranking::{RankedCandidate, rank_candidates};
pub use roster::{ShiftRoster, filter_shift_roster};
pub use scoring::{
    AFFINITY_MISMATCH_PENALTY, BULKY_AFFINITY_BONUS, CONVENTIONAL_AFFINITY_BONUS,
    EXPERIENCE_SCALE, SORTING_REFERENCE_RATE, ScoreBreakdown, adequacy_score,
    affinity_adjustment, role_efficiency, score_breakdown, score_for_role_id,
};
