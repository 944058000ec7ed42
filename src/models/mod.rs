//! Core data models for the Shift Allocation Engine.
//!
//! This module contains the domain models shared by the planner, the scorer
//! and the allocation engine.

mod allocation;
mod role;
mod worker;
mod zone;

pub use allocation::{Allocation, AuditStep};
pub use role::{Role, RoleCatalog, RoleCategory};
pub use worker::{Affinity, ExperienceEntry, MAX_EXPERIENCE_LEVEL, Worker, validate_roster};
pub use zone::{Zone, total_cages, total_packages};
