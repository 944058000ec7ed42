//! Planning sessions.
//!
//! This module provides the [`PlanningSession`] that carries one shift's
//! planning state through the workflow stages, and the [`PlanningStage`]
//! enum describing those stages.

mod planning;
mod stage;

pub use planning::{PlanningSession, SessionView};
pub use stage::PlanningStage;
