//! Planning workflow stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A step of the planning workflow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningStage {
    /// Operational parameters are being set.
    ParametersSet,
    /// Zones and their package counts are being entered.
    ZonesPlanned,
    /// Absences for the shift are being confirmed.
    AttendanceConfirmed,
    /// Workers are being placed in roles.
    TeamAllocated,
    /// The plan is closed.
    Finalized,
}

impl PlanningStage {
    /// All stages in workflow order.
    pub const ALL: [PlanningStage; 5] = [
        Self::ParametersSet,
        Self::ZonesPlanned,
        Self::AttendanceConfirmed,
        Self::TeamAllocated,
        Self::Finalized,
    ];

    /// The stage after this one, if any.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The stage before this one, if any.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Returns true if `to` is exactly one step away.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocation_engine::session::PlanningStage;
    ///
    /// assert!(PlanningStage::ZonesPlanned.is_adjacent(PlanningStage::ParametersSet));
    /// assert!(!PlanningStage::ParametersSet.is_adjacent(PlanningStage::AttendanceConfirmed));
    /// assert!(!PlanningStage::Finalized.is_adjacent(PlanningStage::Finalized));
    /// ```
    pub fn is_adjacent(self, to: Self) -> bool {
        self.index().abs_diff(to.index()) == 1
    }

    /// The snake_case name of the stage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParametersSet => "parameters_set",
            Self::ZonesPlanned => "zones_planned",
            Self::AttendanceConfirmed => "attendance_confirmed",
            Self::TeamAllocated => "team_allocated",
            Self::Finalized => "finalized",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PlanningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
