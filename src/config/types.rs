//! Configuration types for shift planning.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files or supplied per session.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::RoleCatalog;

/// Metadata about the facility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityMetadata {
    /// The facility code (e.g., "SRS7").
    pub code: String,
    /// The human-readable name of the facility.
    pub name: String,
}

/// A shift the facility runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// Unique identifier for the shift.
    pub id: String,
    /// The code workers are rostered on (e.g., "T1").
    pub code: String,
    /// The human-readable name of the shift.
    pub name: String,
    /// When the shift starts.
    pub start_time: NaiveTime,
    /// When the shift ends. May be earlier than `start_time` for overnight shifts.
    pub end_time: NaiveTime,
}

/// Shifts configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsConfig {
    /// The shifts in display order.
    pub shifts: Vec<ShiftDefinition>,
}

/// Role catalog configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    /// The role catalog in processing order.
    pub roles: RoleCatalog,
}

/// Whether role certification requirements restrict placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationPolicy {
    /// Certification is displayed but never checked.
    #[default]
    Advisory,
    /// Workers must be enabled for roles that require certification.
    Enforced,
}

/// Blend coefficients for the adequacy score, expected to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of measured productivity, 0 to 100.
    pub performance: f64,
    /// Weight of recorded experience, 0 to 100.
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            performance: 70.0,
            experience: 30.0,
        }
    }
}

impl ScoringWeights {
    /// Builds weights from a performance weight, giving experience the remainder.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocation_engine::config::ScoringWeights;
    ///
    /// let weights = ScoringWeights::from_performance(85.0);
    /// assert_eq!(weights.experience, 15.0);
    ///
    /// let clamped = ScoringWeights::from_performance(140.0);
    /// assert_eq!(clamped.performance, 100.0);
    /// assert_eq!(clamped.experience, 0.0);
    /// ```
    pub fn from_performance(performance: f64) -> Self {
        let performance = performance.clamp(0.0, 100.0);
        Self {
            performance,
            experience: 100.0 - performance,
        }
    }

    /// Builds weights from an experience weight, giving performance the remainder.
    pub fn from_experience(experience: f64) -> Self {
        let experience = experience.clamp(0.0, 100.0);
        Self {
            performance: 100.0 - experience,
            experience,
        }
    }

    /// Returns true if the weights sum to 100.
    pub fn is_balanced(&self) -> bool {
        (self.performance + self.experience - 100.0).abs() < 1e-9
    }
}

/// Operational parameters for one planning run.
///
/// Values are used as given; callers are responsible for sanitizing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Zones above this many packages need two conventional sorters.
    pub sorting_package_threshold: u64,
    /// Share of total volume classified as bulky, in percent.
    pub bulky_volume_percentage: Decimal,
    /// Target packages per hour for one bulky sorter.
    pub bulky_target_rate: Decimal,
    /// Fixed number of induction positions.
    pub induction_positions: u32,
    /// Fixed number of positions for each labeling role.
    pub labeling_positions: u32,
    /// Adequacy score blend coefficients.
    pub weights: ScoringWeights,
    /// Whether certification requirements are enforced.
    pub certification_policy: CertificationPolicy,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            sorting_package_threshold: 1500,
            bulky_volume_percentage: Decimal::new(10, 0),
            bulky_target_rate: Decimal::new(150, 0),
            induction_positions: 5,
            labeling_positions: 2,
            weights: ScoringWeights::default(),
            certification_policy: CertificationPolicy::Advisory,
        }
    }
}

/// The complete facility configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct FacilityConfig {
    metadata: FacilityMetadata,
    catalog: RoleCatalog,
    shifts: Vec<ShiftDefinition>,
    planning: PlanningConfig,
}

impl FacilityConfig {
    /// Creates a new FacilityConfig from its component parts.
    pub fn new(
        metadata: FacilityMetadata,
        catalog: RoleCatalog,
        shifts: Vec<ShiftDefinition>,
        planning: PlanningConfig,
    ) -> Self {
        Self {
            metadata,
            catalog,
            shifts,
            planning,
        }
    }

    /// Returns the facility metadata.
    pub fn facility(&self) -> &FacilityMetadata {
        &self.metadata
    }

    /// Returns the role catalog.
    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Returns the configured shifts.
    pub fn shifts(&self) -> &[ShiftDefinition] {
        &self.shifts
    }

    /// Returns the default planning parameters.
    pub fn planning(&self) -> &PlanningConfig {
        &self.planning
    }

    /// Gets a shift by its roster code.
    ///
    /// Returns `ShiftNotFound` if no shift uses the code.
    pub fn shift(&self, code: &str) -> EngineResult<&ShiftDefinition> {
        self.shifts
            .iter()
            .find(|s| s.code == code)
            .ok_or_else(|| EngineError::ShiftNotFound {
                code: code.to_string(),
            })
    }
}
