//! Worker model and related types.
//!
//! This module defines the Worker struct, the Affinity enum and the
//! per-role experience records used by the adequacy scorer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Highest experience level a worker can hold for a role.
pub const MAX_EXPERIENCE_LEVEL: u8 = 5;

/// The workload category a worker normally performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affinity {
    /// Regular-sized parcels.
    Conventional,
    /// Bulky/oversized parcels.
    Bulky,
}

/// Recorded experience of a worker in one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    /// The role this experience applies to.
    pub role_id: String,
    /// Experience level from 0 (none) to 5 (expert).
    pub level: u8,
}

/// Represents one staffable person for a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: String,
    /// Display name, used by candidate search.
    #[serde(default)]
    pub name: String,
    /// Whether the worker is currently active on the roster.
    pub active: bool,
    /// Whether the worker is on leave. Informational only.
    #[serde(default)]
    pub on_leave: bool,
    /// The standard shift code the worker is scheduled on (e.g., "T2").
    pub shift_code: String,
    /// The workload category the worker normally performs.
    pub affinity: Affinity,
    /// Measured productivity in packages per hour.
    pub productivity_rate: f64,
    /// General efficiency percentage, 0 to 100.
    pub efficiency: f64,
    /// Role ids the worker is certified/enabled for.
    #[serde(default)]
    pub enabled_roles: Vec<String>,
    /// Experience per role, at most one entry per role id.
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
}

impl Worker {
    /// Returns the general efficiency clamped to `[0, 100]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocation_engine::models::{Affinity, Worker};
    ///
    /// let worker = Worker {
    ///     id: "colab-001".to_string(),
    ///     name: "Ana".to_string(),
    ///     active: true,
    ///     on_leave: false,
    ///     shift_code: "T2".to_string(),
    ///     affinity: Affinity::Conventional,
    ///     productivity_rate: 180.0,
    ///     efficiency: 130.0,
    ///     enabled_roles: vec![],
    ///     experience: vec![],
    /// };
    /// assert_eq!(worker.clamped_efficiency(), 100.0);
    /// ```
    pub fn clamped_efficiency(&self) -> f64 {
        self.efficiency.clamp(0.0, 100.0)
    }

    /// Returns the experience level for a role, or 0 if none is recorded.
    pub fn experience_level(&self, role_id: &str) -> u8 {
        self.experience
            .iter()
            .find(|e| e.role_id == role_id)
            .map(|e| e.level)
            .unwrap_or(0)
    }

    /// Returns true if the worker is enabled for the role.
    pub fn is_certified_for(&self, role_id: &str) -> bool {
        self.enabled_roles.iter().any(|r| r == role_id)
    }

    /// Checks the record's invariants.
    ///
    /// Fails with `InvalidWorker` when the id is blank, the productivity rate
    /// is negative or not finite, an experience level exceeds 5, or a role has
    /// more than one experience entry.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidWorker {
            worker_id: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        if !self.productivity_rate.is_finite() || self.productivity_rate < 0.0 {
            return Err(invalid(format!(
                "productivity_rate must be a nonnegative number, got {}",
                self.productivity_rate
            )));
        }

        for (index, entry) in self.experience.iter().enumerate() {
            if entry.level > MAX_EXPERIENCE_LEVEL {
                return Err(invalid(format!(
                    "experience level {} for role '{}' exceeds {}",
                    entry.level, entry.role_id, MAX_EXPERIENCE_LEVEL
                )));
            }
            if self.experience[..index]
                .iter()
                .any(|earlier| earlier.role_id == entry.role_id)
            {
                return Err(invalid(format!(
                    "duplicate experience entry for role '{}'",
                    entry.role_id
                )));
            }
        }

        Ok(())
    }
}

/// Validates every worker in a roster and checks that ids are unique.
pub fn validate_roster(workers: &[Worker]) -> EngineResult<()> {
    let mut seen = HashSet::new();
    for worker in workers {
        worker.validate()?;
        if !seen.insert(worker.id.as_str()) {
            return Err(EngineError::InvalidWorker {
                worker_id: worker.id.clone(),
                message: "duplicate worker id".to_string(),
            });
        }
    }
    Ok(())
}
