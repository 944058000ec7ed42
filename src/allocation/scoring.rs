//! Adequacy scoring functionality.
//!
//! This module computes the 0–100 fit score used to rank candidates for a
//! role. The score blends measured productivity with recorded experience and
//! then applies an operation-affinity adjustment.

use serde::{Deserialize, Serialize};

use crate::config::{PlanningConfig, ScoringWeights};
use crate::error::EngineResult;
use crate::models::{Affinity, Role, RoleCatalog, Worker};

/// Multiplier converting an experience level (0–5) to the 0–100 scale.
pub const EXPERIENCE_SCALE: f64 = 20.0;

/// Productivity (packages/hour) that counts as 100% efficiency on sorting roles.
pub const SORTING_REFERENCE_RATE: f64 = 200.0;

/// Bonus for a bulky-affinity worker on a bulky role.
pub const BULKY_AFFINITY_BONUS: f64 = 30.0;

/// Bonus for a conventional-affinity worker on a non-bulky role.
pub const CONVENTIONAL_AFFINITY_BONUS: f64 = 5.0;

/// Penalty for a conventional-affinity worker on a bulky role.
pub const AFFINITY_MISMATCH_PENALTY: f64 = 20.0;

/// The components of one adequacy score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Efficiency used for the role, 0 to 100.
    pub efficiency: f64,
    /// Experience for the role on the 0–100 scale.
    pub experience: f64,
    /// Weighted blend of efficiency and experience.
    pub base: f64,
    /// Additive operation-affinity adjustment.
    pub affinity_adjustment: f64,
    /// Final score, clamped to `[0, 100]`.
    pub score: f64,
}

/// Returns the affinity adjustment for placing a worker of `affinity` in `role`.
///
/// A bulky-affinity worker on a non-bulky role gets no adjustment, unlike the
/// +5 a conventional-affinity worker receives there.
pub fn affinity_adjustment(role: &Role, affinity: Affinity) -> f64 {
    match (role.is_bulky(), affinity) {
        (true, Affinity::Bulky) => BULKY_AFFINITY_BONUS,
        (true, Affinity::Conventional) => -AFFINITY_MISMATCH_PENALTY,
        (false, Affinity::Conventional) => CONVENTIONAL_AFFINITY_BONUS,
        (false, Affinity::Bulky) => 0.0,
    }
}

/// Efficiency of a worker for a role.
///
/// Sorting roles recompute efficiency from productivity against
/// [`SORTING_REFERENCE_RATE`], capped at 100; other roles use the worker's
/// general efficiency.
pub fn role_efficiency(worker: &Worker, role: &Role) -> f64 {
    if role.is_sorting() {
        (worker.productivity_rate / SORTING_REFERENCE_RATE * 100.0).min(100.0)
    } else {
        worker.clamped_efficiency()
    }
}

/// Computes the adequacy score with all of its components.
pub fn score_breakdown(worker: &Worker, role: &Role, weights: &ScoringWeights) -> ScoreBreakdown {
    let experience = f64::from(worker.experience_level(&role.id)) * EXPERIENCE_SCALE;
    let efficiency = role_efficiency(worker, role);
    let base = efficiency * (weights.performance / 100.0) + experience * (weights.experience / 100.0);
    let affinity_adjustment = affinity_adjustment(role, worker.affinity);

    ScoreBreakdown {
        efficiency,
        experience,
        base,
        affinity_adjustment,
        score: (base + affinity_adjustment).clamp(0.0, 100.0),
    }
}

/// Computes the adequacy score of a worker for a role, in `[0, 100]`.
///
/// # Examples
///
/// ```
/// use allocation_engine::allocation::adequacy_score;
/// use allocation_engine::config::ScoringWeights;
/// use allocation_engine::models::{Affinity, ExperienceEntry, RoleCatalog, Worker};
///
/// let catalog = RoleCatalog::standard();
/// let worker = Worker {
///     id: "colab-001".to_string(),
///     name: String::new(),
///     active: true,
///     on_leave: false,
///     shift_code: "T2".to_string(),
///     affinity: Affinity::Bulky,
///     productivity_rate: 400.0,
///     efficiency: 50.0,
///     enabled_roles: vec!["func-003".to_string()],
///     experience: vec![ExperienceEntry { role_id: "func-003".to_string(), level: 5 }],
/// };
///
/// // Efficiency caps at 100, experience 5 -> 100, plus the bulky bonus, clamped.
/// let score = adequacy_score(&worker, catalog.get("func-003").unwrap(), &ScoringWeights::default());
/// assert_eq!(score, 100.0);
/// ```
pub fn adequacy_score(worker: &Worker, role: &Role, weights: &ScoringWeights) -> f64 {
    score_breakdown(worker, role, weights).score
}

/// Scores a worker against a role looked up by id.
///
/// Returns `RoleNotFound` if the role is not in the catalog.
pub fn score_for_role_id(
    worker: &Worker,
    role_id: &str,
    catalog: &RoleCatalog,
    config: &PlanningConfig,
) -> EngineResult<f64> {
    let role = catalog.get(role_id)?;
    Ok(adequacy_score(worker, role, &config.weights))
}
