//! Greedy team generation.
//!
//! This module fills every planned role from the available pool by picking,
//! slot by slot, the candidate with the highest adequacy score. The procedure
//! is single-pass and never revisits a placement, so it does not guarantee a
//! globally optimal total score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CertificationPolicy, PlanningConfig};
use crate::error::EngineResult;
use crate::models::{Allocation, AuditStep, Role, RoleCatalog, Worker};

use super::capacity::CapacityPlan;
use super::scoring::adequacy_score;

/// The output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Placements in the order they were made.
    pub allocations: Vec<Allocation>,
    /// One audit step per placement.
    pub audit_steps: Vec<AuditStep>,
}

/// Returns the planned roles in processing order.
///
/// Sorting roles come first; otherwise the plan's (catalog) order is kept.
/// Returns `RoleNotFound` if the plan names a role missing from the catalog.
pub fn processing_order<'a>(
    capacity: &CapacityPlan,
    catalog: &'a RoleCatalog,
) -> EngineResult<Vec<&'a Role>> {
    let mut roles = capacity
        .roles
        .iter()
        .map(|r| catalog.get(&r.role_id))
        .collect::<EngineResult<Vec<_>>>()?;

    roles.sort_by_key(|role| !role.is_sorting());
    Ok(roles)
}

/// Returns true if the worker may be placed in the role under `policy`.
pub fn is_eligible(worker: &Worker, role: &Role, policy: CertificationPolicy) -> bool {
    match policy {
        CertificationPolicy::Advisory => true,
        CertificationPolicy::Enforced => !role.requires_certification || worker.is_certified_for(&role.id),
    }
}

/// Generates the "ideal team" for a shift.
///
/// For each role in [`processing_order`], up to its planned positions are
/// filled by scanning the remaining pool left to right and keeping the first
/// candidate with the strictly highest adequacy score. The chosen worker is
/// removed from the pool. A role stops early when the pool runs out (or, with
/// enforced certification, when no eligible candidate remains).
///
/// Each worker appears at most once in the result, no role exceeds its planned
/// positions, and identical inputs always produce identical output.
///
/// # Examples
///
/// ```
/// use allocation_engine::allocation::{generate_allocation, plan_capacity};
/// use allocation_engine::config::PlanningConfig;
/// use allocation_engine::models::{Affinity, RoleCatalog, Worker, Zone};
///
/// let catalog = RoleCatalog::standard();
/// let config = PlanningConfig::default();
/// let zones = vec![Zone {
///     id: "z1".to_string(),
///     name: "Zone 1".to_string(),
///     cage_count: 10,
///     package_count: 800,
/// }];
/// let workers: Vec<Worker> = (0..3)
///     .map(|i| Worker {
///         id: format!("colab-{}", i),
///         name: String::new(),
///         active: true,
///         on_leave: false,
///         shift_code: "T1".to_string(),
///         affinity: Affinity::Conventional,
///         productivity_rate: 100.0 + 50.0 * i as f64,
///         efficiency: 60.0,
///         enabled_roles: vec![],
///         experience: vec![],
///     })
///     .collect();
///
/// let plan = plan_capacity(&zones, &catalog, &config);
/// let result = generate_allocation(&workers, &plan, &catalog, &config).unwrap();
///
/// // The fastest worker takes the single conventional sorting position.
/// assert_eq!(result.allocations[0].role_id, "func-002");
/// assert_eq!(result.allocations[0].worker_id, "colab-2");
/// assert_eq!(result.allocations.len(), 3);
/// ```
pub fn generate_allocation(
    available: &[Worker],
    capacity: &CapacityPlan,
    catalog: &RoleCatalog,
    config: &PlanningConfig,
) -> EngineResult<GenerationResult> {
    let roles = processing_order(capacity, catalog)?;
    let mut pool: Vec<&Worker> = available.iter().collect();
    let mut allocations = Vec::new();
    let mut audit_steps = Vec::new();

    for role in roles {
        let positions = capacity.positions_for(&role.id);
        let mut filled = 0u32;

        while filled < positions && !pool.is_empty() {
            let Some((index, score, candidates)) = best_candidate(&pool, role, config) else {
                break;
            };

            let worker = pool.remove(index);
            filled += 1;

            audit_steps.push(AuditStep {
                step_number: audit_steps.len() as u32 + 1,
                rule_id: "greedy_placement".to_string(),
                rule_name: "Greedy Placement".to_string(),
                input: serde_json::json!({
                    "role_id": role.id,
                    "position": filled,
                    "candidates": candidates
                }),
                output: serde_json::json!({
                    "worker_id": worker.id,
                    "score": score
                }),
                reasoning: format!(
                    "{} placed in {} ({}/{}) with the highest score {:.1} among {} candidates",
                    worker.id, role.name, filled, positions, score, candidates
                ),
            });
            allocations.push(Allocation::new(worker.id.clone(), role.id.clone()));
        }

        debug!(
            role_id = %role.id,
            positions,
            filled,
            remaining_pool = pool.len(),
            "Role processed"
        );
    }

    Ok(GenerationResult {
        allocations,
        audit_steps,
    })
}

/// Finds the first pool member with the strictly highest score.
///
/// Returns the pool index, its score and the number of eligible candidates.
fn best_candidate(pool: &[&Worker], role: &Role, config: &PlanningConfig) -> Option<(usize, f64, usize)> {
    let mut best: Option<(usize, f64)> = None;
    let mut candidates = 0;

    for (index, worker) in pool.iter().enumerate() {
        if !is_eligible(worker, role, config.certification_policy) {
            continue;
        }
        candidates += 1;

        let score = adequacy_score(worker, role, &config.weights);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }

    best.map(|(index, score)| (index, score, candidates))
}
