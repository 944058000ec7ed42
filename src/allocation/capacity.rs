//! Capacity planning functionality.
//!
//! This module converts the shift's workload (zones and their package counts)
//! and the planning configuration into the number of positions each role
//! needs.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::PlanningConfig;
use crate::models::{AuditStep, Role, RoleCatalog, RoleCategory, Zone, total_packages};

/// Positions required for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCapacity {
    /// The role id.
    pub role_id: String,
    /// The role's category, which selected the formula.
    pub category: RoleCategory,
    /// The number of positions to fill.
    pub positions: u32,
}

/// The required positions per role for one shift, in catalog order.
///
/// Roles without a capacity formula are absent from the plan and treated as
/// having zero positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPlan {
    /// Planned roles in catalog order.
    pub roles: Vec<RoleCapacity>,
    /// Sum of package counts across zones.
    pub total_packages: u64,
    /// The share of total volume classified as bulky.
    pub bulky_packages: Decimal,
    /// One audit step per planned role.
    pub audit_steps: Vec<AuditStep>,
}

impl CapacityPlan {
    /// Returns the positions for a role, or 0 if the role is not planned.
    pub fn positions_for(&self, role_id: &str) -> u32 {
        self.roles
            .iter()
            .find(|r| r.role_id == role_id)
            .map(|r| r.positions)
            .unwrap_or(0)
    }

    /// Returns true if the role has a capacity formula in this plan.
    pub fn is_planned(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r.role_id == role_id)
    }

    /// Sum of positions across all planned roles.
    pub fn total_positions(&self) -> u32 {
        self.roles.iter().map(|r| r.positions).sum()
    }
}

/// Number of conventional sorters a zone needs: 1 up to the threshold, 2 above it.
pub fn zone_sorting_positions(package_count: u64, threshold: u64) -> u32 {
    if package_count <= threshold { 1 } else { 2 }
}

/// Sums the per-zone conventional sorting positions.
///
/// # Examples
///
/// ```
/// use allocation_engine::allocation::conventional_sorting_positions;
/// use allocation_engine::models::Zone;
///
/// let zone = |packages: u64| Zone {
///     id: format!("z{}", packages),
///     name: String::new(),
///     cage_count: 0,
///     package_count: packages,
/// };
/// let zones = vec![zone(1000), zone(1600), zone(1500)];
/// assert_eq!(conventional_sorting_positions(&zones, 1500), 4);
/// ```
pub fn conventional_sorting_positions(zones: &[Zone], threshold: u64) -> u32 {
    zones
        .iter()
        .map(|z| zone_sorting_positions(z.package_count, threshold))
        .sum()
}

/// Packages classified as bulky: `total × percentage / 100`.
pub fn bulky_packages(total_packages: u64, percentage: Decimal) -> Option<Decimal> {
    Decimal::from(total_packages)
        .checked_mul(percentage)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Positions for bulky sorting: `ceil(total × percentage / 100 / target_rate)`.
///
/// A non-positive target rate or a negative result yields zero positions;
/// an overflowing result saturates at `u32::MAX`.
///
/// # Examples
///
/// ```
/// use allocation_engine::allocation::bulky_sorting_positions;
/// use rust_decimal::Decimal;
///
/// let positions = bulky_sorting_positions(10_000, Decimal::new(10, 0), Decimal::new(150, 0));
/// assert_eq!(positions, 7);
/// ```
pub fn bulky_sorting_positions(
    total_packages: u64,
    percentage: Decimal,
    target_rate: Decimal,
) -> u32 {
    if target_rate <= Decimal::ZERO {
        return 0;
    }

    let Some(positions) = bulky_packages(total_packages, percentage)
        .and_then(|bulky| bulky.checked_div(target_rate))
        .map(|p| p.ceil())
    else {
        return u32::MAX;
    };

    if positions <= Decimal::ZERO {
        0
    } else {
        positions.to_u32().unwrap_or(u32::MAX)
    }
}

/// Computes the required positions for every role with a capacity formula.
///
/// Formulas by category:
/// - conventional sorting: one sorter per zone, two when the zone exceeds the
///   per-person package threshold
/// - bulky sorting: bulky volume divided by the bulky target rate, rounded up
/// - induction: the configured induction count
/// - conventional and bulky labeling: the configured labeling count
/// - retrieval: one position per zone
///
/// Inactive roles and roles in the `Other` category are left out.
///
/// # Examples
///
/// ```
/// use allocation_engine::allocation::plan_capacity;
/// use allocation_engine::config::PlanningConfig;
/// use allocation_engine::models::{RoleCatalog, Zone};
///
/// let zone = |id: &str, packages: u64| Zone {
///     id: id.to_string(),
///     name: id.to_string(),
///     cage_count: 10,
///     package_count: packages,
/// };
/// let zones = vec![zone("a", 2000), zone("b", 500), zone("c", 1500)];
///
/// let plan = plan_capacity(&zones, &RoleCatalog::standard(), &PlanningConfig::default());
/// assert_eq!(plan.positions_for("func-002"), 4); // conventional sorting
/// assert_eq!(plan.positions_for("func-003"), 3); // bulky sorting
/// assert_eq!(plan.positions_for("func-008"), 3); // retrieval
/// assert!(!plan.is_planned("func-006"));
/// ```
pub fn plan_capacity(zones: &[Zone], catalog: &RoleCatalog, config: &PlanningConfig) -> CapacityPlan {
    let total = total_packages(zones);
    let bulky = bulky_packages(total, config.bulky_volume_percentage).unwrap_or(Decimal::MAX);

    let mut roles = Vec::new();
    let mut audit_steps = Vec::new();

    for role in catalog.roles().iter().filter(|r| r.active) {
        let step_number = audit_steps.len() as u32 + 1;
        let Some((positions, audit_step)) = role_positions(role, zones, total, bulky, config, step_number)
        else {
            continue;
        };

        roles.push(RoleCapacity {
            role_id: role.id.clone(),
            category: role.category,
            positions,
        });
        audit_steps.push(audit_step);
    }

    CapacityPlan {
        roles,
        total_packages: total,
        bulky_packages: bulky,
        audit_steps,
    }
}

fn role_positions(
    role: &Role,
    zones: &[Zone],
    total: u64,
    bulky: Decimal,
    config: &PlanningConfig,
    step_number: u32,
) -> Option<(u32, AuditStep)> {
    let step = |rule_id: &str,
                rule_name: &str,
                input: serde_json::Value,
                positions: u32,
                reasoning: String| AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input,
        output: serde_json::json!({
            "role_id": role.id,
            "positions": positions
        }),
        reasoning,
    };

    let result = match role.category {
        RoleCategory::ConventionalSorting => {
            let threshold = config.sorting_package_threshold;
            let positions = conventional_sorting_positions(zones, threshold);
            let doubled = zones.iter().filter(|z| z.package_count > threshold).count();
            (
                positions,
                step(
                    "conventional_sorting_capacity",
                    "Conventional Sorting Capacity",
                    serde_json::json!({
                        "zones": zones.len(),
                        "threshold": threshold
                    }),
                    positions,
                    format!(
                        "{} zones, {} above {} packages need two sorters: {} positions",
                        zones.len(),
                        doubled,
                        threshold,
                        positions
                    ),
                ),
            )
        }
        RoleCategory::BulkySorting => {
            let positions = bulky_sorting_positions(
                total,
                config.bulky_volume_percentage,
                config.bulky_target_rate,
            );
            (
                positions,
                step(
                    "bulky_sorting_capacity",
                    "Bulky Sorting Capacity",
                    serde_json::json!({
                        "total_packages": total,
                        "bulky_percentage": config.bulky_volume_percentage.normalize().to_string(),
                        "target_rate": config.bulky_target_rate.normalize().to_string()
                    }),
                    positions,
                    format!(
                        "ceil({} bulky packages / {} per hour) = {} positions",
                        bulky.normalize(),
                        config.bulky_target_rate.normalize(),
                        positions
                    ),
                ),
            )
        }
        RoleCategory::Induction => {
            let positions = config.induction_positions;
            (
                positions,
                step(
                    "fixed_capacity",
                    "Fixed Capacity",
                    serde_json::json!({"configured_positions": positions}),
                    positions,
                    format!("Induction uses the configured {} positions", positions),
                ),
            )
        }
        RoleCategory::ConventionalLabeling | RoleCategory::BulkyLabeling => {
            let positions = config.labeling_positions;
            (
                positions,
                step(
                    "fixed_capacity",
                    "Fixed Capacity",
                    serde_json::json!({"configured_positions": positions}),
                    positions,
                    format!("Labeling uses the configured {} positions", positions),
                ),
            )
        }
        RoleCategory::Retrieval => {
            let positions = zones.len() as u32;
            (
                positions,
                step(
                    "retrieval_capacity",
                    "Retrieval Capacity",
                    serde_json::json!({"zones": zones.len()}),
                    positions,
                    format!("One retrieval position per zone: {} positions", positions),
                ),
            )
        }
        RoleCategory::Other => return None,
    };

    Some(result)
}
