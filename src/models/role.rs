//! Role catalog types.
//!
//! Roles are fixed reference data loaded once at process start. Each role
//! carries an explicit [`RoleCategory`] that drives capacity formulas and
//! scoring adjustments.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The operational category of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// Feeding parcels into the sorter.
    Induction,
    /// Sorting regular-sized parcels into zones.
    ConventionalSorting,
    /// Sorting bulky parcels.
    BulkySorting,
    /// Labeling regular-sized parcels.
    ConventionalLabeling,
    /// Labeling bulky parcels.
    BulkyLabeling,
    /// Retrieving ("fishing") parcels, one position per zone.
    Retrieval,
    /// Any role without a capacity formula.
    Other,
}

impl RoleCategory {
    /// Returns true for the sorting categories.
    pub fn is_sorting(self) -> bool {
        matches!(self, Self::ConventionalSorting | Self::BulkySorting)
    }

    /// Returns true for the bulky/oversized categories.
    pub fn is_bulky(self) -> bool {
        matches!(self, Self::BulkySorting | Self::BulkyLabeling)
    }
}

/// A fixed catalog entry describing a staffable position type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier for the role (e.g., "func-002").
    pub id: String,
    /// Display name.
    pub name: String,
    /// The operational category of the role.
    pub category: RoleCategory,
    /// Whether the role requires a certification.
    #[serde(default)]
    pub requires_certification: bool,
    /// Whether the role is offered in planning.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Role {
    /// Returns true if this is a sorting role.
    pub fn is_sorting(&self) -> bool {
        self.category.is_sorting()
    }

    /// Returns true if this is a bulky role.
    pub fn is_bulky(&self) -> bool {
        self.category.is_bulky()
    }
}

/// An ordered, immutable list of roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleCatalog {
    roles: Vec<Role>,
}

impl RoleCatalog {
    /// Creates a catalog, rejecting duplicate or blank role ids.
    pub fn new(roles: Vec<Role>) -> EngineResult<Self> {
        let mut seen = HashSet::new();
        for role in &roles {
            if role.id.trim().is_empty() {
                return Err(EngineError::ConfigParseError {
                    path: "roles".to_string(),
                    message: format!("role '{}' has an empty id", role.name),
                });
            }
            if !seen.insert(role.id.as_str()) {
                return Err(EngineError::ConfigParseError {
                    path: "roles".to_string(),
                    message: format!("duplicate role id '{}'", role.id),
                });
            }
        }
        Ok(Self { roles })
    }

    /// The facility's default catalog of thirteen roles.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocation_engine::models::{RoleCatalog, RoleCategory};
    ///
    /// let catalog = RoleCatalog::standard();
    /// assert_eq!(catalog.roles().len(), 13);
    /// let bulky = catalog.get("func-003").unwrap();
    /// assert_eq!(bulky.category, RoleCategory::BulkySorting);
    /// assert!(bulky.requires_certification);
    /// ```
    pub fn standard() -> Self {
        let role = |id: &str, name: &str, category, requires_certification| Role {
            id: id.to_string(),
            name: name.to_string(),
            category,
            requires_certification,
            active: true,
        };

        Self {
            roles: vec![
                role("func-001", "Induction", RoleCategory::Induction, false),
                role("func-002", "Conventional Sorting", RoleCategory::ConventionalSorting, false),
                role("func-003", "Bulky Sorting", RoleCategory::BulkySorting, true),
                role("func-004", "Conventional Labeling", RoleCategory::ConventionalLabeling, false),
                role("func-005", "Bulky Labeling", RoleCategory::BulkyLabeling, true),
                role("func-006", "Pallet Jack", RoleCategory::Other, true),
                role("func-007", "Linehaul Unloading", RoleCategory::Other, false),
                role("func-008", "Retrieval", RoleCategory::Retrieval, false),
                role("func-009", "Goalkeeper", RoleCategory::Other, false),
                role("func-010", "Problem Solver", RoleCategory::Other, false),
                role("func-011", "Assistant", RoleCategory::Other, false),
                role("func-012", "Helper", RoleCategory::Other, false),
                role("func-013", "Checker", RoleCategory::Other, false),
            ],
        }
    }

    /// Returns all roles in catalog order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Gets a role by its id.
    pub fn get(&self, role_id: &str) -> EngineResult<&Role> {
        self.roles
            .iter()
            .find(|r| r.id == role_id)
            .ok_or_else(|| EngineError::RoleNotFound {
                role_id: role_id.to_string(),
            })
    }
}

impl TryFrom<Vec<Role>> for RoleCatalog {
    type Error = EngineError;

    fn try_from(roles: Vec<Role>) -> EngineResult<Self> {
        Self::new(roles)
    }
}

impl From<RoleCatalog> for Vec<Role> {
    fn from(catalog: RoleCatalog) -> Self {
        catalog.roles
    }
}
