//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading facility
//! configurations from YAML files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{EngineError, EngineResult};
use crate::models::{Role, RoleCatalog};

use super::types::{
    FacilityConfig, FacilityMetadata, PlanningConfig, RolesConfig, ShiftDefinition, ShiftsConfig,
};

/// Loads and provides access to facility configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query roles, shifts, and planning defaults.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/srs7/
/// ├── facility.yaml   # Facility metadata
/// ├── roles.yaml      # Role catalog, in processing order
/// ├── shifts.yaml     # Shift definitions
/// └── planning.yaml   # Default planning parameters
/// ```
///
/// # Example
///
/// ```no_run
/// use allocation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/srs7").unwrap();
///
/// let role = loader.get_role("func-002").unwrap();
/// println!("Role: {}", role.name);
///
/// let shift = loader.get_shift("T2").unwrap();
/// println!("Shift: {} ({} - {})", shift.name, shift.start_time, shift.end_time);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: Arc<FacilityConfig>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or duplicate ids (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<FacilityMetadata>(&path.join("facility.yaml"))?;
        let roles = Self::load_yaml::<RolesConfig>(&path.join("roles.yaml"))?;

        let shifts_path = path.join("shifts.yaml");
        let shifts = Self::load_yaml::<ShiftsConfig>(&shifts_path)?.shifts;
        Self::check_unique_shift_codes(&shifts, &shifts_path)?;

        let planning = Self::load_yaml::<PlanningConfig>(&path.join("planning.yaml"))?;

        Ok(Self::from_config(FacilityConfig::new(
            metadata,
            roles.roles,
            shifts,
            planning,
        )))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: FacilityConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_unique_shift_codes(shifts: &[ShiftDefinition], path: &Path) -> EngineResult<()> {
        for (index, shift) in shifts.iter().enumerate() {
            if shifts[..index].iter().any(|s| s.code == shift.code) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate shift code '{}'", shift.code),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying facility configuration.
    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    /// Returns a shared handle to the facility configuration.
    pub fn shared_config(&self) -> Arc<FacilityConfig> {
        Arc::clone(&self.config)
    }

    /// Returns the facility metadata.
    pub fn facility(&self) -> &FacilityMetadata {
        self.config.facility()
    }

    /// Returns the role catalog.
    pub fn catalog(&self) -> &RoleCatalog {
        self.config.catalog()
    }

    /// Returns the default planning parameters.
    pub fn planning_defaults(&self) -> &PlanningConfig {
        self.config.planning()
    }

    /// Gets a role by its id.
    ///
    /// Returns `RoleNotFound` if the id is not in the catalog.
    pub fn get_role(&self, role_id: &str) -> EngineResult<&Role> {
        self.config.catalog().get(role_id)
    }

    /// Gets a shift by its roster code.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use allocation_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/srs7")?;
    /// let shift = loader.get_shift("T1")?;
    /// println!("Shift: {}", shift.name);
    /// # Ok::<(), allocation_engine::error::EngineError>(())
    /// ```
    pub fn get_shift(&self, code: &str) -> EngineResult<&ShiftDefinition> {
        self.config.shift(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CertificationPolicy;
    use crate::models::RoleCategory;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/srs7"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.facility().code, "SRS7");
        assert_eq!(loader.catalog().roles().len(), 13);
        assert_eq!(loader.config().shifts().len(), 3);
    }

    #[test]
    fn test_loaded_catalog_matches_standard() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.catalog(), &RoleCatalog::standard());
    }

    #[test]
    fn test_get_role() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let role = loader.get_role("func-003").unwrap();
        assert_eq!(role.name, "Bulky Sorting");
        assert_eq!(role.category, RoleCategory::BulkySorting);
        assert!(role.requires_certification);
    }

    #[test]
    fn test_get_role_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_role("unknown") {
            Err(EngineError::RoleNotFound { role_id }) => assert_eq!(role_id, "unknown"),
            other => panic!("Expected RoleNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_get_shift() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let shift = loader.get_shift("T1").unwrap();
        assert_eq!(shift.id, "turno-001");
        assert_eq!(shift.start_time, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(shift.end_time, NaiveTime::from_hms_opt(8, 20, 0).unwrap());
    }

    #[test]
    fn test_get_shift_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(matches!(
            loader.get_shift("T9"),
            Err(EngineError::ShiftNotFound { .. })
        ));
    }

    #[test]
    fn test_planning_defaults_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let planning = loader.planning_defaults();

        assert_eq!(planning.sorting_package_threshold, 1500);
        assert_eq!(planning.bulky_volume_percentage, Decimal::new(10, 0));
        assert_eq!(planning.bulky_target_rate, Decimal::new(150, 0));
        assert_eq!(planning.induction_positions, 5);
        assert_eq!(planning.labeling_positions, 2);
        assert_eq!(planning.weights.performance, 70.0);
        assert_eq!(planning.weights.experience, 30.0);
        assert_eq!(planning.certification_policy, CertificationPolicy::Advisory);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("facility.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }
}
