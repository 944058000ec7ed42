//! Configuration loading and management for the Shift Allocation Engine.
//!
//! This module provides functionality to load facility configurations from
//! YAML files, including the role catalog, shift definitions and default
//! planning parameters.
//!
//! # Example
//!
//! ```no_run
//! use allocation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/srs7").unwrap();
//! println!("Loaded facility: {}", config.facility().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CertificationPolicy, FacilityConfig, FacilityMetadata, PlanningConfig, ScoringWeights,
    ShiftDefinition,
};
