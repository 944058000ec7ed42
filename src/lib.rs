//! Shift Allocation Engine for parcel sorting facilities
//!
//! This crate derives the staffing each role needs for a shift from the
//! measured workload, scores how well each worker fits each role, and builds
//! the shift's team greedily, with manual adjustments and a staged planning
//! workflow on top.

#![warn(missing_docs)]

pub mod allocation;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod telemetry;
