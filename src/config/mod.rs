//! Configuration loading and management for the Attendance Engine.
//!
//! This module provides functionality to load shift types (timings, log pairing
//! modes, grace periods, status thresholds) and HR policies from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("{} shift types loaded", config.config().shift_types().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AggregationMode, AllowancePolicy, HrConfig, PairingMode, PolicyConfig, ProjectPolicy,
    ReminderPolicy, ShiftTypeConfig, ShiftTypesConfig,
};
