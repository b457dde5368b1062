//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading shift types and
//! HR policies from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{EngineError, EngineResult};

use super::types::{HrConfig, PolicyConfig, ShiftTypeConfig, ShiftTypesConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── shift_types.yaml   # Shift timings, pairing modes and thresholds
/// └── policies.yaml      # Allowance, project and reminder policies
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let shift = loader.get_shift_type("General").unwrap();
/// println!("General starts at {}", shift.start_time);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HrConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `shift_types.yaml` or `policies.yaml` is missing
    /// - Any file contains invalid YAML or is missing a required field
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let shift_types = Self::load_yaml::<ShiftTypesConfig>(&path.join("shift_types.yaml"))?;
        let policies = Self::load_yaml::<PolicyConfig>(&path.join("policies.yaml"))?;

        Ok(Self {
            config: HrConfig::new(shift_types.shift_types, policies),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: HrConfig) -> Self {
        Self { config }
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

    /// Returns the underlying configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    /// Returns the policies.
    pub fn policies(&self) -> &PolicyConfig {
        self.config.policies()
    }

    /// Gets a shift type by name.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let shift = loader.get_shift_type("Night")?;
    /// assert!(shift.end_time < shift.start_time);
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn get_shift_type(&self, name: &str) -> EngineResult<&ShiftTypeConfig> {
        self.config
            .shift_types()
            .get(name)
            .ok_or_else(|| EngineError::ShiftTypeNotFound {
                name: name.to_string(),
            })
    }

    /// Shift types with auto attendance enabled, ordered by name.
    pub fn auto_attendance_shift_types(&self) -> Vec<&ShiftTypeConfig> {
        self.config
            .shift_types()
            .values()
            .filter(|s| s.enable_auto_attendance)
            .collect()
    }

    /// A copy of this configuration with the shift type's last device sync moved to
    /// `last_sync`.
    pub fn with_last_sync(&self, name: &str, last_sync: NaiveDateTime) -> EngineResult<Self> {
        let mut shift_types = self.config.shift_types().clone();
        let shift = shift_types
            .get_mut(name)
            .ok_or_else(|| EngineError::ShiftTypeNotFound {
                name: name.to_string(),
            })?;
        shift.last_sync_of_checkin = Some(last_sync);
        Ok(Self {
            config: HrConfig::new(shift_types, self.policies().clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AggregationMode, PairingMode};
    use chrono::NaiveTime;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert!(loader.config().shift_types().contains_key("General"));
        assert!(loader.config().shift_types().contains_key("Night"));
    }

    #[test]
    fn test_get_shift_type() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let shift = loader.get_shift_type("General").unwrap();
        assert_eq!(shift.name, "General");
        assert_eq!(shift.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(shift.end_time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(shift.pairing_mode, PairingMode::StrictByDirection);
        assert_eq!(shift.aggregation_mode, AggregationMode::EveryValidPair);
        assert_eq!(shift.late_entry_grace_minutes, 15);
        assert_eq!(shift.absent_threshold_hours, Some(Decimal::new(4, 0)));
    }

    #[test]
    fn test_get_shift_type_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_shift_type("unknown") {
            Err(EngineError::ShiftTypeNotFound { name }) => assert_eq!(name, "unknown"),
            other => panic!("Expected ShiftTypeNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_policies_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policies = loader.policies();

        assert_eq!(policies.allowances.bike_mileage_km_per_litre, Decimal::new(20, 0));
        assert_eq!(policies.allowances.minimum_fuel_allowance, Decimal::new(1000, 0));
        assert_eq!(policies.projects.max_daily_hours, Decimal::new(8, 0));
        assert_eq!(policies.reminders.default_threshold_minutes, 15);
    }

    #[test]
    fn test_auto_attendance_shift_types() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let names: Vec<&str> = loader
            .auto_attendance_shift_types()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["General", "Night"]);
    }

    #[test]
    fn test_with_last_sync_moves_only_that_shift() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let synced = NaiveDateTime::parse_from_str("2024-04-01 06:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();

        let updated = loader.with_last_sync("Night", synced).unwrap();
        assert_eq!(
            updated.get_shift_type("Night").unwrap().last_sync_of_checkin,
            Some(synced)
        );
        assert_eq!(
            updated.get_shift_type("General").unwrap().last_sync_of_checkin,
            loader.get_shift_type("General").unwrap().last_sync_of_checkin
        );
        assert!(loader.with_last_sync("Evening", synced).is_err());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("shift_types.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
