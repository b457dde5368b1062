//! Configuration types for shift attendance and HR policies.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calculation::ClassificationRules;
use crate::models::TransportType;

/// How the direction of each log in a shift is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// Logs alternate IN, OUT, IN, ... regardless of the recorded direction.
    #[default]
    Alternating,
    /// Only the recorded direction of each log counts.
    StrictByDirection,
}

/// Which logs contribute to the working hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Only the first check-in and the last check-out.
    #[default]
    FirstLastOnly,
    /// Every complete IN/OUT pair.
    EveryValidPair,
}

fn default_check_window_minutes() -> u32 {
    60
}

/// Configuration of one shift type.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftTypeConfig {
    /// Shift type name; filled from the map key when loading.
    #[serde(default)]
    pub name: String,
    /// Scheduled start time.
    pub start_time: NaiveTime,
    /// Scheduled end time; before or equal to the start for overnight shifts.
    pub end_time: NaiveTime,
    /// Whether attendance is derived automatically from logs.
    #[serde(default)]
    pub enable_auto_attendance: bool,
    /// How log directions are determined.
    #[serde(default)]
    pub pairing_mode: PairingMode,
    /// Which logs contribute to the working hours.
    #[serde(default)]
    pub aggregation_mode: AggregationMode,
    /// Flag check-ins after the grace period.
    #[serde(default)]
    pub enable_late_entry_marking: bool,
    /// Minutes after the start before a check-in is late.
    #[serde(default)]
    pub late_entry_grace_minutes: u32,
    /// Flag check-outs before the grace period.
    #[serde(default)]
    pub enable_early_exit_marking: bool,
    /// Minutes before the end after which a check-out is not early.
    #[serde(default)]
    pub early_exit_grace_minutes: u32,
    /// Working hours below which the day is Absent.
    #[serde(default)]
    pub absent_threshold_hours: Option<Decimal>,
    /// Working hours below which the day is a Half Day.
    #[serde(default)]
    pub half_day_threshold_hours: Option<Decimal>,
    /// Only logs from this date onwards are processed.
    #[serde(default)]
    pub process_attendance_after: Option<NaiveDate>,
    /// Time up to which devices have synced their logs.
    #[serde(default)]
    pub last_sync_of_checkin: Option<NaiveDateTime>,
    /// Holiday list for this shift; the employee's list is used when absent.
    #[serde(default)]
    pub holiday_list: Option<String>,
    /// Mark attendance on holidays too.
    #[serde(default)]
    pub mark_auto_attendance_on_holidays: bool,
    /// Minutes before the start from which check-ins count for the shift.
    #[serde(default = "default_check_window_minutes")]
    pub begin_check_in_before_start_minutes: u32,
    /// Minutes after the end until which check-outs count for the shift.
    #[serde(default = "default_check_window_minutes")]
    pub allow_check_out_after_end_minutes: u32,
}

impl ShiftTypeConfig {
    /// The classifier settings of this shift type.
    pub fn classification_rules(&self) -> ClassificationRules {
        ClassificationRules {
            enable_late_marking: self.enable_late_entry_marking,
            late_grace_minutes: self.late_entry_grace_minutes,
            enable_early_marking: self.enable_early_exit_marking,
            early_grace_minutes: self.early_exit_grace_minutes,
            absent_threshold_hours: self.absent_threshold_hours,
            half_day_threshold_hours: self.half_day_threshold_hours,
        }
    }

    /// Returns true if the shift is set up for auto attendance.
    pub fn auto_attendance_ready(&self) -> bool {
        self.enable_auto_attendance && self.process_attendance_after.is_some()
    }
}

fn default_car_mileage() -> Decimal {
    Decimal::new(10, 0)
}

fn default_bike_mileage() -> Decimal {
    Decimal::new(20, 0)
}

fn default_minimum_fuel_allowance() -> Decimal {
    Decimal::new(1000, 0)
}

fn default_maximum_fuel_allowance() -> Decimal {
    Decimal::new(10000, 0)
}

/// Fuel allowance policy.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowancePolicy {
    /// Kilometres per litre for cars.
    #[serde(default = "default_car_mileage")]
    pub car_mileage_km_per_litre: Decimal,
    /// Kilometres per litre for bikes.
    #[serde(default = "default_bike_mileage")]
    pub bike_mileage_km_per_litre: Decimal,
    /// Lowest allowance granted.
    #[serde(default = "default_minimum_fuel_allowance")]
    pub minimum_fuel_allowance: Decimal,
    /// Highest allowance granted.
    #[serde(default = "default_maximum_fuel_allowance")]
    pub maximum_fuel_allowance: Decimal,
    /// Holiday list whose holidays are not commute days.
    #[serde(default)]
    pub holiday_list: Option<String>,
}

impl AllowancePolicy {
    /// Kilometres per litre for a vehicle.
    pub fn mileage_for(&self, transport: Option<TransportType>) -> Decimal {
        match transport {
            Some(TransportType::Bike) => self.bike_mileage_km_per_litre,
            Some(TransportType::Car) | None => self.car_mileage_km_per_litre,
        }
    }
}

impl Default for AllowancePolicy {
    fn default() -> Self {
        Self {
            car_mileage_km_per_litre: default_car_mileage(),
            bike_mileage_km_per_litre: default_bike_mileage(),
            minimum_fuel_allowance: default_minimum_fuel_allowance(),
            maximum_fuel_allowance: default_maximum_fuel_allowance(),
            holiday_list: None,
        }
    }
}

fn default_max_daily_hours() -> Decimal {
    Decimal::new(8, 0)
}

/// Project assignment policy.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectPolicy {
    /// Maximum hours per day across overlapping project assignments.
    #[serde(default = "default_max_daily_hours")]
    pub max_daily_hours: Decimal,
}

impl Default for ProjectPolicy {
    fn default() -> Self {
        Self {
            max_daily_hours: default_max_daily_hours(),
        }
    }
}

fn default_reminder_threshold() -> u32 {
    15
}

fn default_reminder_tolerance() -> u32 {
    1
}

fn default_look_back_hours() -> u32 {
    2
}

/// Check-in/check-out reminder policy.
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderPolicy {
    /// Reminder delay for employees without their own setting.
    #[serde(default = "default_reminder_threshold")]
    pub default_threshold_minutes: u32,
    /// Allowed distance in minutes between the delay and the elapsed time.
    #[serde(default = "default_reminder_tolerance")]
    pub tolerance_minutes: u32,
    /// Shifts that started or ended within this many hours are considered.
    #[serde(default = "default_look_back_hours")]
    pub look_back_hours: u32,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            default_threshold_minutes: default_reminder_threshold(),
            tolerance_minutes: default_reminder_tolerance(),
            look_back_hours: default_look_back_hours(),
        }
    }
}

/// Policies from policies.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    /// Fuel allowance policy.
    #[serde(default)]
    pub allowances: AllowancePolicy,
    /// Project assignment policy.
    #[serde(default)]
    pub projects: ProjectPolicy,
    /// Reminder policy.
    #[serde(default)]
    pub reminders: ReminderPolicy,
}

/// Shift types file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftTypesConfig {
    /// Map of shift type name to its configuration.
    pub shift_types: BTreeMap<String, ShiftTypeConfig>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct HrConfig {
    shift_types: BTreeMap<String, ShiftTypeConfig>,
    policies: PolicyConfig,
}

impl HrConfig {
    /// Creates a new HrConfig, naming each shift type after its key.
    pub fn new(shift_types: BTreeMap<String, ShiftTypeConfig>, policies: PolicyConfig) -> Self {
        let shift_types = shift_types
            .into_iter()
            .map(|(name, mut shift)| {
                shift.name = name.clone();
                (name, shift)
            })
            .collect();
        Self {
            shift_types,
            policies,
        }
    }

    /// Returns all shift types, ordered by name.
    pub fn shift_types(&self) -> &BTreeMap<String, ShiftTypeConfig> {
        &self.shift_types
    }

    /// Returns the policies.
    pub fn policies(&self) -> &PolicyConfig {
        &self.policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_type_defaults() {
        let yaml = r#"
start_time: "09:00:00"
end_time: "18:00:00"
"#;
        let shift: ShiftTypeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(shift.pairing_mode, PairingMode::Alternating);
        assert_eq!(shift.aggregation_mode, AggregationMode::FirstLastOnly);
        assert_eq!(shift.begin_check_in_before_start_minutes, 60);
        assert_eq!(shift.allow_check_out_after_end_minutes, 60);
        assert!(!shift.auto_attendance_ready());
    }

    #[test]
    fn test_classification_rules_copied_from_shift() {
        let yaml = r#"
start_time: "09:00:00"
end_time: "18:00:00"
enable_late_entry_marking: true
late_entry_grace_minutes: 15
absent_threshold_hours: "4"
half_day_threshold_hours: "6.5"
"#;
        let shift: ShiftTypeConfig = serde_yaml::from_str(yaml).unwrap();
        let rules = shift.classification_rules();
        assert!(rules.enable_late_marking);
        assert_eq!(rules.late_grace_minutes, 15);
        assert!(!rules.enable_early_marking);
        assert_eq!(rules.absent_threshold_hours, Some(Decimal::new(4, 0)));
        assert_eq!(rules.half_day_threshold_hours, Some(Decimal::new(65, 1)));
    }

    #[test]
    fn test_mileage_by_transport() {
        let policy = AllowancePolicy::default();
        assert_eq!(policy.mileage_for(Some(TransportType::Bike)), Decimal::new(20, 0));
        assert_eq!(policy.mileage_for(Some(TransportType::Car)), Decimal::new(10, 0));
        assert_eq!(policy.mileage_for(None), Decimal::new(10, 0));
    }

    #[test]
    fn test_hr_config_names_shift_types() {
        let yaml = r#"
shift_types:
  Night:
    start_time: "22:00:00"
    end_time: "06:00:00"
"#;
        let parsed: ShiftTypesConfig = serde_yaml::from_str(yaml).unwrap();
        let config = HrConfig::new(parsed.shift_types, PolicyConfig::default());
        assert_eq!(config.shift_types()["Night"].name, "Night");
        assert_eq!(config.policies().projects.max_daily_hours, Decimal::new(8, 0));
    }
}
