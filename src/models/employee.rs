//! Employee model and related types.
//!
//! This module defines the Employee struct along with the fields the attendance,
//! allowance and reminder workflows read from it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Currently employed.
    #[default]
    Active,
    /// Temporarily not working.
    Inactive,
    /// Suspended.
    Suspended,
    /// Has left the company.
    Left,
}

/// How an employee commutes; selects the vehicle mileage for fuel allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportType {
    /// Four-wheeler.
    Car,
    /// Two-wheeler.
    Bike,
}

/// Represents an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub employee_name: String,
    /// Employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Login of the employee, used as the notification recipient.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Identifier the biometric device uses for this employee.
    #[serde(default)]
    pub attendance_device_id: Option<String>,
    /// Date of joining.
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
    /// Date the employee record was created.
    pub created_on: NaiveDate,
    /// Last working day, if the employee is leaving.
    #[serde(default)]
    pub relieving_date: Option<NaiveDate>,
    /// Shift type used when no shift assignment applies.
    #[serde(default)]
    pub default_shift: Option<String>,
    /// Holiday list used when the shift type has none.
    #[serde(default)]
    pub holiday_list: Option<String>,
    /// One-way commute distance in kilometres.
    #[serde(default)]
    pub distance_km: Option<Decimal>,
    /// Commute vehicle.
    #[serde(default)]
    pub transport_type: Option<TransportType>,
    /// Yearly medical allowance.
    #[serde(default)]
    pub medical_allowance: Decimal,
    /// Medical allowance claimed so far.
    #[serde(default)]
    pub medical_availed: Decimal,
    /// Medical allowance still claimable.
    #[serde(default)]
    pub medical_balance: Decimal,
    /// Minutes after shift start at which to send the check-in reminder.
    #[serde(default)]
    pub checkin_reminder_minutes: Option<u32>,
    /// Minutes after shift end at which to send the check-out reminder.
    #[serde(default)]
    pub checkout_reminder_minutes: Option<u32>,
}

impl Employee {
    /// Returns true if the employee is active.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Date of joining, falling back to the record creation date.
    pub fn joining_date(&self) -> NaiveDate {
        self.date_of_joining.unwrap_or(self.created_on)
    }

    /// Returns true if both commute distance and vehicle are recorded.
    pub fn has_commute(&self) -> bool {
        self.distance_km.is_some() && self.transport_type.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> Employee {
        Employee {
            id: "EMP-0001".to_string(),
            employee_name: "Ayesha Khan".to_string(),
            status: EmployeeStatus::Active,
            user_id: Some("ayesha@example.com".to_string()),
            attendance_device_id: None,
            date_of_joining: None,
            created_on: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            relieving_date: None,
            default_shift: None,
            holiday_list: None,
            distance_km: None,
            transport_type: None,
            medical_allowance: Decimal::ZERO,
            medical_availed: Decimal::ZERO,
            medical_balance: Decimal::ZERO,
            checkin_reminder_minutes: None,
            checkout_reminder_minutes: None,
        }
    }

    #[test]
    fn test_deserialize_minimal_employee() {
        let json = r#"{
            "id": "EMP-0002",
            "employee_name": "Bilal Ahmed",
            "created_on": "2022-01-10",
            "distance_km": "12.5",
            "transport_type": "Bike"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.distance_km, Some(Decimal::new(125, 1)));
        assert_eq!(employee.transport_type, Some(TransportType::Bike));
        assert!(employee.has_commute());
    }

    #[test]
    fn test_joining_date_falls_back_to_creation() {
        let mut employee = create_test_employee();
        assert_eq!(
            employee.joining_date(),
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
        );

        employee.date_of_joining = NaiveDate::from_ymd_opt(2023, 7, 3);
        assert_eq!(
            employee.joining_date(),
            NaiveDate::from_ymd_opt(2023, 7, 3).unwrap()
        );
    }

    #[test]
    fn test_is_active() {
        let mut employee = create_test_employee();
        assert!(employee.is_active());
        employee.status = EmployeeStatus::Left;
        assert!(!employee.is_active());
    }
}
