//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a workflow, repository or configuration call can report.
//! The pure calculation functions never return errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ShiftTypeNotFound {
///     name: "Night".to_string(),
/// };
/// assert_eq!(error.to_string(), "Shift type not found: Night");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Shift type was not found in the configuration.
    #[error("Shift type not found: {name}")]
    ShiftTypeNotFound {
        /// The shift type name that was not found.
        name: String,
    },

    /// Employee was not found in the repository.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: String,
    },

    /// A check-in log was rejected by validation.
    #[error("Invalid check-in for employee '{employee}': {message}")]
    InvalidCheckin {
        /// The employee the log belongs to.
        employee: String,
        /// Why the log was rejected.
        message: String,
    },

    /// An attendance record already exists for the employee on that date.
    #[error("Attendance for employee '{employee}' on {date} is already marked")]
    DuplicateAttendance {
        /// The employee id.
        employee: String,
        /// The attendance date.
        date: NaiveDate,
    },

    /// A document failed a workflow validation rule.
    #[error("Validation error: {message}")]
    ValidationError {
        /// A description of the violated rule.
        message: String,
    },

    /// A medical claim exceeds the employee's remaining balance.
    #[error(
        "Employee '{employee}' does not have enough balance to claim medical allowance: requested {requested}, available {available}"
    )]
    InsufficientBalance {
        /// The employee id.
        employee: String,
        /// The claimed amount.
        requested: Decimal,
        /// The remaining medical balance.
        available: Decimal,
    },

    /// The backing store failed.
    #[error("Repository error: {message}")]
    RepositoryError {
        /// A description of the store failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors that reject a document rather than signal a broken store.
    ///
    /// Auto attendance converts these into a skip-and-comment compensation instead of
    /// aborting the run.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::DuplicateAttendance { .. }
                | EngineError::ValidationError { .. }
                | EngineError::InvalidCheckin { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/shift_types.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/shift_types.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_duplicate_attendance_displays_employee_and_date() {
        let error = EngineError::DuplicateAttendance {
            employee: "EMP-0001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Attendance for employee 'EMP-0001' on 2024-03-04 is already marked"
        );
    }

    #[test]
    fn test_invalid_checkin_displays_employee_and_message() {
        let error = EngineError::InvalidCheckin {
            employee: "EMP-0001".to_string(),
            message: "Please add check-in first".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid check-in for employee 'EMP-0001': Please add check-in first"
        );
    }

    #[test]
    fn test_insufficient_balance_displays_amounts() {
        let error = EngineError::InsufficientBalance {
            employee: "EMP-0001".to_string(),
            requested: Decimal::new(5000, 0),
            available: Decimal::new(1200, 0),
        };
        assert!(error.to_string().contains("requested 5000, available 1200"));
    }

    #[test]
    fn test_validation_errors_are_classified() {
        assert!(
            EngineError::ValidationError {
                message: "x".to_string()
            }
            .is_validation()
        );
        assert!(
            EngineError::DuplicateAttendance {
                employee: "EMP-0001".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            }
            .is_validation()
        );
        assert!(
            !EngineError::RepositoryError {
                message: "lock poisoned".to_string()
            }
            .is_validation()
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                id: "EMP-404".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
