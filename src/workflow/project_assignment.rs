//! Project assignment validation.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ProjectPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::ProjectAssignment;
use crate::repository::HrRepository;

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::ValidationError {
        message: message.into(),
    }
}

/// Validates an assignment before it is saved.
///
/// Checks, in order: the date range is ordered, the project has expected dates,
/// the assignment sits inside them, the employee is not already assigned to the
/// same project in the period, and the daily hours of all overlapping effective
/// assignments stay within `policy.max_daily_hours`.
///
/// # Errors
///
/// `ValidationError` naming the first failed check, `RepositoryError` from the store.
pub fn validate_project_assignment(
    repository: &dyn HrRepository,
    assignment: &ProjectAssignment,
    policy: &ProjectPolicy,
) -> EngineResult<()> {
    if assignment.end_date < assignment.start_date {
        return Err(invalid("End Date cannot be before Start Date"));
    }

    let project = repository.get_project(&assignment.project)?;
    let (project_start, project_end) = match project
        .as_ref()
        .and_then(|p| p.expected_start_date.zip(p.expected_end_date))
    {
        Some(dates) => dates,
        None => {
            return Err(invalid(
                "Please set Expected Start Date and Expected End Date for the Project",
            ));
        }
    };
    if assignment.start_date < project_start || assignment.end_date > project_end {
        return Err(invalid("Assignment dates should be within Project dates"));
    }

    let overlapping: Vec<ProjectAssignment> = repository
        .list_project_assignments(&assignment.employee_id)?
        .into_iter()
        .filter(|other| {
            other.id != assignment.id && other.is_effective() && other.overlaps(assignment)
        })
        .collect();

    if overlapping.iter().any(|other| other.project == assignment.project) {
        return Err(invalid(
            "Employee is already assigned to a project in this period",
        ));
    }

    let booked: Decimal = overlapping
        .iter()
        .map(|other| other.allocated_hours_daily)
        .sum();
    let total = booked + assignment.allocated_hours_daily;
    debug!(
        employee = %assignment.employee_id,
        booked = %booked,
        requested = %assignment.allocated_hours_daily,
        "Checking daily project hours"
    );
    if total > policy.max_daily_hours {
        return Err(invalid(format!(
            "Overbooked - Working hours cannot exceed {} hours per day",
            policy.max_daily_hours.normalize()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentStatus, DocStatus, Project};
    use crate::repository::{HrStore, InMemoryRepository};
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_assignment(
        id: &str,
        project: &str,
        start: &str,
        end: &str,
        hours: i64,
    ) -> ProjectAssignment {
        ProjectAssignment {
            id: id.to_string(),
            employee_id: "EMP-0001".to_string(),
            project: project.to_string(),
            start_date: make_date(start),
            end_date: make_date(end),
            status: AssignmentStatus::Active,
            allocated_hours_daily: Decimal::new(hours, 0),
            allocated_hours_monthly: Decimal::new(hours * 20, 0),
            docstatus: DocStatus::Submitted,
        }
    }

    fn make_project(name: &str) -> Project {
        Project {
            name: name.to_string(),
            expected_start_date: Some(make_date("2024-01-01")),
            expected_end_date: Some(make_date("2024-12-31")),
        }
    }

    fn make_repository(existing: Vec<ProjectAssignment>) -> InMemoryRepository {
        InMemoryRepository::new(HrStore {
            projects: vec![
                make_project("Payroll Revamp"),
                make_project("Mobile App"),
                Project {
                    name: "Unscheduled".to_string(),
                    expected_start_date: None,
                    expected_end_date: None,
                },
            ],
            project_assignments: existing,
            ..Default::default()
        })
    }

    fn expect_message(result: EngineResult<()>, fragment: &str) {
        match result {
            Err(EngineError::ValidationError { message }) => assert!(
                message.contains(fragment),
                "'{}' does not contain '{}'",
                message,
                fragment
            ),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    /// PA-001: A fresh assignment within the project passes
    #[test]
    fn test_valid_assignment() {
        let repository = make_repository(vec![]);
        let assignment = create_assignment("PA-1", "Payroll Revamp", "2024-03-01", "2024-03-31", 8);
        assert!(
            validate_project_assignment(&repository, &assignment, &ProjectPolicy::default())
                .is_ok()
        );
    }

    #[test]
    fn test_end_before_start() {
        let repository = make_repository(vec![]);
        let assignment = create_assignment("PA-1", "Payroll Revamp", "2024-03-31", "2024-03-01", 4);
        expect_message(
            validate_project_assignment(&repository, &assignment, &ProjectPolicy::default()),
            "End Date cannot be before Start Date",
        );
    }

    #[test]
    fn test_project_without_dates() {
        let repository = make_repository(vec![]);
        let assignment = create_assignment("PA-1", "Unscheduled", "2024-03-01", "2024-03-31", 4);
        expect_message(
            validate_project_assignment(&repository, &assignment, &ProjectPolicy::default()),
            "Please set Expected Start Date",
        );
    }

    #[test]
    fn test_assignment_outside_project() {
        let repository = make_repository(vec![]);
        let assignment = create_assignment("PA-1", "Payroll Revamp", "2024-12-01", "2025-01-15", 4);
        expect_message(
            validate_project_assignment(&repository, &assignment, &ProjectPolicy::default()),
            "within Project dates",
        );
    }

    /// PA-002: Same project in an overlapping period is a duplicate
    #[test]
    fn test_duplicate_assignment() {
        let repository = make_repository(vec![create_assignment(
            "PA-1",
            "Payroll Revamp",
            "2024-03-01",
            "2024-03-31",
            2,
        )]);
        let assignment = create_assignment("PA-2", "Payroll Revamp", "2024-03-15", "2024-04-15", 2);
        expect_message(
            validate_project_assignment(&repository, &assignment, &ProjectPolicy::default()),
            "already assigned",
        );
    }

    /// PA-003: 6 + 3 hours on overlapping projects exceeds 8
    #[test]
    fn test_overbooked() {
        let repository = make_repository(vec![create_assignment(
            "PA-1",
            "Mobile App",
            "2024-03-01",
            "2024-03-31",
            6,
        )]);
        let assignment = create_assignment("PA-2", "Payroll Revamp", "2024-03-15", "2024-04-15", 3);
        expect_message(
            validate_project_assignment(&repository, &assignment, &ProjectPolicy::default()),
            "Overbooked - Working hours cannot exceed 8 hours per day",
        );
    }

    #[test]
    fn test_exactly_max_hours_allowed() {
        let repository = make_repository(vec![create_assignment(
            "PA-1",
            "Mobile App",
            "2024-03-01",
            "2024-03-31",
            5,
        )]);
        let assignment = create_assignment("PA-2", "Payroll Revamp", "2024-03-15", "2024-04-15", 3);
        assert!(
            validate_project_assignment(&repository, &assignment, &ProjectPolicy::default())
                .is_ok()
        );
    }

    #[test]
    fn test_ignores_drafts_and_itself() {
        let mut draft = create_assignment("PA-1", "Payroll Revamp", "2024-03-01", "2024-03-31", 8);
        draft.docstatus = DocStatus::Draft;
        let itself = create_assignment("PA-2", "Payroll Revamp", "2024-03-01", "2024-03-31", 8);
        let repository = make_repository(vec![draft, itself.clone()]);

        assert!(
            validate_project_assignment(&repository, &itself, &ProjectPolicy::default()).is_ok()
        );
    }
}
