//! In-memory repository.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AccessAssignment, AttendanceRecord, Comment, Employee, EmployeeCheckin, FuelAllowanceRecord,
    FuelPrice, HolidayList, LeaveApplication, Project, ProjectAssignment, ShiftAssignment,
    WorkFromHome,
};

use super::{CheckinFilter, HrRepository};

/// Every collection the in-memory repository holds.
///
/// Deserializable so fixtures can be loaded from JSON or YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrStore {
    /// Employees.
    pub employees: Vec<Employee>,
    /// Shift assignments.
    pub shift_assignments: Vec<ShiftAssignment>,
    /// Check-in logs.
    pub checkins: Vec<EmployeeCheckin>,
    /// Attendance records.
    pub attendance: Vec<AttendanceRecord>,
    /// Comments on documents.
    pub comments: Vec<Comment>,
    /// Holiday lists.
    pub holiday_lists: Vec<HolidayList>,
    /// Leave applications.
    pub leave_applications: Vec<LeaveApplication>,
    /// Work from home requests.
    pub work_from_home: Vec<WorkFromHome>,
    /// Projects.
    pub projects: Vec<Project>,
    /// Project assignments.
    pub project_assignments: Vec<ProjectAssignment>,
    /// Fuel prices.
    pub fuel_prices: Vec<FuelPrice>,
    /// Recorded fuel allowances.
    pub fuel_allowances: Vec<FuelAllowanceRecord>,
    /// Tool access assignments.
    pub access_assignments: Vec<AccessAssignment>,
}

/// [`HrRepository`] over an [`HrStore`] behind a read-write lock.
///
/// # Example
///
/// ```
/// use attendance_engine::repository::{HrRepository, HrStore, InMemoryRepository};
///
/// let repository = InMemoryRepository::new(HrStore::default());
/// assert!(repository.list_employees().unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: RwLock<HrStore>,
    sequence: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a repository holding `store`.
    pub fn new(store: HrStore) -> Self {
        Self {
            store: RwLock::new(store),
            sequence: AtomicU64::new(0),
        }
    }

    /// A copy of the current contents.
    pub fn snapshot(&self) -> EngineResult<HrStore> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, HrStore>> {
        self.store.read().map_err(|_| EngineError::RepositoryError {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, HrStore>> {
        self.store.write().map_err(|_| EngineError::RepositoryError {
            message: "store lock poisoned".to_string(),
        })
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{:05}", prefix, n)
    }
}

impl HrRepository for InMemoryRepository {
    fn get_employee(&self, id: &str) -> EngineResult<Employee> {
        self.read()?
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    fn find_employee_by_device_id(&self, device_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self
            .read()?
            .employees
            .iter()
            .find(|e| e.attendance_device_id.as_deref() == Some(device_id))
            .cloned())
    }

    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        let mut employees = self.read()?.employees.clone();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(employees)
    }

    fn update_employee(&self, employee: &Employee) -> EngineResult<()> {
        let mut store = self.write()?;
        let stored = store
            .employees
            .iter_mut()
            .find(|e| e.id == employee.id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                id: employee.id.clone(),
            })?;
        *stored = employee.clone();
        Ok(())
    }

    fn list_shift_assignments(&self) -> EngineResult<Vec<ShiftAssignment>> {
        Ok(self.read()?.shift_assignments.clone())
    }

    fn list_checkins(&self, filter: &CheckinFilter) -> EngineResult<Vec<EmployeeCheckin>> {
        let mut checkins: Vec<EmployeeCheckin> = self
            .read()?
            .checkins
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        checkins.sort_by(|a, b| (&a.employee_id, a.time).cmp(&(&b.employee_id, b.time)));
        Ok(checkins)
    }

    fn insert_checkin(&self, mut checkin: EmployeeCheckin) -> EngineResult<EmployeeCheckin> {
        if checkin.id.is_empty() {
            checkin.id = self.next_id("CHK");
        }
        self.write()?.checkins.push(checkin.clone());
        Ok(checkin)
    }

    fn skip_checkins(&self, checkin_ids: &[String]) -> EngineResult<()> {
        let mut store = self.write()?;
        for checkin in store
            .checkins
            .iter_mut()
            .filter(|c| checkin_ids.contains(&c.id))
        {
            checkin.skip_auto_attendance = true;
        }
        Ok(())
    }

    fn link_checkins(&self, checkin_ids: &[String], attendance_id: &str) -> EngineResult<()> {
        let mut store = self.write()?;
        for checkin in store
            .checkins
            .iter_mut()
            .filter(|c| checkin_ids.contains(&c.id))
        {
            checkin.attendance = Some(attendance_id.to_string());
        }
        Ok(())
    }

    fn insert_attendance(&self, mut record: AttendanceRecord) -> EngineResult<AttendanceRecord> {
        let mut store = self.write()?;
        let duplicate = store.attendance.iter().any(|existing| {
            existing.employee_id == record.employee_id
                && existing.attendance_date == record.attendance_date
                && existing.docstatus.is_live()
        });
        if duplicate {
            return Err(EngineError::DuplicateAttendance {
                employee: record.employee_id,
                date: record.attendance_date,
            });
        }

        if record.id.is_empty() {
            record.id = self.next_id("ATT");
        }
        store.attendance.push(record.clone());
        Ok(record)
    }

    fn list_attendance(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .read()?
            .attendance
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .filter(|a| a.attendance_date >= start && a.attendance_date <= end)
            .cloned()
            .collect())
    }

    fn add_comment(&self, comment: Comment) -> EngineResult<()> {
        self.write()?.comments.push(comment);
        Ok(())
    }

    fn list_comments(&self, reference_name: &str) -> EngineResult<Vec<Comment>> {
        Ok(self
            .read()?
            .comments
            .iter()
            .filter(|c| c.reference_name == reference_name)
            .cloned()
            .collect())
    }

    fn get_holiday_list(&self, name: &str) -> EngineResult<Option<HolidayList>> {
        Ok(self
            .read()?
            .holiday_lists
            .iter()
            .find(|list| list.name == name)
            .cloned())
    }

    fn list_leave_applications(&self, employee_id: &str) -> EngineResult<Vec<LeaveApplication>> {
        Ok(self
            .read()?
            .leave_applications
            .iter()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn list_work_from_home(&self, employee_id: &str) -> EngineResult<Vec<WorkFromHome>> {
        Ok(self
            .read()?
            .work_from_home
            .iter()
            .filter(|w| w.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn get_project(&self, name: &str) -> EngineResult<Option<Project>> {
        Ok(self.read()?.projects.iter().find(|p| p.name == name).cloned())
    }

    fn list_project_assignments(
        &self,
        employee_id: &str,
    ) -> EngineResult<Vec<ProjectAssignment>> {
        Ok(self
            .read()?
            .project_assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn list_fuel_prices(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<FuelPrice>> {
        Ok(self
            .read()?
            .fuel_prices
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .cloned()
            .collect())
    }

    fn insert_fuel_allowance(&self, record: FuelAllowanceRecord) -> EngineResult<()> {
        self.write()?.fuel_allowances.push(record);
        Ok(())
    }

    fn list_access_assignments(&self) -> EngineResult<Vec<AccessAssignment>> {
        Ok(self.read()?.access_assignments.clone())
    }
}
