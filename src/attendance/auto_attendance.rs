//! Scheduled auto attendance.
//!
//! For one shift type, [`AutoAttendanceProcessor::process_shift`] turns every
//! unprocessed check-in log that the devices have finished syncing into
//! attendance, one record per employee and shift occurrence, and then marks the
//! assigned employees Absent on the remaining working days without attendance.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculation::{date_range, derive_attendance, find_occurrence, occurrence_on};
use crate::config::{ConfigLoader, ShiftTypeConfig};
use crate::error::EngineResult;
use crate::models::{CheckEvent, Employee, HolidayList, ShiftAssignment};
use crate::repository::{CheckinFilter, HrRepository};

use super::assignment::{assigned_employees, resolve_shift_name};
use super::marking::{MarkDecision, MarkOutcome, mark_absent, mark_attendance_and_link_log};

/// Counts from one auto attendance run of a shift type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    /// The processed shift type.
    pub shift_type: String,
    /// True when the shift type is not set up for auto attendance and nothing ran.
    pub skipped: bool,
    /// Attendance records created from logs.
    pub marked: usize,
    /// Shift occurrences left alone because they fell on a holiday.
    pub skipped_on_holiday: usize,
    /// Shift occurrences whose attendance was rejected and whose logs were skipped.
    pub compensated: usize,
    /// Absent records created for days without logs.
    pub absent_marked: usize,
}

/// Runs auto attendance against a repository.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::attendance::AutoAttendanceProcessor;
/// use attendance_engine::config::ConfigLoader;
/// use attendance_engine::repository::InMemoryRepository;
///
/// let config = ConfigLoader::load("./config/default")?;
/// let repository = InMemoryRepository::default();
/// let processor = AutoAttendanceProcessor::new(&config, &repository);
/// for summary in processor.process_all_shifts()? {
///     println!("{}: {} marked", summary.shift_type, summary.marked);
/// }
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
pub struct AutoAttendanceProcessor<'a> {
    config: &'a ConfigLoader,
    repository: &'a dyn HrRepository,
}

impl<'a> AutoAttendanceProcessor<'a> {
    /// Creates a processor over the given configuration and repository.
    pub fn new(config: &'a ConfigLoader, repository: &'a dyn HrRepository) -> Self {
        Self { config, repository }
    }

    /// Processes every shift type with auto attendance enabled, ordered by name.
    pub fn process_all_shifts(&self) -> EngineResult<Vec<ProcessingSummary>> {
        self.config
            .auto_attendance_shift_types()
            .into_iter()
            .map(|shift| self.process_shift(&shift.name))
            .collect()
    }

    /// Processes one shift type.
    ///
    /// # Errors
    ///
    /// Returns `ShiftTypeNotFound` for an unknown shift type and propagates store
    /// failures. Rejected attendance is compensated and counted instead.
    pub fn process_shift(&self, shift_name: &str) -> EngineResult<ProcessingSummary> {
        let shift = self.config.get_shift_type(shift_name)?;
        let mut summary = ProcessingSummary {
            shift_type: shift.name.clone(),
            ..Default::default()
        };

        let (Some(process_after), true) =
            (shift.process_attendance_after, shift.enable_auto_attendance)
        else {
            info!(
                shift = %shift.name,
                auto_attendance = shift.enable_auto_attendance,
                process_attendance_after = ?shift.process_attendance_after,
                last_sync_of_checkin = ?shift.last_sync_of_checkin,
                "Skipping shift"
            );
            summary.skipped = true;
            return Ok(summary);
        };

        let employees: BTreeMap<String, Employee> = self
            .repository
            .list_employees()?
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();
        let assignments = self.repository.list_shift_assignments()?;

        for ((employee_id, _), logs) in self.pending_groups(shift, process_after)? {
            let Some(first) = logs.first() else {
                continue;
            };
            let attendance_date = first.attendance_date();

            if !self.should_mark_attendance(shift, employees.get(&employee_id), attendance_date)? {
                info!(employee = %employee_id, date = %attendance_date, "Skipping attendance due to holiday");
                summary.skipped_on_holiday += 1;
                continue;
            }

            let decision = match derive_attendance(shift, &logs) {
                Some(result) => MarkDecision::Mark(result),
                None => MarkDecision::Skip,
            };
            match mark_attendance_and_link_log(
                self.repository,
                &logs,
                decision,
                attendance_date,
                &shift.name,
            )? {
                MarkOutcome::Marked { .. } => summary.marked += 1,
                MarkOutcome::Compensated { .. } => summary.compensated += 1,
                MarkOutcome::Skipped => {}
            }
        }

        if let Some(last_sync) = shift.last_sync_of_checkin {
            let employee_list: Vec<Employee> = employees.values().cloned().collect();
            for employee_id in
                assigned_employees(&shift.name, Some(process_after), &employee_list, &assignments)
            {
                let Some(employee) = employees.get(&employee_id) else {
                    continue;
                };
                summary.absent_marked += self.mark_absent_for_dates_with_no_attendance(
                    shift,
                    employee,
                    &assignments,
                    process_after,
                    last_sync,
                )?;
            }
        }

        info!(
            shift = %shift.name,
            marked = summary.marked,
            skipped_on_holiday = summary.skipped_on_holiday,
            compensated = summary.compensated,
            absent_marked = summary.absent_marked,
            "Auto attendance processed"
        );
        Ok(summary)
    }

    /// Unprocessed logs of the shift grouped by employee and shift occurrence start.
    fn pending_groups(
        &self,
        shift: &ShiftTypeConfig,
        process_after: NaiveDate,
    ) -> EngineResult<BTreeMap<(String, NaiveDateTime), Vec<CheckEvent>>> {
        // Without a sync time no occurrence is known to be complete.
        let Some(last_sync) = shift.last_sync_of_checkin else {
            return Ok(BTreeMap::new());
        };

        let filter = CheckinFilter {
            shift_type: Some(shift.name.clone()),
            unprocessed_only: true,
            time_from: process_after.and_hms_opt(0, 0, 0),
            shift_actual_end_before: last_sync.date().and_hms_opt(0, 0, 0),
            ..Default::default()
        };

        let mut groups: BTreeMap<(String, NaiveDateTime), Vec<CheckEvent>> = BTreeMap::new();
        for event in self
            .repository
            .list_checkins(&filter)?
            .iter()
            .filter_map(|checkin| checkin.to_event())
        {
            groups
                .entry((event.employee_id.clone(), event.shift_start))
                .or_default()
                .push(event);
        }
        Ok(groups)
    }

    /// Holiday list for an employee under this shift: the shift's own, else the employee's.
    fn holiday_list(
        &self,
        shift: &ShiftTypeConfig,
        employee: Option<&Employee>,
    ) -> EngineResult<Option<HolidayList>> {
        let name = shift
            .holiday_list
            .as_deref()
            .or_else(|| employee.and_then(|e| e.holiday_list.as_deref()));
        match name {
            Some(name) => self.repository.get_holiday_list(name),
            None => Ok(None),
        }
    }

    fn should_mark_attendance(
        &self,
        shift: &ShiftTypeConfig,
        employee: Option<&Employee>,
        date: NaiveDate,
    ) -> EngineResult<bool> {
        if shift.mark_auto_attendance_on_holidays {
            return Ok(true);
        }
        let holidays = self.holiday_list(shift, employee)?;
        Ok(!holidays.is_some_and(|list| list.is_holiday(date)))
    }

    /// Last date absent marking may cover for an employee.
    ///
    /// Absentees are only marked for shifts that ended at least a day before the
    /// shift containing the last sync, so manual attendance still has time to
    /// arrive. The employee's most recent shift before that point, searched back to
    /// `floor`, must be this shift type.
    fn absent_window_end(
        &self,
        shift: &ShiftTypeConfig,
        employee: &Employee,
        assignments: &[ShiftAssignment],
        last_sync: NaiveDateTime,
        floor: NaiveDate,
    ) -> Option<NaiveDate> {
        let current = find_occurrence(shift, last_sync)
            .unwrap_or_else(|| occurrence_on(shift, last_sync.date()));
        let reference = current.actual_end - Duration::days(1);

        let mut date = reference.date();
        let latest = loop {
            if date < floor {
                break None;
            }
            if let Some(name) = resolve_shift_name(employee, assignments, date) {
                let started = match self.config.get_shift_type(&name) {
                    Ok(resolved) => occurrence_on(resolved, date).start <= reference,
                    Err(_) => true,
                };
                if started {
                    break Some((name, date));
                }
            }
            date = date.pred_opt()?;
        };

        match latest {
            Some((name, date)) if name == shift.name => Some(
                employee
                    .relieving_date
                    .map_or(date, |relieving| date.min(relieving)),
            ),
            _ => None,
        }
    }

    fn mark_absent_for_dates_with_no_attendance(
        &self,
        shift: &ShiftTypeConfig,
        employee: &Employee,
        assignments: &[ShiftAssignment],
        process_after: NaiveDate,
        last_sync: NaiveDateTime,
    ) -> EngineResult<usize> {
        let start = process_after.max(employee.joining_date());
        let Some(end) = self.absent_window_end(shift, employee, assignments, last_sync, start)
        else {
            debug!(employee = %employee.id, shift = %shift.name, "No shift found before last sync");
            return Ok(0);
        };

        let holidays: BTreeSet<NaiveDate> = self
            .holiday_list(shift, Some(employee))?
            .map(|list| list.holiday_dates_between(start, end, false))
            .unwrap_or_default()
            .into_iter()
            .collect();
        let marked: BTreeSet<NaiveDate> = self
            .repository
            .list_attendance(&employee.id, start, end)?
            .into_iter()
            .filter(|a| a.docstatus.is_live())
            .filter(|a| a.shift.as_deref().is_none_or(|s| s == shift.name))
            .map(|a| a.attendance_date)
            .collect();

        let dates: Vec<NaiveDate> = date_range(start, end)
            .into_iter()
            .filter(|d| !holidays.contains(d) && !marked.contains(d))
            .collect();
        debug!(employee = %employee.id, start = %start, end = %end, dates = dates.len(), "Absent candidate dates");

        // Same cutoff as the pending logs: occurrences still open at the sync date
        // may yet receive their logs.
        let Some(cutoff) = last_sync.date().and_hms_opt(0, 0, 0) else {
            return Ok(0);
        };

        let mut count = 0;
        for date in dates {
            if resolve_shift_name(employee, assignments, date).as_deref() != Some(shift.name.as_str()) {
                continue;
            }
            if occurrence_on(shift, date).actual_end >= cutoff {
                debug!(employee = %employee.id, date = %date, "Shift not yet closed, absent deferred");
                continue;
            }
            if mark_absent(self.repository, &employee.id, date, &shift.name)?.is_some() {
                count += 1;
            }
        }
        Ok(count)
    }
}
