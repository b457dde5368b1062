//! Monthly fuel allowance run.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::calculation::{
    average_fuel_delta, calculate_fuel_allowance, clamp_fuel_allowance, commute_days,
    previous_month,
};
use crate::config::AllowancePolicy;
use crate::error::EngineResult;
use crate::models::FuelAllowanceRecord;
use crate::repository::HrRepository;

/// Computes and stores the fuel allowance of every commuting employee for the month
/// before `today`.
///
/// The record month is the last day of that month. Employees who are inactive or
/// lack a distance or vehicle are skipped.
pub fn calculate_monthly_fuel_allowances(
    repository: &dyn HrRepository,
    policy: &AllowancePolicy,
    today: NaiveDate,
) -> EngineResult<Vec<FuelAllowanceRecord>> {
    let (start, end) = previous_month(today);
    let prices = repository.list_fuel_prices(start, end)?;
    let average_delta = average_fuel_delta(&prices, start, end);

    let holiday_count = match &policy.holiday_list {
        Some(name) => repository
            .get_holiday_list(name)?
            .map(|list| list.holiday_dates_between(start, end, false).len())
            .unwrap_or(0),
        None => 0,
    };
    debug!(%start, %end, %average_delta, holiday_count, "Fuel allowance period");

    let mut records = Vec::new();
    for employee in repository.list_employees()? {
        if !employee.is_active() {
            continue;
        }
        let Some(distance) = employee.distance_km.filter(|_| employee.has_commute()) else {
            continue;
        };

        let leaves = repository.list_leave_applications(&employee.id)?;
        let work_from_home = repository.list_work_from_home(&employee.id)?;
        let days = commute_days(start, end, holiday_count, &leaves, &work_from_home);
        let amount = calculate_fuel_allowance(
            distance,
            days,
            policy.mileage_for(employee.transport_type),
            average_delta,
        );

        let record = FuelAllowanceRecord {
            employee_id: employee.id.clone(),
            allowance_amount: clamp_fuel_allowance(amount, policy),
            fuel_allowance_month: end,
        };
        debug!(
            employee = %employee.id,
            commute_days = days,
            amount = %record.allowance_amount,
            "Fuel allowance calculated"
        );
        repository.insert_fuel_allowance(record.clone())?;
        records.push(record);
    }

    info!(month = %end, employees = records.len(), "Fuel allowances recorded");
    Ok(records)
}
