//! Document workflows around attendance.
//!
//! Each workflow validates or reacts to one kind of HR document through an
//! [`HrRepository`](crate::repository::HrRepository) and returns any outbound
//! messages as [`Notification`](crate::models::Notification) values.

mod allowances;
mod checkin;
mod project_assignment;
mod reimbursement;
mod reminders;
mod work_from_home;

pub use allowances::calculate_monthly_fuel_allowances;
pub use checkin::{
    DevicePunch, add_log_from_device, record_checkin, resolve_occurrence, validate_checkin,
};
pub use project_assignment::validate_project_assignment;
pub use reimbursement::{
    apply_medical_claim, on_cancel as on_reimbursement_cancel,
    on_submit as on_reimbursement_submit, reset_medical_allowances, revert_medical_claim,
};
pub use reminders::{
    ACCESS_EXPIRY_TITLE, CHECKIN_REMINDER_MESSAGE, CHECKIN_REMINDER_TITLE,
    CHECKOUT_REMINDER_MESSAGE, CHECKOUT_REMINDER_TITLE, access_expiry_alerts, checkin_reminders,
    checkout_reminders, minutes_since,
};
pub use work_from_home::{
    WFH_REQUEST_SUBJECT, before_submit as before_wfh_submit, number_of_wfh_days,
    on_insert as on_wfh_insert,
};
