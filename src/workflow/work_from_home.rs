//! Work from home requests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculation::overlap_days;
use crate::error::{EngineError, EngineResult};
use crate::models::{ApprovalStatus, Notification, WorkFromHome};

/// Subject of the email sent when a request is raised.
pub const WFH_REQUEST_SUBJECT: &str = "Work From Home Request";

/// Number of days a request covers.
///
/// A half day on a single-day request counts 0.5; a half-day date inside a longer
/// range takes half a day off the inclusive count.
///
/// # Examples
///
/// ```
/// use attendance_engine::workflow::number_of_wfh_days;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// assert_eq!(number_of_wfh_days(d("2024-03-04"), d("2024-03-06"), false, None), Decimal::new(3, 0));
/// assert_eq!(
///     number_of_wfh_days(d("2024-03-04"), d("2024-03-06"), true, Some(d("2024-03-05"))),
///     Decimal::new(25, 1),
/// );
/// ```
pub fn number_of_wfh_days(
    from_date: NaiveDate,
    to_date: NaiveDate,
    half_day: bool,
    half_day_date: Option<NaiveDate>,
) -> Decimal {
    let whole_days = Decimal::from(overlap_days(from_date, to_date, from_date, to_date));
    if !half_day {
        return whole_days;
    }
    if from_date == to_date {
        return Decimal::new(5, 1);
    }
    match half_day_date {
        Some(date) if date >= from_date && date <= to_date => whole_days - Decimal::new(5, 1),
        _ => whole_days,
    }
}

/// Email to the approver, copying the team lead, for a newly raised request.
///
/// Returns `None` for requests not in the Requested state or without an approver.
pub fn on_insert(request: &WorkFromHome) -> Option<Notification> {
    if request.status != ApprovalStatus::Requested {
        return None;
    }
    let Some(approver) = request.approver_id.clone() else {
        debug!(request = %request.id, "No approver set, skipping request email");
        return None;
    };

    let days = number_of_wfh_days(
        request.from_date,
        request.to_date,
        request.half_day,
        request.half_day_date,
    );
    info!(request = %request.id, approver = %approver, "Work from home request raised");

    Some(Notification::Email {
        recipients: vec![approver],
        cc: request.team_lead_id.iter().cloned().collect(),
        subject: WFH_REQUEST_SUBJECT.to_string(),
        message: format!(
            "{} has requested to work from home from {} to {} ({} days). Request: {}",
            request.employee_name, request.from_date, request.to_date, days, request.id
        ),
    })
}

/// Only decided requests may be submitted.
pub fn before_submit(request: &WorkFromHome) -> EngineResult<()> {
    match request.status {
        ApprovalStatus::Approved | ApprovalStatus::Rejected => Ok(()),
        ApprovalStatus::Requested | ApprovalStatus::Cancelled => Err(EngineError::ValidationError {
            message: "Only requests with status 'Approved' or 'Rejected' can be submitted."
                .to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocStatus;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_request(status: ApprovalStatus) -> WorkFromHome {
        WorkFromHome {
            id: "WFH-0001".to_string(),
            employee_id: "EMP-0001".to_string(),
            employee_name: "Ayesha Khan".to_string(),
            from_date: make_date("2024-03-04"),
            to_date: make_date("2024-03-05"),
            status,
            half_day: false,
            half_day_date: None,
            approver_id: Some("hr@example.com".to_string()),
            team_lead_id: Some("lead@example.com".to_string()),
            docstatus: DocStatus::Draft,
        }
    }

    #[test]
    fn test_single_half_day() {
        let date = make_date("2024-03-04");
        assert_eq!(number_of_wfh_days(date, date, true, None), Decimal::new(5, 1));
    }

    #[test]
    fn test_half_day_date_outside_range_ignored() {
        let days = number_of_wfh_days(
            make_date("2024-03-04"),
            make_date("2024-03-06"),
            true,
            Some(make_date("2024-03-10")),
        );
        assert_eq!(days, Decimal::new(3, 0));
    }

    #[test]
    fn test_on_insert_emails_approver_and_lead() {
        let notification = on_insert(&make_request(ApprovalStatus::Requested)).unwrap();
        match notification {
            Notification::Email {
                recipients,
                cc,
                subject,
                message,
            } => {
                assert_eq!(recipients, vec!["hr@example.com".to_string()]);
                assert_eq!(cc, vec!["lead@example.com".to_string()]);
                assert_eq!(subject, WFH_REQUEST_SUBJECT);
                assert!(message.contains("Ayesha Khan"));
                assert!(message.contains("(2 days)"));
            }
            other => panic!("Expected email, got {:?}", other),
        }
    }

    #[test]
    fn test_on_insert_ignores_decided_requests() {
        assert!(on_insert(&make_request(ApprovalStatus::Approved)).is_none());
    }

    #[test]
    fn test_before_submit_requires_decision() {
        assert!(before_submit(&make_request(ApprovalStatus::Approved)).is_ok());
        assert!(before_submit(&make_request(ApprovalStatus::Rejected)).is_ok());
        assert!(matches!(
            before_submit(&make_request(ApprovalStatus::Requested)),
            Err(EngineError::ValidationError { .. })
        ));
    }
}
