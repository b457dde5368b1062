//! Leave application and work from home request models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ApprovalStatus, DocStatus};

/// A leave application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Identifier.
    pub id: String,
    /// The employee on leave.
    pub employee_id: String,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave.
    pub to_date: NaiveDate,
    /// Approval state.
    #[serde(default)]
    pub status: ApprovalStatus,
    /// True for a half-day leave.
    #[serde(default)]
    pub half_day: bool,
    /// Lifecycle state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl LeaveApplication {
    /// Returns true for submitted, approved applications.
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved && self.docstatus == DocStatus::Submitted
    }

    /// Returns true for an approved full-day leave covering `date`.
    pub fn blocks_checkin_on(&self, date: NaiveDate) -> bool {
        self.status == ApprovalStatus::Approved
            && self.docstatus.is_live()
            && !self.half_day
            && self.from_date <= date
            && self.to_date >= date
    }
}

/// A work from home request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkFromHome {
    /// Identifier.
    #[serde(default)]
    pub id: String,
    /// The requesting employee.
    pub employee_id: String,
    /// Display name of the requesting employee.
    #[serde(default)]
    pub employee_name: String,
    /// First day.
    pub from_date: NaiveDate,
    /// Last day.
    pub to_date: NaiveDate,
    /// Approval state.
    #[serde(default)]
    pub status: ApprovalStatus,
    /// True when one of the days is a half day.
    #[serde(default)]
    pub half_day: bool,
    /// The half day, when `half_day` is set on a multi-day request.
    #[serde(default)]
    pub half_day_date: Option<NaiveDate>,
    /// Email of the approver.
    #[serde(default)]
    pub approver_id: Option<String>,
    /// Email of the team lead.
    #[serde(default)]
    pub team_lead_id: Option<String>,
    /// Lifecycle state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl WorkFromHome {
    /// Returns true for submitted, approved requests.
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved && self.docstatus == DocStatus::Submitted
    }
}
