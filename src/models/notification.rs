//! Outbound notifications, comments and access assignment alerts.
//!
//! The engine never delivers messages itself; workflows return [`Notification`]
//! values and the caller hands them to a mailer or push service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A message the caller should deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum Notification {
    /// An email.
    Email {
        /// Primary recipients.
        recipients: Vec<String>,
        /// Carbon-copy recipients.
        cc: Vec<String>,
        /// Subject line.
        subject: String,
        /// Body.
        message: String,
    },
    /// A mobile push notification.
    Push {
        /// User the push is addressed to.
        user: String,
        /// Title.
        title: String,
        /// Body.
        message: String,
    },
    /// A private note shown on the user's dashboard.
    Note {
        /// Owner of the note.
        owner: String,
        /// Title.
        title: String,
        /// Body.
        content: String,
    },
    /// An informational message for the user who triggered the workflow.
    Message {
        /// Body.
        message: String,
    },
}

/// A comment attached to a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Kind of document the comment belongs to (e.g. "Attendance").
    pub reference_doctype: String,
    /// Identifier of the document.
    pub reference_name: String,
    /// Comment text.
    pub content: String,
}

impl Comment {
    /// Creates a comment on an attendance record.
    pub fn on_attendance(attendance_id: &str, content: impl Into<String>) -> Self {
        Self {
            reference_doctype: "Attendance".to_string(),
            reference_name: attendance_id.to_string(),
            content: content.into(),
        }
    }

    /// Creates a comment on a check-in log.
    pub fn on_checkin(checkin_id: &str, content: impl Into<String>) -> Self {
        Self {
            reference_doctype: "Employee Checkin".to_string(),
            reference_name: checkin_id.to_string(),
            content: content.into(),
        }
    }
}

/// State of a tool access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessStatus {
    /// Access is granted.
    Active,
    /// Access has lapsed.
    Expired,
}

/// Access to a tool granted to an employee for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessAssignment {
    /// Identifier.
    pub id: String,
    /// The tool.
    pub tool_name: String,
    /// Name of the employee holding access.
    pub employee_name: String,
    /// Project the access was granted for.
    pub project_name: String,
    /// User accountable for the access risk.
    pub risk_owner: String,
    /// User holding the access.
    pub user: String,
    /// Date access lapses.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Current state.
    pub status: AccessStatus,
}
