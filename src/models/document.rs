//! Document lifecycle states shared by the workflow documents.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a submittable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// Saved but not submitted.
    #[default]
    Draft,
    /// Submitted and binding.
    Submitted,
    /// Submitted and later cancelled.
    Cancelled,
}

impl DocStatus {
    /// Returns true unless the document was cancelled.
    pub fn is_live(&self) -> bool {
        *self != DocStatus::Cancelled
    }
}

/// Approval state of a leave or work from home request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApprovalStatus {
    /// Awaiting a decision.
    #[default]
    Requested,
    /// Approved by the approver.
    Approved,
    /// Rejected by the approver.
    Rejected,
    /// Withdrawn.
    Cancelled,
}

/// Whether a shift or project assignment is in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssignmentStatus {
    /// In force.
    #[default]
    Active,
    /// No longer in force.
    Inactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_not_live() {
        assert!(DocStatus::Draft.is_live());
        assert!(DocStatus::Submitted.is_live());
        assert!(!DocStatus::Cancelled.is_live());
    }

    #[test]
    fn test_docstatus_serialization() {
        assert_eq!(
            serde_json::to_string(&DocStatus::Submitted).unwrap(),
            "\"submitted\""
        );
        let status: ApprovalStatus = serde_json::from_str("\"Approved\"").unwrap();
        assert_eq!(status, ApprovalStatus::Approved);
    }
}
