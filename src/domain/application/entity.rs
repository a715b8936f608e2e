use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// An approved license stays valid for exactly one year.
pub const LICENSE_VALIDITY_DAYS: i64 = 365;

/// One license request/renewal workflow instance, owned by a user.
/// This is the single source of truth for review state; the user's
/// document list is derived from it on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Internal immutable identifier, generated at submission
    pub id: Uuid,

    /// Owning user, never reassigned
    pub user_id: Uuid,

    /// Requested license category, e.g. "street_vendor"
    pub license_type: String,

    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,

    /// Current workflow status
    pub status: ApplicationStatus,

    /// Uploaded document filenames (names only, no file storage)
    pub documents: Vec<String>,

    /// Admin presently responsible for this application.
    /// Reassigned at each renewal request.
    pub current_admin: Uuid,

    /// Append-only audit trail, in insertion order
    pub history: Vec<HistoryEntry>,

    /// Admin who approved the application or its latest renewal
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub approved_by: Option<Uuid>,

    /// When the application or its latest renewal was approved
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub approval_date: Option<DateTime<Utc>>,

    /// Always `approval_date` plus the fixed validity period
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expiry_date: Option<DateTime<Utc>>,

    /// Set only when the application itself is rejected; a declined
    /// renewal leaves this untouched
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rejection_reason: Option<String>,
}

/// Canonical workflow status.
///
/// State machine:
/// ```text
/// pending ----approve----> approved
/// pending ----reject-----> rejected            (terminal)
/// approved | active --renew--> renewal_pending
/// renewal_pending --approve--> active
/// renewal_pending --reject---> active          (renewal declined, license keeps)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    RenewalPending,
    Active,
}

/// What a history entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Submitted,
    Approved,
    Rejected,
    RenewalRequested,
    RenewalApproved,
    RenewalRejected,
}

/// One immutable audit-trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub action: HistoryAction,
    pub date: DateTime<Utc>,
    /// Acting user or admin
    pub by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

impl Application {
    /// Create a freshly submitted application with its first history entry.
    /// `current_admin` MUST come from the assignment policy (checked by caller).
    pub fn new(user_id: Uuid, license_type: String, documents: Vec<String>, current_admin: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            license_type,
            submitted_at: now,
            status: ApplicationStatus::Pending,
            documents,
            current_admin,
            history: vec![HistoryEntry {
                action: HistoryAction::Submitted,
                date: now,
                by: user_id,
                comments: None,
                reason: None,
            }],
            approved_by: None,
            approval_date: None,
            expiry_date: None,
            rejection_reason: None,
        }
    }

    /// Approve the application (or its pending renewal).
    ///
    /// From `Pending` the status becomes `Approved`; from `RenewalPending`
    /// it becomes `Active`. Either way a fresh one-year validity window
    /// starts now.
    pub fn approve(&mut self, admin_id: Uuid, comments: Option<String>) -> DomainResult<()> {
        let action = match self.status {
            ApplicationStatus::Pending => {
                self.status = ApplicationStatus::Approved;
                HistoryAction::Approved
            }
            ApplicationStatus::RenewalPending => {
                self.status = ApplicationStatus::Active;
                HistoryAction::RenewalApproved
            }
            other => {
                return Err(DomainError::InvalidStateTransition(format!(
                    "cannot approve application in status {}",
                    other
                )))
            }
        };

        let now = Utc::now();
        self.approved_by = Some(admin_id);
        self.approval_date = Some(now);
        self.expiry_date = Some(now + Duration::days(LICENSE_VALIDITY_DAYS));
        self.history.push(HistoryEntry {
            action,
            date: now,
            by: admin_id,
            comments,
            reason: None,
        });
        Ok(())
    }

    /// Reject the application, or decline its pending renewal.
    ///
    /// Rejecting from `Pending` is terminal for this id; a vendor retries
    /// by submitting a new application. Rejecting from `RenewalPending`
    /// reverts to `Active`: the existing license remains valid and
    /// `rejection_reason` stays unset.
    pub fn reject(&mut self, admin_id: Uuid, reason: String) -> DomainResult<()> {
        let action = match self.status {
            ApplicationStatus::Pending => {
                self.status = ApplicationStatus::Rejected;
                self.rejection_reason = Some(reason.clone());
                HistoryAction::Rejected
            }
            ApplicationStatus::RenewalPending => {
                self.status = ApplicationStatus::Active;
                HistoryAction::RenewalRejected
            }
            other => {
                return Err(DomainError::InvalidStateTransition(format!(
                    "cannot reject application in status {}",
                    other
                )))
            }
        };

        self.history.push(HistoryEntry {
            action,
            date: Utc::now(),
            by: admin_id,
            comments: None,
            reason: Some(reason),
        });
        Ok(())
    }

    /// Move an approved or active license back into review.
    /// The caller supplies a freshly drawn `new_admin`.
    pub fn request_renewal(&mut self, actor_id: Uuid, new_admin: Uuid) -> DomainResult<()> {
        match self.status {
            ApplicationStatus::Approved | ApplicationStatus::Active => {}
            other => {
                return Err(DomainError::InvalidStateTransition(format!(
                    "cannot renew application in status {}",
                    other
                )))
            }
        }

        self.status = ApplicationStatus::RenewalPending;
        self.current_admin = new_admin;
        self.history.push(HistoryEntry {
            action: HistoryAction::RenewalRequested,
            date: Utc::now(),
            by: actor_id,
            comments: None,
            reason: None,
        });
        Ok(())
    }

    /// True while the application sits in an admin's review queue
    pub fn awaits_review(&self) -> bool {
        matches!(
            self.status,
            ApplicationStatus::Pending | ApplicationStatus::RenewalPending
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::Approved => write!(f, "approved"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
            ApplicationStatus::RenewalPending => write!(f, "renewal_pending"),
            ApplicationStatus::Active => write!(f, "active"),
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryAction::Submitted => write!(f, "submitted"),
            HistoryAction::Approved => write!(f, "approved"),
            HistoryAction::Rejected => write!(f, "rejected"),
            HistoryAction::RenewalRequested => write!(f, "renewal_requested"),
            HistoryAction::RenewalApproved => write!(f, "renewal_approved"),
            HistoryAction::RenewalRejected => write!(f, "renewal_rejected"),
        }
    }
}
