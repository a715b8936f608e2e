// Derived document view.
//
// The Application is the single source of truth for review state. The
// user's personal document list is projected from it on read, never kept
// as a second mutable copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::application::{Application, ApplicationStatus};

/// Simplified review status shown in the user's document list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Completed,
    Rejected,
    RenewalPending,
}

/// A user-owned mirror of one application's review status.
/// `id` equals the application id: the two are two views of one workflow item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: Uuid,
    pub doc_type: String,
    pub application_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verified_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rejection_reason: Option<String>,
}

impl DocumentStatus {
    /// 1:1 projection of the application status; an active license shows
    /// as a completed document.
    pub fn from_application(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Pending => DocumentStatus::Pending,
            ApplicationStatus::Approved => DocumentStatus::Approved,
            ApplicationStatus::Active => DocumentStatus::Completed,
            ApplicationStatus::Rejected => DocumentStatus::Rejected,
            ApplicationStatus::RenewalPending => DocumentStatus::RenewalPending,
        }
    }
}

/// Project one application into its document record
pub fn document_for(app: &Application) -> DocumentRecord {
    DocumentRecord {
        id: app.id,
        doc_type: "license".to_string(),
        application_type: app.license_type.clone(),
        uploaded_at: app.submitted_at,
        status: DocumentStatus::from_application(app.status),
        verified_by: app.approved_by,
        rejection_reason: app.rejection_reason.clone(),
    }
}

/// Project a user's applications into their document list, in submission order
pub fn documents_for(user_id: Uuid, applications: &[Application]) -> Vec<DocumentRecord> {
    applications
        .iter()
        .filter(|app| app.user_id == user_id)
        .map(document_for)
        .collect()
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Pending => write!(f, "pending"),
            DocumentStatus::Approved => write!(f, "approved"),
            DocumentStatus::Completed => write!(f, "completed"),
            DocumentStatus::Rejected => write!(f, "rejected"),
            DocumentStatus::RenewalPending => write!(f, "renewal_pending"),
        }
    }
}
