// src/services/dashboard_service.rs
//
// Presentation-facing read model: status counts for the admin dashboard,
// an admin's pending queue, and an applicant's own list with
// human-readable labels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::application::{Application, ApplicationStatus};
use crate::domain::labels::{application_label, format_license_name};
use crate::error::AppResult;
use crate::repositories::ApplicationRepository;

/// Count of applications per workflow status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub renewal_pending: usize,
    pub active: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected + self.renewal_pending + self.active
    }
}

/// One row of an applicant's dashboard list
#[derive(Debug, Clone)]
pub struct ApplicationSummary {
    pub id: Uuid,
    /// Humanized license tag, e.g. "Street Vendor"
    pub license_name: String,
    pub status: ApplicationStatus,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub submitted_at: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
}

pub struct DashboardService {
    application_repo: Arc<dyn ApplicationRepository>,
}

impl DashboardService {
    pub fn new(application_repo: Arc<dyn ApplicationRepository>) -> Self {
        Self { application_repo }
    }

    pub fn status_counts(&self) -> AppResult<StatusCounts> {
        let mut counts = StatusCounts::default();
        for app in self.application_repo.list_all()? {
            match app.status {
                ApplicationStatus::Pending => counts.pending += 1,
                ApplicationStatus::Approved => counts.approved += 1,
                ApplicationStatus::Rejected => counts.rejected += 1,
                ApplicationStatus::RenewalPending => counts.renewal_pending += 1,
                ApplicationStatus::Active => counts.active += 1,
            }
        }
        Ok(counts)
    }

    /// Flat list of one admin's pending work
    pub fn pending_queue(&self, admin_id: Uuid) -> AppResult<Vec<Application>> {
        self.application_repo.list_awaiting_admin(admin_id)
    }

    /// An applicant's own applications, labelled for display
    pub fn applicant_overview(&self, user_id: Uuid) -> AppResult<Vec<ApplicationSummary>> {
        let applications = self.application_repo.list_by_user(user_id)?;
        Ok(applications.iter().map(summarize).collect())
    }
}

fn summarize(app: &Application) -> ApplicationSummary {
    let label = application_label(app.status);
    ApplicationSummary {
        id: app.id,
        license_name: format_license_name(&app.license_type),
        status: app.status,
        status_label: label.label,
        status_color: label.color,
        submitted_at: app.submitted_at,
        expiry_date: app.expiry_date,
    }
}
