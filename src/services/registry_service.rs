// src/services/registry_service.rs
//
// The Application Registry.
//
// Owns the application collection and its workflow: submit, renew,
// approve, reject, plus read-side queries. Every mutation runs to
// completion, appends exactly one history entry, and is persisted
// write-through before the call returns. Actor attribution comes from the
// session provider.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::application::{validate_application, Application};
use crate::domain::document::{document_for, documents_for, DocumentRecord};
use crate::error::{AppError, AppResult};
use crate::events::{
    ApplicationApproved, ApplicationRejected, ApplicationSubmitted, EventBus, RenewalRequested,
};
use crate::repositories::{ApplicationRepository, UserRepository};
use crate::services::assignment::AssignmentPolicy;
use crate::services::session_service::SessionService;
use crate::store::{BlobStore, KEY_APPLICATIONS, KEY_USERS};

#[derive(Debug, Clone)]
pub struct SubmitApplicationRequest {
    pub license_type: String,
    /// Uploaded document filenames (names only)
    pub documents: Vec<String>,
}

pub struct RegistryService {
    user_repo: Arc<dyn UserRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    assignment: Arc<dyn AssignmentPolicy>,
    session: Arc<SessionService>,
    store: Arc<dyn BlobStore>,
    event_bus: Arc<EventBus>,
}

impl RegistryService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        assignment: Arc<dyn AssignmentPolicy>,
        session: Arc<SessionService>,
        store: Arc<dyn BlobStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            user_repo,
            application_repo,
            assignment,
            session,
            store,
            event_bus,
        }
    }

    /// Submit a new license application for a user.
    ///
    /// All fallible checks run before anything is stored, so a failed
    /// submission leaves no application behind.
    pub fn submit(&self, user_id: Uuid, request: SubmitApplicationRequest) -> AppResult<Application> {
        if !self.user_repo.exists(user_id)? {
            return Err(AppError::NotFound);
        }
        if request.license_type.trim().is_empty() {
            return Err(AppError::Validation(
                "license type is required".to_string(),
            ));
        }

        let assigned_admin = self.draw_admin()?;
        let application = Application::new(
            user_id,
            request.license_type,
            request.documents,
            assigned_admin,
        );
        validate_application(&application).map_err(AppError::Domain)?;

        self.application_repo.save(&application)?;
        self.persist();

        log::info!(
            "application {} submitted by {} (assigned to {})",
            application.id,
            user_id,
            assigned_admin
        );
        self.event_bus.emit(ApplicationSubmitted::new(
            application.id,
            user_id,
            application.license_type.clone(),
            assigned_admin,
        ));
        Ok(application)
    }

    /// Move an approved or active license back into review, redrawing the
    /// responsible admin.
    pub fn renew(&self, application_id: Uuid) -> AppResult<Application> {
        let mut application = self.require(application_id)?;
        let actor = self.current_actor()?;
        let assigned_admin = self.draw_admin()?;

        application
            .request_renewal(actor, assigned_admin)
            .map_err(AppError::Domain)?;

        self.application_repo.save(&application)?;
        self.persist();

        log::info!(
            "renewal requested for {} (reassigned to {})",
            application.id,
            assigned_admin
        );
        self.event_bus.emit(RenewalRequested::new(
            application.id,
            actor,
            assigned_admin,
        ));
        Ok(application)
    }

    /// Approve a pending application or a pending renewal.
    pub fn approve(&self, application_id: Uuid, comments: Option<String>) -> AppResult<Application> {
        let mut application = self.require(application_id)?;
        let actor = self.current_actor()?;
        let renewal = application.status == crate::domain::ApplicationStatus::RenewalPending;

        application.approve(actor, comments).map_err(AppError::Domain)?;

        self.application_repo.save(&application)?;
        self.persist();

        log::info!("application {} approved by {}", application.id, actor);
        self.event_bus
            .emit(ApplicationApproved::new(application.id, actor, renewal));
        Ok(application)
    }

    /// Reject a pending application, or decline a pending renewal without
    /// touching the underlying license.
    pub fn reject(&self, application_id: Uuid, reason: String) -> AppResult<Application> {
        if reason.trim().is_empty() {
            return Err(AppError::Validation(
                "a rejection reason is required".to_string(),
            ));
        }

        let mut application = self.require(application_id)?;
        let actor = self.current_actor()?;
        let renewal = application.status == crate::domain::ApplicationStatus::RenewalPending;

        application
            .reject(actor, reason.clone())
            .map_err(AppError::Domain)?;

        self.application_repo.save(&application)?;
        self.persist();

        log::info!("application {} rejected by {}", application.id, actor);
        self.event_bus.emit(ApplicationRejected::new(
            application.id,
            actor,
            reason,
            renewal,
        ));
        Ok(application)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn application(&self, application_id: Uuid) -> AppResult<Application> {
        self.require(application_id)
    }

    pub fn applications_for_user(&self, user_id: Uuid) -> AppResult<Vec<Application>> {
        self.application_repo.list_by_user(user_id)
    }

    /// Applications awaiting the current admin actor
    pub fn review_queue(&self) -> AppResult<Vec<Application>> {
        let actor = self.current_actor()?;
        self.application_repo.list_awaiting_admin(actor)
    }

    /// Derived document record for one application
    pub fn document_for_application(&self, application_id: Uuid) -> AppResult<DocumentRecord> {
        Ok(document_for(&self.require(application_id)?))
    }

    /// A user's document list, derived from their applications on read
    pub fn documents_for_user(&self, user_id: Uuid) -> AppResult<Vec<DocumentRecord>> {
        let applications = self.application_repo.list_by_user(user_id)?;
        Ok(documents_for(user_id, &applications))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require(&self, application_id: Uuid) -> AppResult<Application> {
        self.application_repo
            .get_by_id(application_id)?
            .ok_or(AppError::NotFound)
    }

    fn current_actor(&self) -> AppResult<Uuid> {
        self.session
            .current_user_id()
            .ok_or(AppError::NotAuthenticated)
    }

    fn draw_admin(&self) -> AppResult<Uuid> {
        let pool: Vec<Uuid> = self
            .user_repo
            .list_admins()?
            .into_iter()
            .map(|admin| admin.id)
            .collect();
        self.assignment
            .pick_assignee(&pool)
            .ok_or(AppError::NoAdminAvailable)
    }

    /// Write-through snapshot of both collections in one storage
    /// transaction. Storage failures are logged and swallowed; the
    /// registry keeps serving from memory.
    fn persist(&self) {
        let (users, applications) = match (
            self.user_repo.list_all(),
            self.application_repo.list_all(),
        ) {
            (Ok(users), Ok(applications)) => (users, applications),
            _ => {
                log::warn!("failed to read collections for persistence");
                return;
            }
        };
        let entries = match (
            serde_json::to_string(&users),
            serde_json::to_string(&applications),
        ) {
            (Ok(users_json), Ok(apps_json)) => vec![
                (KEY_USERS.to_string(), users_json),
                (KEY_APPLICATIONS.to_string(), apps_json),
            ],
            _ => {
                log::warn!("failed to serialize collections for persistence");
                return;
            }
        };
        if let Err(e) = self.store.set_many(&entries) {
            log::warn!("failed to persist registry snapshot: {}", e);
        }
    }
}
