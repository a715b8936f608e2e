// src/services/registry_service_tests.rs
//
// REGISTRY SCENARIO TESTS
//
// PURPOSE:
// - Exercise the full application lifecycle end to end
// - Prove the failure semantics: failed operations mutate nothing
// - Prove write-through persistence round-trips losslessly
//
// INVARIANTS TESTED:
// - submit yields a pending application assigned to a real admin
// - history grows by exactly one entry per mutating call
// - a declined renewal reverts to active without a rejection reason
// - submission with an empty admin pool creates nothing

#[cfg(test)]
mod lifecycle_tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use crate::domain::application::{ApplicationStatus, HistoryAction, LICENSE_VALIDITY_DAYS};
    use crate::domain::document::DocumentStatus;
    use crate::domain::user::{Role, User};
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::repositories::{
        ApplicationRepository, InMemoryApplicationRepository, InMemoryUserRepository,
        UserRepository,
    };
    use crate::services::assignment::{RoundRobinPolicy, UniformRandomPolicy};
    use crate::services::registry_service::{RegistryService, SubmitApplicationRequest};
    use crate::services::session_service::SessionService;
    use crate::store::{BlobStore, MemoryBlobStore, MockBlobStore, KEY_APPLICATIONS, KEY_USERS};

    struct Fixture {
        user_repo: Arc<InMemoryUserRepository>,
        application_repo: Arc<InMemoryApplicationRepository>,
        store: Arc<MemoryBlobStore>,
        session: Arc<SessionService>,
        registry: RegistryService,
        admins: Vec<User>,
        vendor: User,
    }

    fn account(name: &str, email: &str, role: Role, business_type: &str) -> User {
        let mut user = User::new(
            name.to_string(),
            email.to_string(),
            "password123".to_string(),
            "9876501234".to_string(),
            business_type.to_string(),
        );
        user.role = role;
        user
    }

    fn fixture_with_admins(admin_count: usize) -> Fixture {
        let user_repo = Arc::new(InMemoryUserRepository::new());
        let application_repo = Arc::new(InMemoryApplicationRepository::new());
        let store = Arc::new(MemoryBlobStore::new());
        let event_bus = Arc::new(EventBus::new());

        let admins: Vec<User> = (0..admin_count)
            .map(|i| {
                let admin = account(
                    &format!("Admin {}", i + 1),
                    &format!("admin{}@example.com", i + 1),
                    Role::Admin,
                    "admin",
                );
                user_repo.save(&admin).unwrap();
                admin
            })
            .collect();

        let vendor = account("Arun Balaji", "arun@example.com", Role::User, "street_vendor");
        user_repo.save(&vendor).unwrap();

        let session = Arc::new(SessionService::new(
            user_repo.clone(),
            store.clone(),
            event_bus.clone(),
        ));
        let registry = RegistryService::new(
            user_repo.clone(),
            application_repo.clone(),
            Arc::new(RoundRobinPolicy::new()),
            session.clone(),
            store.clone(),
            event_bus,
        );

        Fixture {
            user_repo,
            application_repo,
            store,
            session,
            registry,
            admins,
            vendor,
        }
    }

    fn street_vendor_request() -> SubmitApplicationRequest {
        SubmitApplicationRequest {
            license_type: "street_vendor".to_string(),
            documents: vec!["identity_proof.pdf".to_string(), "address_proof.pdf".to_string()],
        }
    }

    fn login_admin(fx: &Fixture) -> Uuid {
        let admin = &fx.admins[0];
        fx.session
            .authenticate(&admin.email, "password123")
            .unwrap()
            .expect("admin credentials");
        admin.id
    }

    // Scenario A: submission lands pending with a real assignee
    #[test]
    fn test_submit_yields_pending_assigned_to_admin() {
        let fx = fixture_with_admins(3);
        let before = fx.registry.documents_for_user(fx.vendor.id).unwrap().len();

        let app = fx
            .registry
            .submit(fx.vendor.id, street_vendor_request())
            .unwrap();

        assert_eq!(app.status, ApplicationStatus::Pending);
        assert!(fx.admins.iter().any(|a| a.id == app.current_admin));

        let docs = fx.registry.documents_for_user(fx.vendor.id).unwrap();
        assert_eq!(docs.len(), before + 1);
        assert_eq!(docs[0].id, app.id);
        assert_eq!(docs[0].status, DocumentStatus::Pending);
    }

    #[test]
    fn test_submit_with_random_policy_stays_in_pool() {
        let fx = fixture_with_admins(3);
        let registry = RegistryService::new(
            fx.user_repo.clone(),
            fx.application_repo.clone(),
            Arc::new(UniformRandomPolicy::new()),
            fx.session.clone(),
            fx.store.clone(),
            Arc::new(EventBus::new()),
        );

        for _ in 0..10 {
            let app = registry.submit(fx.vendor.id, street_vendor_request()).unwrap();
            assert!(fx.admins.iter().any(|a| a.id == app.current_admin));
        }
    }

    // Scenario B: approval stamps the acting admin and a one-year window
    #[test]
    fn test_approve_records_admin_and_expiry() {
        let fx = fixture_with_admins(2);
        let app = fx
            .registry
            .submit(fx.vendor.id, street_vendor_request())
            .unwrap();
        let admin_id = login_admin(&fx);

        let approved = fx
            .registry
            .approve(app.id, Some("ok".to_string()))
            .unwrap();

        assert_eq!(approved.status, ApplicationStatus::Approved);
        assert_eq!(approved.approved_by, Some(admin_id));
        let approval = approved.approval_date.unwrap();
        assert_eq!(
            approved.expiry_date.unwrap(),
            approval + chrono::Duration::days(LICENSE_VALIDITY_DAYS)
        );
        assert_eq!(
            approved.history.last().unwrap().comments.as_deref(),
            Some("ok")
        );

        let doc = fx.registry.document_for_application(app.id).unwrap();
        assert_eq!(doc.status, DocumentStatus::Approved);
        assert_eq!(doc.verified_by, Some(admin_id));
    }

    // Scenario C: a declined renewal keeps the license active
    #[test]
    fn test_renewal_rejection_reverts_to_active() {
        let fx = fixture_with_admins(2);
        let app = fx
            .registry
            .submit(fx.vendor.id, street_vendor_request())
            .unwrap();
        login_admin(&fx);
        fx.registry.approve(app.id, Some("ok".to_string())).unwrap();

        fx.session
            .authenticate(&fx.vendor.email, "password123")
            .unwrap()
            .expect("vendor credentials");
        let renewed = fx.registry.renew(app.id).unwrap();
        assert_eq!(renewed.status, ApplicationStatus::RenewalPending);

        login_admin(&fx);
        let declined = fx
            .registry
            .reject(app.id, "missing doc".to_string())
            .unwrap();

        assert_eq!(declined.status, ApplicationStatus::Active);
        assert!(declined.rejection_reason.is_none());
        let last = declined.history.last().unwrap();
        assert_eq!(last.action, HistoryAction::RenewalRejected);
        assert_eq!(last.reason.as_deref(), Some("missing doc"));
    }

    // Scenario D: no admins, no application
    #[test]
    fn test_submit_without_admins_creates_nothing() {
        let fx = fixture_with_admins(0);

        let result = fx.registry.submit(fx.vendor.id, street_vendor_request());

        assert!(matches!(result, Err(AppError::NoAdminAvailable)));
        assert!(fx.application_repo.list_all().unwrap().is_empty());
        assert!(fx.registry.documents_for_user(fx.vendor.id).unwrap().is_empty());
    }

    #[test]
    fn test_history_grows_by_one_per_mutation() {
        let fx = fixture_with_admins(2);
        let app = fx
            .registry
            .submit(fx.vendor.id, street_vendor_request())
            .unwrap();
        assert_eq!(app.history.len(), 1);

        login_admin(&fx);
        let approved = fx.registry.approve(app.id, None).unwrap();
        assert_eq!(approved.history.len(), 2);

        let renewed = fx.registry.renew(app.id).unwrap();
        assert_eq!(renewed.history.len(), 3);
        assert_eq!(
            renewed.history.iter().map(|h| h.date).collect::<Vec<_>>(),
            {
                let mut dates: Vec<_> = renewed.history.iter().map(|h| h.date).collect();
                dates.sort();
                dates
            }
        );

        let settled = fx.registry.approve(app.id, None).unwrap();
        assert_eq!(settled.history.len(), 4);
        assert_eq!(settled.history[0].action, HistoryAction::Submitted);
    }

    #[test]
    fn test_unknown_ids_fail_fast() {
        let fx = fixture_with_admins(1);
        login_admin(&fx);

        assert!(matches!(
            fx.registry.submit(Uuid::new_v4(), street_vendor_request()),
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            fx.registry.approve(Uuid::new_v4(), None),
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            fx.registry.reject(Uuid::new_v4(), "why".to_string()),
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            fx.registry.renew(Uuid::new_v4()),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_validation_failures() {
        let fx = fixture_with_admins(1);
        let blank = SubmitApplicationRequest {
            license_type: "  ".to_string(),
            documents: vec![],
        };
        assert!(matches!(
            fx.registry.submit(fx.vendor.id, blank),
            Err(AppError::Validation(_))
        ));

        let app = fx
            .registry
            .submit(fx.vendor.id, street_vendor_request())
            .unwrap();
        login_admin(&fx);
        assert!(matches!(
            fx.registry.reject(app.id, "   ".to_string()),
            Err(AppError::Validation(_))
        ));
        // Nothing was recorded against the application
        assert_eq!(fx.registry.application(app.id).unwrap().history.len(), 1);
    }

    #[test]
    fn test_mutations_require_a_session() {
        let fx = fixture_with_admins(1);
        let app = fx
            .registry
            .submit(fx.vendor.id, street_vendor_request())
            .unwrap();

        assert!(matches!(
            fx.registry.approve(app.id, None),
            Err(AppError::NotAuthenticated)
        ));
        assert_eq!(
            fx.registry.application(app.id).unwrap().status,
            ApplicationStatus::Pending
        );
    }

    #[test]
    fn test_review_queue_shows_assigned_work() {
        let fx = fixture_with_admins(1);
        let app = fx
            .registry
            .submit(fx.vendor.id, street_vendor_request())
            .unwrap();
        login_admin(&fx);

        let queue = fx.registry.review_queue().unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, app.id);

        fx.registry.approve(app.id, None).unwrap();
        assert!(fx.registry.review_queue().unwrap().is_empty());
    }

    // Round-trip: the persisted snapshot reproduces the collections
    #[test]
    fn test_persisted_snapshot_round_trips() {
        let fx = fixture_with_admins(2);
        let app = fx
            .registry
            .submit(fx.vendor.id, street_vendor_request())
            .unwrap();
        login_admin(&fx);
        fx.registry.approve(app.id, Some("ok".to_string())).unwrap();

        let users_blob = fx.store.get(KEY_USERS).unwrap().unwrap();
        let apps_blob = fx.store.get(KEY_APPLICATIONS).unwrap().unwrap();

        let restored_users: Vec<crate::domain::User> =
            serde_json::from_str(&users_blob).unwrap();
        let restored_apps: Vec<crate::domain::Application> =
            serde_json::from_str(&apps_blob).unwrap();

        assert_eq!(
            serde_json::to_value(&restored_users).unwrap(),
            serde_json::to_value(fx.user_repo.list_all().unwrap()).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&restored_apps).unwrap(),
            serde_json::to_value(fx.application_repo.list_all().unwrap()).unwrap()
        );
        // Optional fields absent on the wire until set
        assert!(!apps_blob.contains("rejectionReason"));
        assert!(apps_blob.contains("expiryDate"));
    }

    // Storage failures are swallowed; the registry keeps serving memory
    #[test]
    fn test_storage_failure_does_not_block_mutations() {
        let user_repo = Arc::new(InMemoryUserRepository::new());
        let application_repo = Arc::new(InMemoryApplicationRepository::new());
        let event_bus = Arc::new(EventBus::new());

        let admin = account("Admin 1", "admin1@example.com", Role::Admin, "admin");
        user_repo.save(&admin).unwrap();
        let vendor = account("Arun Balaji", "arun@example.com", Role::User, "street_vendor");
        user_repo.save(&vendor).unwrap();

        let mut failing_store = MockBlobStore::new();
        failing_store.expect_set_many().returning(|_| {
            Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        });
        failing_store.expect_set().returning(|_, _| {
            Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        });
        let store: Arc<dyn BlobStore> = Arc::new(failing_store);

        let session = Arc::new(SessionService::new(
            user_repo.clone(),
            store.clone(),
            event_bus.clone(),
        ));
        let registry = RegistryService::new(
            user_repo,
            application_repo.clone(),
            Arc::new(RoundRobinPolicy::new()),
            session,
            store,
            event_bus,
        );

        let app = registry
            .submit(vendor.id, street_vendor_request())
            .unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(application_repo.list_all().unwrap().len(), 1);
    }
}
