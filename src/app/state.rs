// src/app/state.rs
//
// Composition root.
//
// Wires the store, repositories, event bus and services together, loads
// the persisted collections (seeding a demo dataset on first run), and
// resumes any persisted session.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::AppResult;
use crate::events::{
    ApplicationApproved, ApplicationRejected, ApplicationSubmitted, EventBus, RenewalRequested,
    UserRegistered,
};
use crate::repositories::{
    ApplicationRepository, InMemoryApplicationRepository, InMemoryUserRepository, UserRepository,
};
use crate::seed::{seed_applications, seed_users};
use crate::services::{
    DashboardService, RegistryService, SessionService, UniformRandomPolicy,
};
use crate::store::{
    BlobStore, MemoryBlobStore, SqliteBlobStore, KEY_APPLICATIONS, KEY_USERS,
};

/// All long-lived state, Arc-wrapped for sharing across the UI boundary.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub store: Arc<dyn BlobStore>,
    pub user_repo: Arc<dyn UserRepository>,
    pub application_repo: Arc<dyn ApplicationRepository>,
    pub session_service: Arc<SessionService>,
    pub registry_service: Arc<RegistryService>,
    pub dashboard_service: Arc<DashboardService>,
}

impl AppState {
    /// Build the full service graph over the given store.
    ///
    /// Collections are hydrated from the "users" and "applications" blobs.
    /// An empty store gets the demo dataset, which is persisted right away
    /// so the next launch finds it.
    pub fn initialize(store: Arc<dyn BlobStore>) -> AppResult<Self> {
        let event_bus = Arc::new(EventBus::new());
        register_observers(&event_bus);

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let application_repo = Arc::new(InMemoryApplicationRepository::new());

        let had_users = match load_collection(store.as_ref(), KEY_USERS)? {
            Some(users) => {
                user_repo.replace_all(users)?;
                true
            }
            None => false,
        };
        let had_applications = match load_collection(store.as_ref(), KEY_APPLICATIONS)? {
            Some(applications) => {
                application_repo.replace_all(applications)?;
                true
            }
            None => false,
        };

        if !had_users || !had_applications {
            seed_store(&*user_repo, &*application_repo, store.as_ref(), had_users)?;
        }

        let session_service = Arc::new(SessionService::new(
            user_repo.clone(),
            store.clone(),
            event_bus.clone(),
        ));
        session_service.restore()?;

        let registry_service = Arc::new(RegistryService::new(
            user_repo.clone(),
            application_repo.clone(),
            Arc::new(UniformRandomPolicy::new()),
            session_service.clone(),
            store.clone(),
            event_bus.clone(),
        ));
        let dashboard_service = Arc::new(DashboardService::new(application_repo.clone()));

        Ok(Self {
            event_bus,
            store,
            user_repo,
            application_repo,
            session_service,
            registry_service,
            dashboard_service,
        })
    }

    /// Initialize over the on-disk store, falling back to an in-memory
    /// store when the database cannot be opened.
    pub fn open_default() -> AppResult<Self> {
        let store: Arc<dyn BlobStore> = match SqliteBlobStore::open_default() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                log::warn!("falling back to in-memory storage: {}", e);
                Arc::new(MemoryBlobStore::new())
            }
        };
        Self::initialize(store)
    }
}

/// Read and parse one persisted collection. Absent, unreadable or
/// malformed blobs all count as "no data".
fn load_collection<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &str,
) -> AppResult<Option<Vec<T>>> {
    let raw = match store.get(key) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("failed to read '{}' collection: {}", key, e);
            return Ok(None);
        }
    };
    match raw {
        Some(json) => match serde_json::from_str(&json) {
            Ok(items) => Ok(Some(items)),
            Err(e) => {
                log::warn!("discarding malformed '{}' collection: {}", key, e);
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

fn seed_store(
    user_repo: &dyn UserRepository,
    application_repo: &dyn ApplicationRepository,
    store: &dyn BlobStore,
    keep_users: bool,
) -> AppResult<()> {
    // When accounts survived but applications did not, keep the accounts
    // and start with an empty registry rather than mixing in demo vendors.
    let users = if keep_users {
        user_repo.list_all()?
    } else {
        let users = seed_users();
        user_repo.replace_all(users.clone())?;
        users
    };
    let applications = if keep_users {
        Vec::new()
    } else {
        seed_applications(&users)
    };
    application_repo.replace_all(applications.clone())?;
    log::info!(
        "seeded {} accounts and {} applications",
        users.len(),
        applications.len()
    );

    let entries = match (
        serde_json::to_string(&users),
        serde_json::to_string(&applications),
    ) {
        (Ok(users_json), Ok(apps_json)) => vec![
            (KEY_USERS.to_string(), users_json),
            (KEY_APPLICATIONS.to_string(), apps_json),
        ],
        _ => {
            log::warn!("failed to serialize seed collections");
            return Ok(());
        }
    };
    if let Err(e) = store.set_many(&entries) {
        log::warn!("failed to persist seed collections: {}", e);
    }
    Ok(())
}

/// Audit observers: every lifecycle fact lands in the log.
fn register_observers(event_bus: &EventBus) {
    event_bus.subscribe::<UserRegistered, _>(|e| {
        log::info!("[audit] account registered: {}", e.email);
    });
    event_bus.subscribe::<ApplicationSubmitted, _>(|e| {
        log::info!(
            "[audit] application {} submitted ({}) -> admin {}",
            e.application_id,
            e.license_type,
            e.assigned_admin
        );
    });
    event_bus.subscribe::<ApplicationApproved, _>(|e| {
        log::info!(
            "[audit] application {} approved by {} (renewal: {})",
            e.application_id,
            e.approved_by,
            e.renewal
        );
    });
    event_bus.subscribe::<ApplicationRejected, _>(|e| {
        log::info!(
            "[audit] application {} rejected by {}: {}",
            e.application_id,
            e.rejected_by,
            e.reason
        );
    });
    event_bus.subscribe::<RenewalRequested, _>(|e| {
        log::info!(
            "[audit] renewal requested for {} -> admin {}",
            e.application_id,
            e.assigned_admin
        );
    });
}
