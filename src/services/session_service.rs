// src/services/session_service.rs
//
// Session/Identity provider.
//
// Authentication is an exact string match on email and password against
// the in-memory account collection (mock credentials, not a security
// model). The session user is persisted under the "user" key so a reload
// resumes the session.

use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::domain::user::{validate_user, User};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, UserRegistered};
use crate::repositories::UserRepository;
use crate::store::{BlobStore, KEY_SESSION_USER, KEY_USERS};

#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub business_type: String,
}

pub struct SessionService {
    user_repo: Arc<dyn UserRepository>,
    store: Arc<dyn BlobStore>,
    event_bus: Arc<EventBus>,
    current: RwLock<Option<Uuid>>,
}

impl SessionService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        store: Arc<dyn BlobStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            user_repo,
            store,
            event_bus,
            current: RwLock::new(None),
        }
    }

    /// Exact-match credential check. On success the session is persisted
    /// under the "user" key.
    pub fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let candidate = self.user_repo.get_by_email(email)?;
        match candidate {
            Some(user) if user.password == password => {
                *self.current.write().expect("session lock poisoned") = Some(user.id);
                self.persist_session(&user);
                log::info!("session opened for {}", user.email);
                Ok(Some(user))
            }
            _ => Ok(None),
        }
    }

    /// Create a vendor account and log it in.
    /// Recovers the registration flow the portal offers alongside login.
    pub fn register(&self, request: RegisterUserRequest) -> AppResult<User> {
        if self.user_repo.get_by_email(&request.email)?.is_some() {
            return Err(AppError::Validation(format!(
                "an account already exists for {}",
                request.email
            )));
        }

        let user = User::new(
            request.name,
            request.email,
            request.password,
            request.phone,
            request.business_type,
        );
        validate_user(&user).map_err(AppError::Domain)?;
        self.user_repo.save(&user)?;

        *self.current.write().expect("session lock poisoned") = Some(user.id);
        self.persist_accounts_and_session(&user);

        self.event_bus
            .emit(UserRegistered::new(user.id, user.email.clone()));
        Ok(user)
    }

    pub fn current_user_id(&self) -> Option<Uuid> {
        *self.current.read().expect("session lock poisoned")
    }

    pub fn current_user(&self) -> AppResult<Option<User>> {
        match self.current_user_id() {
            Some(id) => self.user_repo.get_by_id(id),
            None => Ok(None),
        }
    }

    /// Clear the session and the persisted "user" key
    pub fn logout(&self) {
        *self.current.write().expect("session lock poisoned") = None;
        if let Err(e) = self.store.remove(KEY_SESSION_USER) {
            log::warn!("failed to clear persisted session: {}", e);
        }
    }

    /// Resume a previously persisted session, if its account still exists.
    /// Malformed or stale session blobs are ignored.
    pub fn restore(&self) -> AppResult<()> {
        let raw = match self.store.get(KEY_SESSION_USER) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(()),
            Err(e) => {
                log::warn!("failed to read persisted session: {}", e);
                return Ok(());
            }
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) if self.user_repo.exists(user.id)? => {
                *self.current.write().expect("session lock poisoned") = Some(user.id);
                log::info!("session resumed for {}", user.email);
            }
            Ok(user) => {
                log::warn!("persisted session for unknown account {}", user.email);
            }
            Err(e) => {
                log::warn!("discarding malformed session blob: {}", e);
            }
        }
        Ok(())
    }

    // Write-through persistence; storage failures are logged and the
    // session continues in memory.
    fn persist_session(&self, user: &User) {
        let payload = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialize session user: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(KEY_SESSION_USER, &payload) {
            log::warn!("failed to persist session: {}", e);
        }
    }

    fn persist_accounts_and_session(&self, session_user: &User) {
        let accounts = match self.user_repo.list_all() {
            Ok(users) => users,
            Err(e) => {
                log::warn!("failed to read accounts for persistence: {}", e);
                return;
            }
        };
        let entries = match (
            serde_json::to_string(&accounts),
            serde_json::to_string(session_user),
        ) {
            (Ok(users_json), Ok(user_json)) => vec![
                (KEY_USERS.to_string(), users_json),
                (KEY_SESSION_USER.to_string(), user_json),
            ],
            _ => {
                log::warn!("failed to serialize accounts for persistence");
                return;
            }
        };
        if let Err(e) = self.store.set_many(&entries) {
            log::warn!("failed to persist accounts: {}", e);
        }
    }
}
