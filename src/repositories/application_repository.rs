// src/repositories/application_repository.rs
//
// Application collection

use std::sync::RwLock;

use uuid::Uuid;

use crate::domain::application::{Application, ApplicationStatus};
use crate::error::AppResult;

pub trait ApplicationRepository: Send + Sync {
    /// Insert or replace by id
    fn save(&self, application: &Application) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Application>>;
    fn list_all(&self) -> AppResult<Vec<Application>>;
    fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Application>>;
    fn list_by_status(&self, status: ApplicationStatus) -> AppResult<Vec<Application>>;
    /// Applications sitting in the given admin's review queue
    fn list_awaiting_admin(&self, admin_id: Uuid) -> AppResult<Vec<Application>>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;
    /// Replace the whole collection (snapshot load)
    fn replace_all(&self, applications: Vec<Application>) -> AppResult<()>;
}

/// Registry state lives in memory; applications are never deleted, so the
/// vector only grows and insertion order doubles as submission order.
#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<Vec<Application>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn save(&self, application: &Application) -> AppResult<()> {
        let mut apps = self.applications.write().expect("repository lock poisoned");
        match apps.iter_mut().find(|a| a.id == application.id) {
            Some(existing) => *existing = application.clone(),
            None => apps.push(application.clone()),
        }
        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Application>> {
        let apps = self.applications.read().expect("repository lock poisoned");
        Ok(apps.iter().find(|a| a.id == id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<Application>> {
        let apps = self.applications.read().expect("repository lock poisoned");
        Ok(apps.clone())
    }

    fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Application>> {
        let apps = self.applications.read().expect("repository lock poisoned");
        Ok(apps.iter().filter(|a| a.user_id == user_id).cloned().collect())
    }

    fn list_by_status(&self, status: ApplicationStatus) -> AppResult<Vec<Application>> {
        let apps = self.applications.read().expect("repository lock poisoned");
        Ok(apps.iter().filter(|a| a.status == status).cloned().collect())
    }

    fn list_awaiting_admin(&self, admin_id: Uuid) -> AppResult<Vec<Application>> {
        let apps = self.applications.read().expect("repository lock poisoned");
        Ok(apps
            .iter()
            .filter(|a| a.current_admin == admin_id && a.awaits_review())
            .cloned()
            .collect())
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let apps = self.applications.read().expect("repository lock poisoned");
        Ok(apps.iter().any(|a| a.id == id))
    }

    fn replace_all(&self, replacement: Vec<Application>) -> AppResult<()> {
        let mut apps = self.applications.write().expect("repository lock poisoned");
        *apps = replacement;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted(user_id: Uuid, admin_id: Uuid) -> Application {
        Application::new(user_id, "street_vendor".to_string(), vec![], admin_id)
    }

    #[test]
    fn test_save_and_query() {
        let repo = InMemoryApplicationRepository::new();
        let user = Uuid::new_v4();
        let admin = Uuid::new_v4();
        let app = submitted(user, admin);
        repo.save(&app).unwrap();

        assert!(repo.exists(app.id).unwrap());
        assert_eq!(repo.list_by_user(user).unwrap().len(), 1);
        assert_eq!(
            repo.list_by_status(ApplicationStatus::Pending).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_awaiting_admin_excludes_settled_applications() {
        let repo = InMemoryApplicationRepository::new();
        let admin = Uuid::new_v4();

        let pending = submitted(Uuid::new_v4(), admin);
        repo.save(&pending).unwrap();

        let mut approved = submitted(Uuid::new_v4(), admin);
        approved.approve(admin, None).unwrap();
        repo.save(&approved).unwrap();

        let queue = repo.list_awaiting_admin(admin).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, pending.id);
    }

    #[test]
    fn test_save_updates_in_place() {
        let repo = InMemoryApplicationRepository::new();
        let admin = Uuid::new_v4();
        let mut app = submitted(Uuid::new_v4(), admin);
        repo.save(&app).unwrap();

        app.approve(admin, Some("ok".to_string())).unwrap();
        repo.save(&app).unwrap();

        assert_eq!(repo.list_all().unwrap().len(), 1);
        let stored = repo.get_by_id(app.id).unwrap().unwrap();
        assert_eq!(stored.status, ApplicationStatus::Approved);
        assert_eq!(stored.history.len(), 2);
    }
}
