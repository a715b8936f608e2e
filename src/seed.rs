// src/seed.rs
//
// Demo dataset used when the store has no persisted collections yet.
// Accounts carry mock credentials; applications are built through the
// entity methods so their history is well-formed.

use crate::domain::application::Application;
use crate::domain::user::{Role, User};

const SEED_PASSWORD: &str = "password123";

fn admin(name: &str, email: &str, phone: &str) -> User {
    let mut user = User::new(
        name.to_string(),
        email.to_string(),
        SEED_PASSWORD.to_string(),
        phone.to_string(),
        "admin".to_string(),
    );
    user.role = Role::Admin;
    user
}

fn vendor(name: &str, email: &str, phone: &str, business_type: &str) -> User {
    User::new(
        name.to_string(),
        email.to_string(),
        SEED_PASSWORD.to_string(),
        phone.to_string(),
        business_type.to_string(),
    )
}

/// Three license officers and two vendor accounts
pub fn seed_users() -> Vec<User> {
    vec![
        admin("Priya Raman", "priya@cityportal.gov", "9845012001"),
        admin("Arun Balaji", "arun@cityportal.gov", "9845012002"),
        admin("Kavitha Suresh", "kavitha@cityportal.gov", "9845012003"),
        vendor("Murali Krishnan", "murali@example.com", "9876501234", "street_vendor"),
        vendor("Lakshmi Devi", "lakshmi@example.com", "9876501235", "small_shop"),
    ]
}

/// One already-approved license and one fresh submission, attached to the
/// seeded vendors and admins.
pub fn seed_applications(users: &[User]) -> Vec<Application> {
    let admins: Vec<&User> = users.iter().filter(|u| u.is_admin()).collect();
    let vendors: Vec<&User> = users.iter().filter(|u| !u.is_admin()).collect();

    let (first_admin, second_admin) = match (admins.first(), admins.get(1)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Vec::new(),
    };
    let (first_vendor, second_vendor) = match (vendors.first(), vendors.get(1)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Vec::new(),
    };

    let mut approved = Application::new(
        first_vendor.id,
        "street_vendor".to_string(),
        vec!["identity_proof.pdf".to_string(), "address_proof.pdf".to_string()],
        first_admin.id,
    );
    if approved
        .approve(first_admin.id, Some("documents verified".to_string()))
        .is_err()
    {
        // Freshly built applications are always pending; this cannot fire.
        return Vec::new();
    }

    let pending = Application::new(
        second_vendor.id,
        "small_shop".to_string(),
        vec!["shop_lease.pdf".to_string()],
        second_admin.id,
    );

    vec![approved, pending]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::application::{validate_application, ApplicationStatus};
    use crate::domain::user::validate_user;

    #[test]
    fn test_seed_users_are_valid() {
        let users = seed_users();
        assert_eq!(users.iter().filter(|u| u.is_admin()).count(), 3);
        assert_eq!(users.iter().filter(|u| !u.is_admin()).count(), 2);
        for user in &users {
            validate_user(user).unwrap();
        }
    }

    #[test]
    fn test_seed_applications_are_valid() {
        let users = seed_users();
        let applications = seed_applications(&users);
        assert_eq!(applications.len(), 2);
        assert_eq!(applications[0].status, ApplicationStatus::Approved);
        assert!(applications[0].expiry_date.is_some());
        assert_eq!(applications[1].status, ApplicationStatus::Pending);
        for app in &applications {
            validate_application(app).unwrap();
            assert!(users.iter().any(|u| u.id == app.user_id));
            assert!(users.iter().any(|u| u.id == app.current_admin));
        }
    }
}
