use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A portal account: either a vendor applying for licenses or an
/// administrator reviewing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login key, unique across accounts
    pub email: String,

    /// Plaintext credential, compared verbatim (mock auth, not a security model)
    pub password: String,

    /// Account role
    pub role: Role,

    /// Contact phone
    pub phone: String,

    /// Free-form business tag, e.g. "street_vendor", "small_shop", "admin"
    pub business_type: String,

    /// Registration timestamp
    pub registered_at: DateTime<Utc>,
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl User {
    /// Create a new vendor account. Admin accounts only come from seed data.
    pub fn new(name: String, email: String, password: String, phone: String, business_type: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password,
            role: Role::User,
            phone,
            business_type,
            registered_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}
