use super::entity::User;
use crate::domain::{DomainError, DomainResult};

/// Validates all User invariants
pub fn validate_user(user: &User) -> DomainResult<()> {
    validate_name(&user.name)?;
    validate_email(&user.email)?;
    Ok(())
}

/// Name cannot be empty
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "User name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Email is the login key; it must be non-empty and look like an address
fn validate_email(email: &str) -> DomainResult<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(DomainError::InvariantViolation(format!(
            "Invalid email address: {:?}",
            email
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the User domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Email is unique across accounts (enforced by the repository)
/// 3. Name and email are never empty
/// 4. Role never changes after creation
/// 5. The document list is a derived view over the user's applications,
///    never a second mutable copy
