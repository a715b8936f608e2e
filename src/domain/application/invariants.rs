use chrono::Duration;

use super::entity::{Application, ApplicationStatus, HistoryAction, LICENSE_VALIDITY_DAYS};
use crate::domain::{DomainError, DomainResult};

/// Validates all Application invariants
pub fn validate_application(app: &Application) -> DomainResult<()> {
    validate_license_type(&app.license_type)?;
    validate_history(app)?;
    validate_expiry(app)?;
    Ok(())
}

/// License type cannot be blank
fn validate_license_type(license_type: &str) -> DomainResult<()> {
    if license_type.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "License type cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// History is append-only and must open with the submission entry;
/// the latest entry's action must be consistent with the status.
fn validate_history(app: &Application) -> DomainResult<()> {
    let first = app.history.first().ok_or_else(|| {
        DomainError::InvariantViolation("Application history cannot be empty".to_string())
    })?;
    if first.action != HistoryAction::Submitted {
        return Err(DomainError::InvariantViolation(
            "Application history must start with a submission entry".to_string(),
        ));
    }

    let last = app.history.last().expect("history checked non-empty");
    let consistent = match app.status {
        ApplicationStatus::Pending => last.action == HistoryAction::Submitted,
        ApplicationStatus::Approved => last.action == HistoryAction::Approved,
        ApplicationStatus::Rejected => last.action == HistoryAction::Rejected,
        ApplicationStatus::RenewalPending => last.action == HistoryAction::RenewalRequested,
        ApplicationStatus::Active => matches!(
            last.action,
            HistoryAction::RenewalApproved | HistoryAction::RenewalRejected
        ),
    };
    if !consistent {
        return Err(DomainError::InvariantViolation(format!(
            "History action {} does not match status {}",
            last.action, app.status
        )));
    }
    Ok(())
}

/// Expiry, when present, equals approval date plus the fixed validity period
fn validate_expiry(app: &Application) -> DomainResult<()> {
    match (app.approval_date, app.expiry_date) {
        (Some(approval), Some(expiry)) => {
            if expiry != approval + Duration::days(LICENSE_VALIDITY_DAYS) {
                return Err(DomainError::InvariantViolation(format!(
                    "Expiry {} is not {} days after approval {}",
                    expiry, LICENSE_VALIDITY_DAYS, approval
                )));
            }
            Ok(())
        }
        (None, Some(_)) => Err(DomainError::InvariantViolation(
            "Expiry date present without approval date".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Invariants that must hold true for the Application domain:
///
/// 1. Identity (UUID) is immutable; user_id never changes
/// 2. History is append-only, in insertion order
/// 3. The latest history action is consistent with the status
/// 4. expiry_date, when present, equals approval_date + validity period
/// 5. Rejected is terminal for this id; retry means a new application
/// 6. A declined renewal never sets rejection_reason

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_fresh_application_is_valid() {
        let app = Application::new(
            Uuid::new_v4(),
            "small_shop".to_string(),
            vec![],
            Uuid::new_v4(),
        );
        assert!(validate_application(&app).is_ok());
    }

    #[test]
    fn test_blank_license_type_fails() {
        let app = Application::new(Uuid::new_v4(), "  ".to_string(), vec![], Uuid::new_v4());
        assert!(validate_application(&app).is_err());
    }

    #[test]
    fn test_transitions_keep_application_valid() {
        let mut app = Application::new(
            Uuid::new_v4(),
            "street_vendor".to_string(),
            vec![],
            Uuid::new_v4(),
        );
        let admin = Uuid::new_v4();

        app.approve(admin, None).unwrap();
        assert!(validate_application(&app).is_ok());

        app.request_renewal(app.user_id, admin).unwrap();
        assert!(validate_application(&app).is_ok());

        app.reject(admin, "expired docs".to_string()).unwrap();
        assert!(validate_application(&app).is_ok());
    }

    #[test]
    fn test_tampered_expiry_fails() {
        let mut app = Application::new(
            Uuid::new_v4(),
            "street_vendor".to_string(),
            vec![],
            Uuid::new_v4(),
        );
        app.approve(Uuid::new_v4(), None).unwrap();
        app.expiry_date = app.approval_date.map(|d| d + Duration::days(30));
        assert!(validate_application(&app).is_err());
    }
}
