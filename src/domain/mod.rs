// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod application;
pub mod document;
pub mod labels;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// User Domain
pub use user::{validate_user, Role, User};

// Application Domain
pub use application::{
    validate_application, Application, ApplicationStatus, HistoryAction, HistoryEntry,
    LICENSE_VALIDITY_DAYS,
};

// Document View (Derived Data)
pub use document::{document_for, documents_for, DocumentRecord, DocumentStatus};

// Labels
pub use labels::{application_label, document_label, format_license_name, StatusLabel};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
