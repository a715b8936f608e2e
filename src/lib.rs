// src/lib.rs
// PermitHub - Vendor license application portal
//
// Architecture:
// - Domain-centric: lifecycle rules live on the entities
// - Event-driven: services emit facts, observers subscribe
// - Explicit: guarded state transitions, no implicit behavior
// - Local-first: collections live in memory, persisted write-through
//   as JSON blobs behind a key-value store

// ============================================================================
// MODULES
// ============================================================================

pub mod app;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod seed;
pub mod services;
pub mod store;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    application_label,
    document_for,
    document_label,
    documents_for,
    format_license_name,
    validate_application,
    validate_user,
    // Application
    Application,
    ApplicationStatus,
    // Document view
    DocumentRecord,
    DocumentStatus,
    DomainError,
    DomainResult,
    HistoryAction,
    HistoryEntry,
    Role,
    StatusLabel,
    // User
    User,
    LICENSE_VALIDITY_DAYS,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, ApplicationApproved, ApplicationRejected, ApplicationSubmitted, DomainEvent,
    EventBus, EventLogEntry, RenewalRequested, UserRegistered,
};

// ============================================================================
// PUBLIC API - Persistence
// ============================================================================

pub use store::{
    default_store_path, BlobStore, MemoryBlobStore, SqliteBlobStore, KEY_APPLICATIONS,
    KEY_SESSION_USER, KEY_USERS,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    ApplicationRepository, InMemoryApplicationRepository, InMemoryUserRepository, UserRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    ApplicationSummary,
    // Assignment
    AssignmentPolicy,
    DashboardService,
    RegisterUserRequest,
    // Registry
    RegistryService,
    RoundRobinPolicy,
    // Session
    SessionService,
    StatusCounts,
    SubmitApplicationRequest,
    UniformRandomPolicy,
};

// ============================================================================
// PUBLIC API - Application Wiring
// ============================================================================

pub use app::AppState;
