// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// ACCOUNT EVENTS
// ============================================================================

/// Emitted when a new vendor account registers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub email: String,
}

impl UserRegistered {
    pub fn new(user_id: Uuid, email: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            email,
        }
    }
}

impl DomainEvent for UserRegistered {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserRegistered" }
}

// ============================================================================
// APPLICATION LIFECYCLE EVENTS
// ============================================================================

/// Emitted when a license application is submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSubmitted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: Uuid,
    pub user_id: Uuid,
    pub license_type: String,
    pub assigned_admin: Uuid,
}

impl ApplicationSubmitted {
    pub fn new(application_id: Uuid, user_id: Uuid, license_type: String, assigned_admin: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
            user_id,
            license_type,
            assigned_admin,
        }
    }
}

impl DomainEvent for ApplicationSubmitted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ApplicationSubmitted" }
}

/// Emitted when an application or its pending renewal is approved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationApproved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: Uuid,
    pub approved_by: Uuid,
    /// True when this settles a renewal rather than a first application
    pub renewal: bool,
}

impl ApplicationApproved {
    pub fn new(application_id: Uuid, approved_by: Uuid, renewal: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
            approved_by,
            renewal,
        }
    }
}

impl DomainEvent for ApplicationApproved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ApplicationApproved" }
}

/// Emitted when an application is rejected or its renewal declined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRejected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: Uuid,
    pub rejected_by: Uuid,
    pub reason: String,
    /// True when a renewal was declined (the license itself stays valid)
    pub renewal: bool,
}

impl ApplicationRejected {
    pub fn new(application_id: Uuid, rejected_by: Uuid, reason: String, renewal: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
            rejected_by,
            reason,
            renewal,
        }
    }
}

impl DomainEvent for ApplicationRejected {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ApplicationRejected" }
}

/// Emitted when an active license is put back into review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewalRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: Uuid,
    pub requested_by: Uuid,
    pub assigned_admin: Uuid,
}

impl RenewalRequested {
    pub fn new(application_id: Uuid, requested_by: Uuid, assigned_admin: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
            requested_by,
            assigned_admin,
        }
    }
}

impl DomainEvent for RenewalRequested {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RenewalRequested" }
}
