pub mod entity;
pub mod invariants;

pub use entity::{
    Application, ApplicationStatus, HistoryAction, HistoryEntry, LICENSE_VALIDITY_DAYS,
};
pub use invariants::validate_application;
