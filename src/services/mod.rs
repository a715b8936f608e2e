// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod assignment;
pub mod dashboard_service;
pub mod registry_service;
pub mod session_service;

#[cfg(test)]
mod registry_service_tests;

// Re-export all services and their types
pub use assignment::{AssignmentPolicy, RoundRobinPolicy, UniformRandomPolicy};

pub use registry_service::{RegistryService, SubmitApplicationRequest};

pub use session_service::{RegisterUserRequest, SessionService};

pub use dashboard_service::{ApplicationSummary, DashboardService, StatusCounts};
