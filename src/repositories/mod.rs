// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls

pub mod application_repository;
pub mod user_repository;

pub use application_repository::{ApplicationRepository, InMemoryApplicationRepository};
pub use user_repository::{InMemoryUserRepository, UserRepository};
