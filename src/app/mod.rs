// src/app/mod.rs
//
// Application wiring

pub mod state;

pub use state::AppState;
