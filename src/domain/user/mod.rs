pub mod entity;
pub mod invariants;

pub use entity::{Role, User};
pub use invariants::validate_user;
