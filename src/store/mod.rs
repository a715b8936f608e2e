// src/store/mod.rs
//
// Persistence Adapter
//
// The portal's collections persist as JSON blobs behind a key-value
// contract: get(key) -> JSON | absent, set(key, JSON). Absent or malformed
// data is "no data", never a fatal error.

pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryBlobStore;
pub use sqlite_store::{default_store_path, SqliteBlobStore};

use crate::error::AppResult;

#[cfg(test)]
use mockall::automock;

/// Persisted session user
pub const KEY_SESSION_USER: &str = "user";
/// Persisted account collection
pub const KEY_USERS: &str = "users";
/// Persisted application collection
pub const KEY_APPLICATIONS: &str = "applications";

/// Key-value blob store contract.
///
/// `set_many` writes all entries as one atomic unit where the backing
/// storage supports it, so the account and application collections can
/// never be observed torn.
#[cfg_attr(test, automock)]
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn set_many(&self, entries: &[(String, String)]) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}
