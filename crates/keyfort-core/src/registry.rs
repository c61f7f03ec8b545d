//! Relying-party application registry.
//!
//! Associative store of application id → shared authentication key. The key
//! is minted from OS randomness at registration; re-registering an id mints
//! a fresh key and silently invalidates every signature produced under the
//! old one.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use rand::{RngCore, rngs::OsRng};

/// Shared authentication key size in bytes (AES-128).
pub const KEY_SIZE: usize = 16;

/// A registered relying-party application.
///
/// The zero value (empty key) stands for "not registered": callers must
/// treat it as "authentication must fail", never as a usable key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelyingParty {
    /// Unique application id.
    pub id: String,
    /// Shared authentication key; empty when the id is unknown.
    pub key: Vec<u8>,
}

impl RelyingParty {
    /// Whether this record carries a usable key.
    pub fn is_registered(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Concurrency-safe registry of relying-party applications.
///
/// Readers and writers share one map behind a mutex; clones access the same
/// underlying registry. Register/delete are atomic per id, so no two
/// writers can apply inconsistent partial updates to the same entry.
#[derive(Debug, Clone, Default)]
pub struct RelyingPartyRegistry {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl RelyingPartyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an application, minting a fresh random key.
    ///
    /// Overwriting an existing id is allowed and rotates its key; there is
    /// no merge or versioning. Returns the stored record.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned (a thread panicked while
    /// holding the lock).
    #[allow(clippy::expect_used)]
    pub fn register(&self, id: &str) -> RelyingParty {
        let mut key = vec![0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);

        tracing::info!(app_id = %id, "generating application key");
        self.inner.lock().expect("mutex poisoned").insert(id.to_owned(), key.clone());

        RelyingParty { id: id.to_owned(), key }
    }

    /// The stored record, or a zero-value record (empty key) when absent.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn get(&self, id: &str) -> RelyingParty {
        let key =
            self.inner.lock().expect("mutex poisoned").get(id).cloned().unwrap_or_default();
        RelyingParty { id: id.to_owned(), key }
    }

    /// Snapshot of all registered applications; order is not significant.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn list(&self) -> Vec<RelyingParty> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .iter()
            .map(|(id, key)| RelyingParty { id: id.clone(), key: key.clone() })
            .collect()
    }

    /// Remove an application. A no-op, not an error, when absent.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn delete(&self, id: &str) {
        self.inner.lock().expect("mutex poisoned").remove(id);
    }
}
