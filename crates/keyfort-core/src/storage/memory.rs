use std::sync::Mutex;

use super::{MASTER_SECRET_SIZE, MasterSecretStore};
use crate::error::StorageError;

/// Ephemeral in-memory master secret store.
///
/// Empty until the first `set_secret` in this process; everything is lost on
/// restart, so a restarted authority generates a fresh master secret and
/// orphans all previously issued artifacts. Suitable for tests and demos
/// only.
#[derive(Debug, Default)]
pub struct MemoryMasterSecretStore {
    secret: Mutex<Option<[u8; MASTER_SECRET_SIZE]>>,
}

impl MemoryMasterSecretStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MasterSecretStore for MemoryMasterSecretStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned (a thread panicked while
    /// holding the lock). Acceptable for the test/demo store.
    #[allow(clippy::expect_used)]
    fn get_secret(&self) -> Result<Option<[u8; MASTER_SECRET_SIZE]>, StorageError> {
        Ok(*self.secret.lock().expect("mutex poisoned"))
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn set_secret(&self, secret: &[u8; MASTER_SECRET_SIZE]) -> Result<(), StorageError> {
        *self.secret.lock().expect("mutex poisoned") = Some(*secret);
        Ok(())
    }
}
