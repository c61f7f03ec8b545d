//! Master secret persistence.
//!
//! Trait-based abstraction over where the authority's master secret lives.
//! The trait is synchronous; both implementations are selected by
//! configuration at startup ([`crate::StorageKind`]).
//!
//! Persistence is mandatory in production: losing the master secret
//! invalidates the consistency of every previously issued artifact with
//! future server secrets. The in-memory variant exists for tests and demos.

mod file;
mod memory;

pub use file::FileMasterSecretStore;
pub use keyfort_crypto::MASTER_SECRET_SIZE;
pub use memory::MemoryMasterSecretStore;

use crate::error::StorageError;

/// Storage for the authority's master secret.
///
/// `get_secret` distinguishes three outcomes: a stored secret
/// (`Ok(Some(..))`), nothing stored yet (`Ok(None)`), and an I/O failure
/// (`Err`). A failure must never be reported as "not found" — that would
/// make the authority silently mint a fresh secret over an unreadable one.
pub trait MasterSecretStore: Send + Sync {
    /// The stored secret, or `None` if nothing has been stored.
    fn get_secret(&self) -> Result<Option<[u8; MASTER_SECRET_SIZE]>, StorageError>;

    /// Persist the secret. Called once, at first initialization.
    fn set_secret(&self, secret: &[u8; MASTER_SECRET_SIZE]) -> Result<(), StorageError>;
}
