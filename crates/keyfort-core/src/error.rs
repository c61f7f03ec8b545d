//! Error types for the trust authority core.
//!
//! Strongly-typed errors per concern: configuration problems are fatal at
//! startup, storage problems are fatal only while obtaining the master
//! secret, primitive failures are scoped to one issuance call, and
//! authentication failures are request-level denials. No kind is downgraded
//! into another; a caller can always tell which layer refused.

use std::{io, path::PathBuf};

use keyfort_crypto::CryptoError;
use thiserror::Error;

/// Invalid configuration. The process must not begin serving with one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured random seed is not valid hex.
    #[error("server seed is not valid hex: {seed:?}")]
    InvalidSeed {
        /// The rejected seed string
        seed: String,
    },
}

/// I/O failure reading or writing the master secret.
///
/// Never conflated with "no secret stored yet": an unreadable secret file is
/// an error, an absent one is `Ok(None)` from the store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing secret file could not be read or written.
    #[error("failed to {operation} master secret file {path:?}")]
    Io {
        /// What the store was doing
        operation: &'static str,
        /// The backing file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Request-level denial from the authenticated-request pipeline.
///
/// Always a refusal of one request, never a process fault: an unknown
/// application id or a forged signature must fail closed without touching
/// the issuance path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// A required request parameter was absent or empty.
    #[error("missing argument {name}")]
    MissingParameter {
        /// Parameter name as the outer layer spells it
        name: &'static str,
    },

    /// The signature parameter was not valid base64url.
    #[error("invalid signature encoding")]
    MalformedSignature,

    /// No key is registered for the claimed application id.
    #[error("no key registered for application {app_id:?}")]
    UnknownApplication {
        /// The unresolved application id
        app_id: String,
    },

    /// The application key has the wrong length for the cipher.
    #[error("invalid application key ({len} bytes)")]
    InvalidKey {
        /// Length of the rejected key
        len: usize,
    },

    /// The signature did not verify against the resolved application key.
    #[error("signature verification failed")]
    SignatureMismatch,
}

/// Failure while constructing the authority at startup.
#[derive(Error, Debug)]
pub enum InitError {
    /// Configuration was invalid (malformed seed).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The master secret could not be loaded or persisted.
    #[error("master secret storage failed during init")]
    Storage(#[from] StorageError),

    /// Stored master secret bytes were rejected by the primitive.
    #[error("stored master secret is unusable")]
    Crypto(#[from] CryptoError),
}

/// Error surface of the authenticated-request pipeline.
///
/// Keeps "caller unauthenticated" and "primitive failed" distinct so the
/// outer layer can map them to different responses (denial vs. server
/// fault).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request was denied before any issuance ran.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// The pairing primitive rejected the issuance inputs.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
