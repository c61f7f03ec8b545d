//! Keyfort Trust Authority Core
//!
//! A distributed trust authority (D-TA) issuing identity-based key material
//! for a PIN-protected two-factor authentication scheme. Relying-party
//! applications register to obtain a shared symmetric key, then authenticate
//! every issuance request with a signature under that key.
//!
//! # Architecture
//!
//! ```text
//! outer request layer (HTTP, CLI — not this crate)
//!        │
//!        ▼
//! TrustService ── authenticated-request pipeline
//!        │            resolve RPA → verify signature → dispatch
//!        ├── RelyingPartyRegistry      app id → shared key
//!        ├── SignatureScheme           AES-128-CFB request signatures
//!        └── TrustAuthority            master secret + seeded RNG
//!                  │
//!                  ├── MasterSecretStore   memory or plain-text file
//!                  └── keyfort-crypto      pairing derivations
//! ```
//!
//! All components are explicit service objects constructed once and shared
//! by reference across request handlers; there is no ambient global state.
//! Every operation is synchronous request/response.
//!
//! # Failure semantics
//!
//! Each error kind reaches the boundary distinctly: a configuration problem
//! ([`ConfigError`], fatal at startup), a storage failure ([`StorageError`],
//! fatal only during init), a primitive failure
//! ([`keyfort_crypto::CryptoError`], scoped to one issuance call), and a
//! request denial ([`AuthenticationError`], never a process fault).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod authority;
mod config;
mod error;
mod registry;
mod service;
mod signature;
pub mod storage;

pub use authority::TrustAuthority;
pub use config::{Config, StorageKind, VerifierKind};
pub use error::{AuthenticationError, ConfigError, InitError, ServiceError, StorageError};
pub use keyfort_crypto::{CryptoError, G1_ELEMENT_SIZE, G2_ELEMENT_SIZE, hash_identity};
pub use registry::{KEY_SIZE, RelyingParty, RelyingPartyRegistry};
pub use service::{IssuanceRequest, TrustService};
pub use signature::{AES_BLOCK_SIZE, AesCfbScheme, SignatureScheme};
pub use storage::{MASTER_SECRET_SIZE, MasterSecretStore};
