//! Keyfort Pairing Primitives
//!
//! Cryptographic building blocks for the Keyfort trust authority. The
//! authority core treats this crate as an opaque primitive library: every
//! curve operation, hash-to-curve step, and epoch-day computation lives here
//! and nowhere else.
//!
//! # Key material
//!
//! All issued artifacts are derived from one authority-wide master secret,
//! a scalar in the BLS12-381 scalar field:
//!
//! ```text
//! Master Secret s
//!        │
//!        ├── Server Secret   s · G2          (identity-independent, G2-sized)
//!        ├── Client Secret   s · H1(id)      (per identity, G1-sized)
//!        └── Time Permit     s · H1(day‖id)  (per identity and day, G1-sized)
//! ```
//!
//! The client later combines its client secret with a user PIN to form an
//! authentication token; the server validates the combination against its
//! server secret without learning the PIN. Time permits bind validity to an
//! epoch day so stale client secrets expire without a revocation mechanism.
//!
//! # Determinism
//!
//! Derivation is a pure function of the master secret and its inputs: the
//! same stored secret always yields the same artifacts. Randomness enters
//! only through [`SeededRng`], which is deterministic for a fixed seed so a
//! restarted authority reproduces its state from persisted material.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod pairing;
mod rng;
mod secret;

pub use error::CryptoError;
pub use pairing::{
    G1_ELEMENT_SIZE, G2_ELEMENT_SIZE, HASHED_IDENTITY_SIZE, epoch_day, generate_client_secret,
    generate_server_secret, generate_time_permit, hash_identity,
};
pub use rng::SeededRng;
pub use secret::{MASTER_SECRET_SIZE, MasterSecret};
