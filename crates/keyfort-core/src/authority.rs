//! The trust authority: master secret lifecycle and issuance.

use std::{
    sync::{Arc, Mutex},
    time::SystemTime,
};

use keyfort_crypto::{CryptoError, MasterSecret, SeededRng};

use crate::{
    error::{ConfigError, InitError},
    storage::MasterSecretStore,
};

/// The D-TA core: owns the master secret and the seeded random generator,
/// and derives all issued artifacts through the pairing primitives.
///
/// Exactly one master secret exists per authority instance for its
/// lifetime. It is created in [`TrustAuthority::init`] and only there, and
/// is persisted before the authority ever serves a request.
///
/// # Concurrency
///
/// The master secret and the random generator form one critical section:
/// every issuance holds the internal mutex for the whole pairing
/// computation, so concurrent callers can never interleave generator draws
/// or observe a partially derived artifact.
pub struct TrustAuthority {
    inner: Arc<Mutex<AuthorityInner>>,
}

struct AuthorityInner {
    master: MasterSecret,
    #[allow(dead_code)] // consumed only at init today; part of the critical section
    rng: SeededRng,
}

impl TrustAuthority {
    /// Initialize the authority from the configured seed and secret store.
    ///
    /// Decodes the hex seed, seeds the deterministic generator, and loads
    /// the master secret from `store` — generating and persisting a fresh
    /// one when the store reports none. Any storage failure here is fatal:
    /// no authority can operate without its master secret.
    ///
    /// # Errors
    ///
    /// - [`InitError::Config`] when the seed is not valid hex
    /// - [`InitError::Storage`] when the store cannot be read or written
    /// - [`InitError::Crypto`] when stored bytes are not a usable secret
    pub fn init(seed_hex: &str, store: &dyn MasterSecretStore) -> Result<Self, InitError> {
        let seed = hex::decode(seed_hex)
            .map_err(|_| ConfigError::InvalidSeed { seed: seed_hex.to_owned() })?;
        let mut rng = SeededRng::from_seed_material(&seed);

        let master = match store.get_secret()? {
            Some(bytes) => {
                tracing::info!("using existing master secret");
                MasterSecret::from_bytes(&bytes)?
            },
            None => {
                tracing::info!("generating new master secret");
                let master = rng.random_master_secret();
                store.set_secret(&master.to_bytes())?;
                master
            },
        };

        Ok(Self { inner: Arc::new(Mutex::new(AuthorityInner { master, rng })) })
    }

    /// Issue the server's share of the key material (G2-sized).
    ///
    /// Derived from the master secret alone; deterministic across calls.
    ///
    /// # Errors
    ///
    /// [`CryptoError`] when the pairing primitive rejects the operation.
    /// Scoped to this call: other in-flight and future issuances are
    /// unaffected.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned (a thread panicked while
    /// holding the lock).
    #[allow(clippy::expect_used)]
    pub fn issue_server_secret(&self) -> Result<Vec<u8>, CryptoError> {
        let inner = self.inner.lock().expect("mutex poisoned");
        Ok(keyfort_crypto::generate_server_secret(&inner.master).to_vec())
    }

    /// Issue a per-identity client secret (G1-sized).
    ///
    /// `hashed_id` is the output of [`keyfort_crypto::hash_identity`]; the
    /// hash-to-curve step happens before this call, not inside the core.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidPoint`] when `hashed_id` is not a valid hashed
    /// identity.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn issue_client_secret(&self, hashed_id: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let inner = self.inner.lock().expect("mutex poisoned");
        Ok(keyfort_crypto::generate_client_secret(&inner.master, hashed_id)?.to_vec())
    }

    /// Issue a time permit bound to the current epoch day (G1-sized).
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidPoint`] when `hashed_id` is not a valid hashed
    /// identity.
    pub fn issue_time_permit(&self, hashed_id: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.issue_time_permit_for_day(keyfort_crypto::epoch_day(SystemTime::now()), hashed_id)
    }

    /// Issue a time permit for an explicit epoch day.
    ///
    /// The day-granular variant behind [`TrustAuthority::issue_time_permit`];
    /// lets tests and replay tooling pin the validity day.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidPoint`] when `hashed_id` is not a valid hashed
    /// identity.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn issue_time_permit_for_day(
        &self,
        epoch_day: u32,
        hashed_id: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let inner = self.inner.lock().expect("mutex poisoned");
        Ok(keyfort_crypto::generate_time_permit(epoch_day, &inner.master, hashed_id)?.to_vec())
    }
}

impl Clone for TrustAuthority {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl std::fmt::Debug for TrustAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TrustAuthority(..)")
    }
}
