//! Seeded deterministic random generator.

use bls12_381::Scalar;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use crate::secret::MasterSecret;

/// Deterministic random generator seeded from operator-supplied material.
///
/// Arbitrary-length seed bytes are compressed through SHA-256 into the
/// ChaCha20 key, so any configured seed yields a full-entropy generator
/// state. The same seed always produces the same output sequence, which is
/// what lets a fresh authority regenerate identical master secrets in
/// deterministic test setups.
///
/// The generator is shared mutable state: callers that draw from it during
/// issuance must hold exclusive access for the whole operation so concurrent
/// draws cannot interleave (see the authority's locking discipline).
pub struct SeededRng {
    inner: ChaCha20Rng,
}

impl SeededRng {
    /// Build a generator from raw seed bytes.
    pub fn from_seed_material(seed: &[u8]) -> Self {
        let digest = Sha256::digest(seed);
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self { inner: ChaCha20Rng::from_seed(key) }
    }

    /// Fill `buffer` with random bytes.
    pub fn fill_bytes(&mut self, buffer: &mut [u8]) {
        self.inner.fill_bytes(buffer);
    }

    /// Draw a uniformly random master secret scalar.
    ///
    /// Uses 64 bytes of generator output reduced modulo the scalar field,
    /// so the result is canonical and free of modular bias.
    pub fn random_master_secret(&mut self) -> MasterSecret {
        let mut wide = [0u8; 64];
        self.inner.fill_bytes(&mut wide);
        let scalar = Scalar::from_bytes_wide(&wide);
        MasterSecret::from_scalar(&scalar)
    }
}

impl std::fmt::Debug for SeededRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SeededRng(..)")
    }
}
