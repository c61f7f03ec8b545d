//! The authority-wide master secret.

use bls12_381::Scalar;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Size of the master secret in bytes (the BLS12-381 scalar field size).
pub const MASTER_SECRET_SIZE: usize = 32;

/// The authority's master secret scalar.
///
/// Created exactly once per authority lifetime and persisted immediately:
/// losing it invalidates the consistency of every previously issued client
/// secret and time permit with future server secrets. Stored in canonical
/// little-endian scalar encoding so the bytes round-trip through the master
/// secret store unchanged. Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct MasterSecret {
    bytes: [u8; MASTER_SECRET_SIZE],
}

impl MasterSecret {
    /// Reconstruct a master secret from its persisted encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidScalar`] if the bytes are not a
    /// canonical scalar (for example a corrupted secret file).
    pub fn from_bytes(bytes: &[u8; MASTER_SECRET_SIZE]) -> Result<Self, CryptoError> {
        let valid: Option<Scalar> = Scalar::from_bytes(bytes).into();
        match valid {
            Some(_) => Ok(Self { bytes: *bytes }),
            None => Err(CryptoError::InvalidScalar),
        }
    }

    /// Canonical encoding for persistence, no header or version tag.
    pub fn to_bytes(&self) -> [u8; MASTER_SECRET_SIZE] {
        self.bytes
    }

    /// The scalar value, for use by the derivation functions in this crate.
    pub(crate) fn scalar(&self) -> Scalar {
        // Canonical by construction: both constructors go through
        // Scalar::from_bytes / Scalar::to_bytes.
        let valid: Option<Scalar> = Scalar::from_bytes(&self.bytes).into();
        valid.unwrap_or_else(Scalar::zero)
    }

    pub(crate) fn from_scalar(scalar: &Scalar) -> Self {
        Self { bytes: scalar.to_bytes() }
    }
}

// Secrets never appear in logs or panic messages.
impl std::fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterSecret(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let mut bytes = [0u8; MASTER_SECRET_SIZE];
        bytes[0] = 42;
        bytes[7] = 7;

        let secret = MasterSecret::from_bytes(&bytes).unwrap();
        assert_eq!(secret.to_bytes(), bytes);
    }

    #[test]
    fn rejects_non_canonical_encoding() {
        // All-ones exceeds the scalar field modulus.
        let bytes = [0xFF; MASTER_SECRET_SIZE];
        assert_eq!(MasterSecret::from_bytes(&bytes), Err(CryptoError::InvalidScalar));
    }

    #[test]
    fn debug_does_not_leak_the_value() {
        let mut bytes = [0u8; MASTER_SECRET_SIZE];
        bytes[0] = 0xAB;
        let secret = MasterSecret::from_bytes(&bytes).unwrap();
        assert_eq!(format!("{secret:?}"), "MasterSecret(..)");
    }
}
