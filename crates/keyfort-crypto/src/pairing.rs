//! Artifact derivation over the BLS12-381 pairing groups.
//!
//! Two length classes fall out of the curve encoding: client secrets and
//! time permits are G1 elements (96 bytes uncompressed, two field elements),
//! the server secret is a G2 element (192 bytes uncompressed, four field
//! elements). All encodings are fixed-length and self-validating: feeding a
//! blob that is not a valid group element back into a derivation fails with
//! [`CryptoError::InvalidPoint`].

use std::time::{SystemTime, UNIX_EPOCH};

use bls12_381::{
    G1Affine, G1Projective, G2Affine, G2Projective,
    hash_to_curve::{ExpandMsgXmd, HashToCurve},
};
use sha2::Sha256;

use crate::{error::CryptoError, secret::MasterSecret};

/// Uncompressed G1 element size: client secrets, time permits, hashed ids.
pub const G1_ELEMENT_SIZE: usize = 96;

/// Uncompressed G2 element size: the server secret.
pub const G2_ELEMENT_SIZE: usize = 192;

/// A hashed identity is a G1 element.
pub const HASHED_IDENTITY_SIZE: usize = G1_ELEMENT_SIZE;

/// Domain separation tag for hashing user identities onto G1.
const IDENTITY_DST: &[u8] = b"KEYFORT-V01-BLS12381G1_XMD:SHA-256_SSWU_RO_ID_";

/// Domain separation tag for binding time permits to an epoch day.
const PERMIT_DST: &[u8] = b"KEYFORT-V01-BLS12381G1_XMD:SHA-256_SSWU_RO_TP_";

/// Seconds per epoch day.
const SECONDS_PER_DAY: u64 = 86_400;

/// Hash a user identity string onto the G1 domain.
///
/// Deterministic: the same identity always maps to the same element. The
/// output is what callers pass to [`generate_client_secret`] and
/// [`generate_time_permit`].
pub fn hash_identity(id: &str) -> [u8; HASHED_IDENTITY_SIZE] {
    let point =
        <G1Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve(id.as_bytes(), IDENTITY_DST);
    G1Affine::from(point).to_uncompressed()
}

/// Derive the server's share of the key material: `s · G2`.
///
/// Identity-independent and deterministic for a fixed master secret.
pub fn generate_server_secret(master: &MasterSecret) -> [u8; G2_ELEMENT_SIZE] {
    let point = G2Projective::generator() * master.scalar();
    G2Affine::from(point).to_uncompressed()
}

/// Derive a per-identity client secret: `s · H1(id)`.
///
/// # Errors
///
/// [`CryptoError::InvalidPoint`] when `hashed_id` is not a valid G1 element
/// encoding (wrong length or off-curve bytes).
pub fn generate_client_secret(
    master: &MasterSecret,
    hashed_id: &[u8],
) -> Result<[u8; G1_ELEMENT_SIZE], CryptoError> {
    let identity = decode_hashed_identity(hashed_id)?;
    let point = G1Projective::from(identity) * master.scalar();
    Ok(G1Affine::from(point).to_uncompressed())
}

/// Derive a day-scoped time permit: `s · H1(epoch_day ‖ hashed_id)`.
///
/// The permit is bound to both the identity and the epoch day, so a client
/// must re-fetch a fresh permit every day. Validity is limited without any
/// revocation infrastructure: a permit that is no longer reissued simply
/// stops working.
///
/// # Errors
///
/// [`CryptoError::InvalidPoint`] when `hashed_id` is not a valid G1 element.
pub fn generate_time_permit(
    epoch_day: u32,
    master: &MasterSecret,
    hashed_id: &[u8],
) -> Result<[u8; G1_ELEMENT_SIZE], CryptoError> {
    // Validate the identity encoding even though only its bytes feed the
    // hash: a permit must never be issued for a blob that could not have
    // come out of hash_identity.
    let identity = decode_hashed_identity(hashed_id)?;

    let mut message = Vec::with_capacity(4 + HASHED_IDENTITY_SIZE);
    message.extend_from_slice(&epoch_day.to_be_bytes());
    message.extend_from_slice(&identity.to_uncompressed());

    let point = <G1Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve(&message, PERMIT_DST);
    Ok(G1Affine::from(point * master.scalar()).to_uncompressed())
}

/// Days since the Unix epoch for the given instant.
///
/// Clocks before the epoch clamp to day zero.
pub fn epoch_day(now: SystemTime) -> u32 {
    now.duration_since(UNIX_EPOCH).map_or(0, |elapsed| (elapsed.as_secs() / SECONDS_PER_DAY) as u32)
}

fn decode_hashed_identity(hashed_id: &[u8]) -> Result<G1Affine, CryptoError> {
    let bytes: &[u8; HASHED_IDENTITY_SIZE] = hashed_id
        .try_into()
        .map_err(|_| CryptoError::InvalidPoint { len: hashed_id.len() })?;

    let point: Option<G1Affine> = G1Affine::from_uncompressed(bytes).into();
    point.ok_or(CryptoError::InvalidPoint { len: hashed_id.len() })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::rng::SeededRng;

    fn test_master() -> MasterSecret {
        SeededRng::from_seed_material(b"pairing tests").random_master_secret()
    }

    #[test]
    fn hash_identity_is_deterministic_and_fixed_length() {
        let a = hash_identity("alice@example.org");
        let b = hash_identity("alice@example.org");

        assert_eq!(a.len(), HASHED_IDENTITY_SIZE);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_identities_hash_to_distinct_points() {
        assert_ne!(hash_identity("alice@example.org"), hash_identity("bob@example.org"));
    }

    #[test]
    fn server_secret_is_deterministic() {
        let master = test_master();

        let first = generate_server_secret(&master);
        let second = generate_server_secret(&master);

        assert_eq!(first.len(), G2_ELEMENT_SIZE);
        assert_eq!(first, second);
    }

    #[test]
    fn client_secret_is_deterministic_per_identity() {
        let master = test_master();
        let alice = hash_identity("alice@example.org");
        let bob = hash_identity("bob@example.org");

        let first = generate_client_secret(&master, &alice).unwrap();
        let second = generate_client_secret(&master, &alice).unwrap();
        let other = generate_client_secret(&master, &bob).unwrap();

        assert_eq!(first.len(), G1_ELEMENT_SIZE);
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn distinct_masters_derive_distinct_secrets() {
        let master = test_master();
        let other = SeededRng::from_seed_material(b"other authority").random_master_secret();
        let alice = hash_identity("alice@example.org");

        assert_ne!(generate_server_secret(&master), generate_server_secret(&other));
        assert_ne!(
            generate_client_secret(&master, &alice).unwrap(),
            generate_client_secret(&other, &alice).unwrap()
        );
    }

    #[test]
    fn time_permit_binds_the_epoch_day() {
        let master = test_master();
        let alice = hash_identity("alice@example.org");

        let today = generate_time_permit(19_950, &master, &alice).unwrap();
        let same_day = generate_time_permit(19_950, &master, &alice).unwrap();
        let tomorrow = generate_time_permit(19_951, &master, &alice).unwrap();

        assert_eq!(today.len(), G1_ELEMENT_SIZE);
        assert_eq!(today, same_day);
        assert_ne!(today, tomorrow);
    }

    #[test]
    fn time_permit_binds_the_identity() {
        let master = test_master();
        let alice = hash_identity("alice@example.org");
        let bob = hash_identity("bob@example.org");

        assert_ne!(
            generate_time_permit(19_950, &master, &alice).unwrap(),
            generate_time_permit(19_950, &master, &bob).unwrap()
        );
    }

    #[test]
    fn rejects_wrong_length_hashed_identity() {
        let master = test_master();

        let err = generate_client_secret(&master, b"short").unwrap_err();
        assert_eq!(err, CryptoError::InvalidPoint { len: 5 });

        let err = generate_time_permit(0, &master, &[0u8; 12]).unwrap_err();
        assert_eq!(err, CryptoError::InvalidPoint { len: 12 });
    }

    #[test]
    fn rejects_off_curve_hashed_identity() {
        let master = test_master();
        let garbage = [0xABu8; HASHED_IDENTITY_SIZE];

        assert!(matches!(
            generate_client_secret(&master, &garbage),
            Err(CryptoError::InvalidPoint { .. })
        ));
    }

    proptest! {
        #[test]
        fn every_hashed_identity_is_a_usable_derivation_input(id in ".{0,64}") {
            let master = test_master();
            let hashed = hash_identity(&id);

            prop_assert!(generate_client_secret(&master, &hashed).is_ok());
            prop_assert!(generate_time_permit(0, &master, &hashed).is_ok());
        }
    }

    #[test]
    fn epoch_day_counts_days_since_unix_epoch() {
        use std::time::Duration;

        let start = UNIX_EPOCH;
        assert_eq!(epoch_day(start), 0);

        let later = UNIX_EPOCH + Duration::from_secs(3 * SECONDS_PER_DAY + 5);
        assert_eq!(epoch_day(later), 3);
    }
}
