//! Request signature scheme shared with relying parties.
//!
//! The wire contract is AES-128-CFB with a random leading IV block:
//! `signature = iv || cfb_encrypt(key, iv, message)`. Verification decrypts
//! and byte-compares the recovered plaintext against the expected message.
//!
//! This is a shared-secret confidentiality scheme used as if it were a MAC:
//! there is no integrity tag, and any holder of the key can forge a valid
//! signature for a known message. It is preserved bit-exactly (block size,
//! IV placement, full-block CFB) because registered relying parties depend
//! on it; changing it to an HMAC/AEAD construction would break the external
//! protocol.

use aes::Aes128;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use rand::{RngCore, rngs::OsRng};

use crate::error::AuthenticationError;

type Aes128CfbEnc = cfb_mode::Encryptor<Aes128>;
type Aes128CfbDec = cfb_mode::Decryptor<Aes128>;

/// AES cipher block size; also the IV length inside a signature.
pub const AES_BLOCK_SIZE: usize = 16;

/// A request signature scheme, selected by configuration at startup.
///
/// Pure request-scoped functions of (signature, key, message): no session
/// state exists anywhere in the scheme.
pub trait SignatureScheme: Send + Sync {
    /// Sign `message` under `key`.
    ///
    /// # Errors
    ///
    /// [`AuthenticationError::InvalidKey`] when `key` has the wrong length
    /// for the cipher.
    fn create_signature(&self, key: &[u8], message: &str)
    -> Result<Vec<u8>, AuthenticationError>;

    /// Whether `signature` recovers exactly `expected` under `key`.
    ///
    /// Fails closed: a truncated signature or a key of the wrong length
    /// (including the empty key of an unregistered application) returns
    /// `false`, never a panic.
    fn verify_signature(&self, signature: &[u8], key: &[u8], expected: &str) -> bool;
}

/// The one configured scheme: AES-128-CFB, full-block feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCfbScheme;

impl AesCfbScheme {
    /// Create the scheme.
    pub fn new() -> Self {
        Self
    }
}

impl SignatureScheme for AesCfbScheme {
    fn create_signature(
        &self,
        key: &[u8],
        message: &str,
    ) -> Result<Vec<u8>, AuthenticationError> {
        let mut signature = vec![0u8; AES_BLOCK_SIZE + message.len()];
        let (iv, ciphertext) = signature.split_at_mut(AES_BLOCK_SIZE);
        OsRng.fill_bytes(iv);
        ciphertext.copy_from_slice(message.as_bytes());

        let cipher = Aes128CfbEnc::new_from_slices(key, iv)
            .map_err(|_| AuthenticationError::InvalidKey { len: key.len() })?;
        cipher.encrypt(ciphertext);

        Ok(signature)
    }

    fn verify_signature(&self, signature: &[u8], key: &[u8], expected: &str) -> bool {
        if signature.len() < AES_BLOCK_SIZE {
            return false;
        }
        let (iv, ciphertext) = signature.split_at(AES_BLOCK_SIZE);

        let Ok(cipher) = Aes128CfbDec::new_from_slices(key, iv) else {
            return false;
        };

        let mut plaintext = ciphertext.to_vec();
        cipher.decrypt(&mut plaintext);

        plaintext == expected.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::registry::KEY_SIZE;

    #[test]
    fn signature_layout_is_iv_then_ciphertext() {
        let scheme = AesCfbScheme::new();
        let key = [0x42u8; KEY_SIZE];

        let signature = scheme.create_signature(&key, "appid0001").unwrap();
        assert_eq!(signature.len(), AES_BLOCK_SIZE + "appid0001".len());
    }

    #[test]
    fn round_trip_verifies() {
        let scheme = AesCfbScheme::new();
        let key = [0x42u8; KEY_SIZE];

        let signature = scheme.create_signature(&key, "appid0001").unwrap();
        assert!(scheme.verify_signature(&signature, &key, "appid0001"));
    }

    #[test]
    fn wrong_message_is_rejected() {
        let scheme = AesCfbScheme::new();
        let key = [0x42u8; KEY_SIZE];

        let signature = scheme.create_signature(&key, "appid0001").unwrap();
        assert!(!scheme.verify_signature(&signature, &key, "appid0002"));
    }

    #[test]
    fn truncated_signature_fails_closed() {
        let scheme = AesCfbScheme::new();
        let key = [0x42u8; KEY_SIZE];

        assert!(!scheme.verify_signature(&[], &key, "appid0001"));
        assert!(!scheme.verify_signature(&[0u8; AES_BLOCK_SIZE - 1], &key, "appid0001"));
    }

    #[test]
    fn empty_key_fails_closed() {
        let scheme = AesCfbScheme::new();
        let signature = [0u8; AES_BLOCK_SIZE + 4];

        assert!(!scheme.verify_signature(&signature, &[], "appid0001"));
    }

    #[test]
    fn wrong_length_key_cannot_sign() {
        let scheme = AesCfbScheme::new();

        let err = scheme.create_signature(&[1u8; 7], "appid0001").unwrap_err();
        assert_eq!(err, AuthenticationError::InvalidKey { len: 7 });
    }

    #[test]
    fn empty_message_round_trips() {
        let scheme = AesCfbScheme::new();
        let key = [9u8; KEY_SIZE];

        let signature = scheme.create_signature(&key, "").unwrap();
        assert_eq!(signature.len(), AES_BLOCK_SIZE);
        assert!(scheme.verify_signature(&signature, &key, ""));
        assert!(!scheme.verify_signature(&signature, &key, "x"));
    }

    proptest! {
        #[test]
        fn any_key_and_message_round_trip(key in prop::array::uniform16(any::<u8>()), message in ".*") {
            let scheme = AesCfbScheme::new();
            let signature = scheme.create_signature(&key, &message).unwrap();
            prop_assert!(scheme.verify_signature(&signature, &key, &message));
        }

        #[test]
        fn a_different_key_rejects(
            key in prop::array::uniform16(any::<u8>()),
            other in prop::array::uniform16(any::<u8>()),
            message in "[a-zA-Z0-9]{8,32}",
        ) {
            prop_assume!(key != other);
            let scheme = AesCfbScheme::new();
            let signature = scheme.create_signature(&key, &message).unwrap();
            prop_assert!(!scheme.verify_signature(&signature, &other, &message));
        }

        #[test]
        fn a_different_message_rejects(
            key in prop::array::uniform16(any::<u8>()),
            message in ".+",
            other in ".+",
        ) {
            prop_assume!(message != other);
            let scheme = AesCfbScheme::new();
            let signature = scheme.create_signature(&key, &message).unwrap();
            prop_assert!(!scheme.verify_signature(&signature, &key, &other));
        }
    }
}
