//! Property-based tests for the AEAD surface.
//!
//! Uses proptest to verify invariants across large input spaces.

use proptest::prelude::*;

// ============================================================================
// Round-Trip Properties
// ============================================================================

mod roundtrip_properties {
    use super::*;
    use xaead::aead::{AeadKey, Nonce, TAG_SIZE};

    proptest! {
        /// Decrypt of encrypt must return the original plaintext.
        #[test]
        fn encrypt_decrypt_roundtrip(
            key in any::<[u8; 32]>(),
            nonce in any::<[u8; 24]>(),
            aad in proptest::collection::vec(any::<u8>(), 0..128),
            plaintext in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let key = AeadKey::new(key);
            let nonce = Nonce::from_bytes(nonce);

            let ciphertext = key.encrypt(&nonce, &plaintext, &aad).unwrap();
            let decrypted = key.decrypt(&nonce, &ciphertext, &aad).unwrap();

            prop_assert_eq!(decrypted, plaintext);
        }

        /// Ciphertext is always exactly plaintext length plus the tag.
        #[test]
        fn ciphertext_length_law(
            key in any::<[u8; 32]>(),
            nonce in any::<[u8; 24]>(),
            plaintext in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let ciphertext = AeadKey::new(key)
                .encrypt(&Nonce::from_bytes(nonce), &plaintext, b"")
                .unwrap();
            prop_assert_eq!(ciphertext.len(), plaintext.len() + TAG_SIZE);
        }

        /// Encryption has no internal randomness.
        #[test]
        fn encrypt_is_deterministic(
            key in any::<[u8; 32]>(),
            nonce in any::<[u8; 24]>(),
            aad in proptest::collection::vec(any::<u8>(), 0..64),
            plaintext in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let key = AeadKey::new(key);
            let nonce = Nonce::from_bytes(nonce);

            let first = key.encrypt(&nonce, &plaintext, &aad).unwrap();
            let second = key.encrypt(&nonce, &plaintext, &aad).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

// ============================================================================
// Tamper-Detection Properties
// ============================================================================

mod tamper_properties {
    use super::*;
    use xaead::CryptoError;
    use xaead::aead::{AeadKey, Nonce};

    proptest! {
        /// Any single-bit flip anywhere in ciphertext or tag must be
        /// rejected, and the ciphertext buffer must not leak plaintext.
        #[test]
        fn bit_flip_is_rejected(
            key in any::<[u8; 32]>(),
            nonce in any::<[u8; 24]>(),
            plaintext in proptest::collection::vec(any::<u8>(), 1..256),
            flip_index in any::<prop::sample::Index>(),
            flip_bit in 0u8..8,
        ) {
            let key = AeadKey::new(key);
            let nonce = Nonce::from_bytes(nonce);

            let mut ciphertext = key.encrypt(&nonce, &plaintext, b"").unwrap();
            let index = flip_index.index(ciphertext.len());
            ciphertext[index] ^= 1 << flip_bit;

            prop_assert_eq!(
                key.decrypt(&nonce, &ciphertext, b""),
                Err(CryptoError::AuthenticationFailed)
            );
        }

        /// AAD participates in authentication: any change is rejected.
        #[test]
        fn aad_mismatch_is_rejected(
            key in any::<[u8; 32]>(),
            nonce in any::<[u8; 24]>(),
            aad in proptest::collection::vec(any::<u8>(), 1..64),
            plaintext in proptest::collection::vec(any::<u8>(), 0..128),
            flip_index in any::<prop::sample::Index>(),
        ) {
            let key = AeadKey::new(key);
            let nonce = Nonce::from_bytes(nonce);

            let ciphertext = key.encrypt(&nonce, &plaintext, &aad).unwrap();

            let mut bad_aad = aad.clone();
            let index = flip_index.index(bad_aad.len());
            bad_aad[index] ^= 0x01;

            prop_assert_eq!(
                key.decrypt(&nonce, &ciphertext, &bad_aad),
                Err(CryptoError::AuthenticationFailed)
            );
        }
    }
}

// ============================================================================
// Subkey Derivation Properties
// ============================================================================

mod subkey_properties {
    use super::*;
    use xaead::chacha20::hchacha20;

    proptest! {
        /// Distinct nonce prefixes must derive distinct subkeys.
        #[test]
        fn subkey_independence(
            key in any::<[u8; 32]>(),
            prefix1 in any::<[u8; 16]>(),
            prefix2 in any::<[u8; 16]>(),
        ) {
            prop_assume!(prefix1 != prefix2);
            prop_assert_ne!(hchacha20(&key, &prefix1), hchacha20(&key, &prefix2));
        }

        /// Subkey derivation is a pure function of (key, prefix).
        #[test]
        fn subkey_deterministic(
            key in any::<[u8; 32]>(),
            prefix in any::<[u8; 16]>(),
        ) {
            prop_assert_eq!(hchacha20(&key, &prefix), hchacha20(&key, &prefix));
        }
    }
}

// ============================================================================
// Input Validation Properties
// ============================================================================

mod validation_properties {
    use super::*;
    use xaead::CryptoError;
    use xaead::aead::{self, KEY_SIZE, NONCE_SIZE, TAG_SIZE};

    proptest! {
        /// Every non-32-byte key is rejected before any work happens.
        #[test]
        fn wrong_key_length_rejected(
            key in proptest::collection::vec(any::<u8>(), 0..64)
                .prop_filter("skip the valid length", |k| k.len() != KEY_SIZE),
            nonce in any::<[u8; 24]>(),
        ) {
            let result = aead::encrypt(&key, &nonce, b"", b"payload");
            prop_assert_eq!(
                result,
                Err(CryptoError::InvalidKeyLength {
                    expected: KEY_SIZE,
                    actual: key.len(),
                })
            );
        }

        /// Every non-24-byte nonce is rejected before any work happens.
        #[test]
        fn wrong_nonce_length_rejected(
            key in any::<[u8; 32]>(),
            nonce in proptest::collection::vec(any::<u8>(), 0..48)
                .prop_filter("skip the valid length", |n| n.len() != NONCE_SIZE),
        ) {
            let result = aead::encrypt(&key, &nonce, b"", b"payload");
            prop_assert_eq!(
                result,
                Err(CryptoError::InvalidNonceLength {
                    expected: NONCE_SIZE,
                    actual: nonce.len(),
                })
            );
        }

        /// Decrypt inputs shorter than a tag are rejected as malformed,
        /// not as forgeries.
        #[test]
        fn short_ciphertext_rejected(
            key in any::<[u8; 32]>(),
            nonce in any::<[u8; 24]>(),
            input in proptest::collection::vec(any::<u8>(), 0..TAG_SIZE),
        ) {
            let result = aead::decrypt(&key, &nonce, b"", &input);
            prop_assert_eq!(
                result,
                Err(CryptoError::CiphertextTooShort {
                    min: TAG_SIZE,
                    actual: input.len(),
                })
            );
        }
    }
}
