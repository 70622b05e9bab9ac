//! `XChaCha20-Poly1305` AEAD encryption.
//!
//! Provides authenticated encryption with associated data (AEAD) using
//! `XChaCha20-Poly1305`. Features include:
//! - 256-bit keys
//! - 192-bit nonces (extended nonce for safe random generation)
//! - 128-bit authentication tags
//! - Associated data authentication
//! - In-place encryption/decryption for zero-copy operations
//!
//! ## Construction
//!
//! Each call derives a fresh subkey with HChaCha20 from the key and the
//! first 16 nonce bytes; the remaining 8 nonce bytes (zero-padded to 12)
//! drive an ordinary ChaCha20-Poly1305 pass: keystream block 0 yields
//! the one-time Poly1305 key, payload bytes use blocks 1 onward, and the
//! tag covers `pad16(aad) ‖ pad16(ct) ‖ le64(|aad|) ‖ le64(|ct|)`.
//!
//! Decryption is all-or-nothing: the tag is recomputed and compared in
//! constant time before a single payload byte is transformed.
//!
//! ## Usage
//!
//! ```
//! use xaead::aead::{AeadKey, Nonce};
//!
//! let key = AeadKey::generate(&mut rand_core::OsRng);
//! let nonce = Nonce::generate(&mut rand_core::OsRng);
//!
//! let ciphertext = key.encrypt(&nonce, b"secret", b"aad")?;
//! let plaintext = key.decrypt(&nonce, &ciphertext, b"aad")?;
//! # assert_eq!(plaintext, b"secret");
//! # Ok::<(), xaead::CryptoError>(())
//! ```

use crate::CryptoError;
use crate::chacha20::{self, ChaCha20};
use crate::constant_time;
use crate::poly1305::Poly1305;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Authentication tag size (16 bytes / 128 bits).
pub const TAG_SIZE: usize = 16;

/// XChaCha20-Poly1305 nonce size (24 bytes / 192 bits).
pub const NONCE_SIZE: usize = 24;

/// AEAD key size (32 bytes / 256 bits).
pub const KEY_SIZE: usize = 32;

/// XChaCha20-Poly1305 nonce (24 bytes).
///
/// The extended 192-bit nonce allows safe random nonce generation
/// without risk of collision (each 128-bit prefix maps to an
/// independent subkey, so the birthday bound covers the full nonce).
/// Uniqueness per (key, message) remains the caller's obligation; the
/// primitive keeps no state to enforce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Create a nonce from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a nonce from a slice.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != NONCE_SIZE {
            return None;
        }
        let mut bytes = [0u8; NONCE_SIZE];
        bytes.copy_from_slice(slice);
        Some(Self(bytes))
    }

    /// Generate a random nonce.
    #[must_use]
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }

    /// First 16 bytes, the HChaCha20 input.
    fn prefix(&self) -> [u8; 16] {
        let mut prefix = [0u8; 16];
        prefix.copy_from_slice(&self.0[..16]);
        prefix
    }

    /// Inner 12-byte ChaCha20 nonce: four zero bytes, then the last 8
    /// nonce bytes.
    fn inner_nonce(&self) -> [u8; chacha20::NONCE_SIZE] {
        let mut inner = [0u8; chacha20::NONCE_SIZE];
        inner[4..].copy_from_slice(&self.0[16..]);
        inner
    }
}

/// Authentication tag (16 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag([u8; TAG_SIZE]);

impl Tag {
    /// Create a tag from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from slice.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != TAG_SIZE {
            return None;
        }
        let mut bytes = [0u8; TAG_SIZE];
        bytes.copy_from_slice(slice);
        Some(Self(bytes))
    }

    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }
}

/// AEAD encryption key (32 bytes).
///
/// Wraps the raw key material and provides encryption/decryption methods.
/// Key is zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct AeadKey([u8; KEY_SIZE]);

impl AeadKey {
    /// Create a key from raw bytes.
    #[must_use]
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from slice.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` if slice length is not 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        if slice.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: slice.len(),
            });
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Generate a random key.
    #[must_use]
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get raw key bytes.
    ///
    /// # Security
    ///
    /// Handle with extreme care - this exposes the raw key material.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Encrypt plaintext with associated data.
    ///
    /// Returns ciphertext with appended authentication tag (`plaintext.len()` + 16 bytes).
    /// Identical inputs always produce identical output; the nonce must
    /// be unique per message.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::CounterOverflow` if the plaintext exceeds
    /// the keystream a single nonce can produce.
    pub fn encrypt(
        &self,
        nonce: &Nonce,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let mut output = Vec::with_capacity(plaintext.len() + TAG_SIZE);
        output.extend_from_slice(plaintext);

        let tag = self.encrypt_in_place(nonce, &mut output, aad)?;
        output.extend_from_slice(tag.as_bytes());
        Ok(output)
    }

    /// Decrypt ciphertext with associated data.
    ///
    /// Input must include the authentication tag at the end; the output
    /// is exactly 16 bytes shorter than the input.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::CiphertextTooShort` if the input cannot
    /// hold a tag, and `CryptoError::AuthenticationFailed` on tag
    /// mismatch. No plaintext is produced on failure.
    pub fn decrypt(
        &self,
        nonce: &Nonce,
        ciphertext_and_tag: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if ciphertext_and_tag.len() < TAG_SIZE {
            return Err(CryptoError::CiphertextTooShort {
                min: TAG_SIZE,
                actual: ciphertext_and_tag.len(),
            });
        }

        let (ciphertext, tag) = ciphertext_and_tag.split_at(ciphertext_and_tag.len() - TAG_SIZE);
        let mut tag_bytes = [0u8; TAG_SIZE];
        tag_bytes.copy_from_slice(tag);

        let mut output = ciphertext.to_vec();
        self.decrypt_in_place(nonce, &mut output, &Tag::from_bytes(tag_bytes), aad)?;
        Ok(output)
    }

    /// Encrypt in-place, returning the authentication tag.
    ///
    /// The buffer is modified in-place to contain the ciphertext.
    /// Returns the authentication tag separately.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::CounterOverflow` if the buffer exceeds the
    /// keystream a single nonce can produce; the buffer is untouched in
    /// that case.
    pub fn encrypt_in_place(
        &self,
        nonce: &Nonce,
        buffer: &mut [u8],
        aad: &[u8],
    ) -> Result<Tag, CryptoError> {
        let subkey = Zeroizing::new(chacha20::hchacha20(&self.0, &nonce.prefix()));
        let inner_nonce = nonce.inner_nonce();

        ChaCha20::new(&subkey, &inner_nonce, 1).apply_keystream(buffer)?;
        let tag = message_tag(&subkey, &inner_nonce, aad, buffer);
        Ok(Tag(tag))
    }

    /// Decrypt in-place, verifying the authentication tag.
    ///
    /// The buffer is modified in-place to contain the plaintext. On
    /// authentication failure the buffer still holds the ciphertext:
    /// verification happens before any byte is transformed.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::AuthenticationFailed` on tag mismatch.
    pub fn decrypt_in_place(
        &self,
        nonce: &Nonce,
        buffer: &mut [u8],
        tag: &Tag,
        aad: &[u8],
    ) -> Result<(), CryptoError> {
        let subkey = Zeroizing::new(chacha20::hchacha20(&self.0, &nonce.prefix()));
        let inner_nonce = nonce.inner_nonce();

        let expected = message_tag(&subkey, &inner_nonce, aad, buffer);
        if !constant_time::verify_16(&expected, tag.as_bytes()) {
            return Err(CryptoError::AuthenticationFailed);
        }

        ChaCha20::new(&subkey, &inner_nonce, 1).apply_keystream(buffer)
    }
}

/// Encrypt `plaintext` under a raw 32-byte key and 24-byte nonce.
///
/// Byte-level facade over [`AeadKey::encrypt`]: output is
/// `ciphertext ‖ tag`, always `plaintext.len() + 16` bytes.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` / `InvalidNonceLength` on
/// malformed inputs and `CryptoError::CounterOverflow` for oversized
/// plaintext.
pub fn encrypt(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let key = AeadKey::from_slice(key)?;
    let nonce = Nonce::from_slice(nonce).ok_or(CryptoError::InvalidNonceLength {
        expected: NONCE_SIZE,
        actual: nonce.len(),
    })?;

    key.encrypt(&nonce, plaintext, aad)
}

/// Decrypt `ciphertext ‖ tag` under a raw 32-byte key and 24-byte nonce.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` / `InvalidNonceLength` /
/// `CiphertextTooShort` on malformed inputs and
/// `CryptoError::AuthenticationFailed` when the tag does not match; no
/// plaintext bytes are released on failure.
pub fn decrypt(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext_and_tag: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let key = AeadKey::from_slice(key)?;
    let nonce = Nonce::from_slice(nonce).ok_or(CryptoError::InvalidNonceLength {
        expected: NONCE_SIZE,
        actual: nonce.len(),
    })?;

    key.decrypt(&nonce, ciphertext_and_tag, aad)
}

/// Poly1305 tag over the AEAD message layout.
///
/// The one-time key is the first half of keystream block 0; the MAC
/// covers `pad16(aad) ‖ pad16(ciphertext) ‖ le64(|aad|) ‖ le64(|ct|)`.
fn message_tag(
    subkey: &[u8; KEY_SIZE],
    inner_nonce: &[u8; chacha20::NONCE_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
) -> [u8; TAG_SIZE] {
    const ZERO_PAD: [u8; 16] = [0u8; 16];

    let mut block0 = ChaCha20::new(subkey, inner_nonce, 0).keystream_block();
    let mut poly_key = Zeroizing::new([0u8; 32]);
    poly_key.copy_from_slice(&block0[..32]);
    block0.zeroize();

    let mut mac = Poly1305::new(&poly_key);
    mac.update(aad);
    mac.update(&ZERO_PAD[..(16 - aad.len() % 16) % 16]);
    mac.update(ciphertext);
    mac.update(&ZERO_PAD[..(16 - ciphertext.len() % 16) % 16]);
    mac.update(&(aad.len() as u64).to_le_bytes());
    mac.update(&(ciphertext.len() as u64).to_le_bytes());
    mac.finalize()
}
