//! Cryptographic error types.

use thiserror::Error;

/// Cryptographic errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// AEAD decryption failed (tag mismatch)
    #[error("authentication failed: tag mismatch")]
    AuthenticationFailed,

    /// Invalid key length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Invalid nonce length
    #[error("invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Decrypt input shorter than the authentication tag
    #[error("ciphertext too short: need at least {min} bytes, got {actual}")]
    CiphertextTooShort {
        /// Minimum length (the tag size)
        min: usize,
        /// Actual length
        actual: usize,
    },

    /// Block counter would exceed its 32-bit range for this input
    #[error("block counter exhausted: message too long for one nonce")]
    CounterOverflow,
}
