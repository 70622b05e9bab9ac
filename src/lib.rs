//! # xaead
//!
//! Extended-nonce authenticated encryption, implemented from first
//! principles.
//!
//! This crate provides `XChaCha20-Poly1305`: authenticated encryption
//! with associated data (AEAD) using a 256-bit key and a 192-bit nonce.
//! The inner stream cipher and one-time authenticator are implemented
//! here rather than delegated to an AEAD library, so the crate has no
//! cryptographic dependencies beyond constant-time and zeroization
//! support.
//!
//! ## Construction
//!
//! | Step | Algorithm | Output |
//! |------|-----------|--------|
//! | Subkey derivation | HChaCha20 | 256-bit per-nonce subkey |
//! | Keystream | ChaCha20 (20 rounds) | 64-byte blocks |
//! | Authentication | Poly1305 | 128-bit tag |
//!
//! The 192-bit nonce is split: the first 16 bytes feed HChaCha20 to
//! derive a fresh subkey, the last 8 bytes (zero-padded to 12) become
//! the inner ChaCha20 nonce. Random nonce generation is safe because
//! subkeys for distinct prefixes are computationally independent, so
//! the collision bound is governed by the full 192-bit space.
//!
//! ## Caller obligations
//!
//! A (key, nonce) pair must never encrypt two different messages. This
//! crate does not track nonces; uniqueness is a precondition.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod aead;
pub mod chacha20;
pub mod constant_time;
pub mod error;
pub mod poly1305;

pub use aead::{decrypt, encrypt};
pub use error::CryptoError;

/// XChaCha20-Poly1305 key size
pub const XCHACHA_KEY_SIZE: usize = aead::KEY_SIZE;

/// XChaCha20-Poly1305 nonce size
pub const XCHACHA_NONCE_SIZE: usize = aead::NONCE_SIZE;

/// XChaCha20-Poly1305 authentication tag size
pub const XCHACHA_TAG_SIZE: usize = aead::TAG_SIZE;
