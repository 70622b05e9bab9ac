//! ChaCha20 block function, keystream generation and HChaCha20.
//!
//! The 20-round permutation is shared between two users: the keystream
//! generator (which adds the permuted state back to the initial state
//! before serializing, per RFC 8439) and HChaCha20 (which omits that
//! feed-forward and serializes words 0..4 and 12..16 as a derived key).

use crate::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// State initialization constant ("expand 32-byte k")
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// Number of 32-bit words in the ChaCha state
const STATE_WORDS: usize = 16;

/// Keystream block size (64 bytes).
pub const BLOCK_SIZE: usize = 64;

/// ChaCha20 key size (32 bytes).
pub const KEY_SIZE: usize = 32;

/// Inner ChaCha20 nonce size (12 bytes).
pub const NONCE_SIZE: usize = 12;

/// HChaCha20 input size (16 bytes, the extended-nonce prefix).
pub const HCHACHA_INPUT_SIZE: usize = 16;

/// The ChaCha quarter round on state indices (a, b, c, d).
#[inline]
fn quarter_round(state: &mut [u32; STATE_WORDS], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// 20 rounds (10 column/diagonal double rounds), no feed-forward.
fn permute(state: &mut [u32; STATE_WORDS]) {
    for _ in 0..10 {
        // column rounds
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        // diagonal rounds
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

/// Derive a 256-bit subkey from a key and a 16-byte nonce prefix.
///
/// State layout matches the keystream generator (constants, key, then
/// the 16 input bytes where counter and nonce would sit), but the
/// permuted state is *not* added back to the initial state. Words
/// {0, 1, 2, 3, 12, 13, 14, 15} are serialized little-endian as the
/// subkey. Distinct prefixes yield computationally independent subkeys,
/// which is what makes random 192-bit nonces safe.
#[must_use]
pub fn hchacha20(key: &[u8; KEY_SIZE], input: &[u8; HCHACHA_INPUT_SIZE]) -> [u8; 32] {
    let mut state = [0u32; STATE_WORDS];
    state[..4].copy_from_slice(&CONSTANTS);

    for (v, chunk) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
        *v = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for (v, chunk) in state[12..16].iter_mut().zip(input.chunks_exact(4)) {
        *v = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    permute(&mut state);

    let mut output = [0u8; 32];
    for (chunk, v) in output[..16].chunks_exact_mut(4).zip(&state[..4]) {
        chunk.copy_from_slice(&v.to_le_bytes());
    }
    for (chunk, v) in output[16..].chunks_exact_mut(4).zip(&state[12..]) {
        chunk.copy_from_slice(&v.to_le_bytes());
    }

    state.zeroize();
    output
}

/// ChaCha20 keystream generator (RFC 8439 flavor: 32-bit block counter,
/// 96-bit nonce).
///
/// The state is scrubbed on drop; keystream blocks are scrubbed after
/// they are XORed into the caller's buffer.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ChaCha20 {
    state: [u32; STATE_WORDS],
}

impl ChaCha20 {
    /// Initialize from key, nonce and starting block counter.
    #[must_use]
    pub fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], counter: u32) -> Self {
        let mut state = [0u32; STATE_WORDS];
        state[..4].copy_from_slice(&CONSTANTS);

        for (v, chunk) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
            *v = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        state[12] = counter;
        for (v, chunk) in state[13..16].iter_mut().zip(nonce.chunks_exact(4)) {
            *v = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Self { state }
    }

    /// Produce the 64-byte block for the given counter: permute, add the
    /// initial state word-by-word (the feed-forward HChaCha20 omits),
    /// serialize little-endian.
    fn block(&self, counter: u32) -> [u8; BLOCK_SIZE] {
        let mut initial = self.state;
        initial[12] = counter;

        let mut working = initial;
        permute(&mut working);

        for (w, i) in working.iter_mut().zip(initial.iter()) {
            *w = w.wrapping_add(*i);
        }

        let mut output = [0u8; BLOCK_SIZE];
        for (chunk, v) in output.chunks_exact_mut(4).zip(&working) {
            chunk.copy_from_slice(&v.to_le_bytes());
        }

        working.zeroize();
        initial.zeroize();
        output
    }

    /// The keystream block at this generator's starting counter.
    #[must_use]
    pub fn keystream_block(&self) -> [u8; BLOCK_SIZE] {
        self.block(self.state[12])
    }

    /// XOR the keystream into `data`, consuming one counter value per
    /// 64-byte block starting at this generator's counter.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::CounterOverflow` if the input needs more
    /// blocks than the 32-bit counter has left. The check runs before
    /// any byte is touched; the counter never silently wraps.
    pub fn apply_keystream(&self, data: &mut [u8]) -> Result<(), CryptoError> {
        let blocks = data.len().div_ceil(BLOCK_SIZE) as u64;
        if u64::from(self.state[12]) + blocks > 1 << 32 {
            return Err(CryptoError::CounterOverflow);
        }

        let mut counter = self.state[12];
        for chunk in data.chunks_mut(BLOCK_SIZE) {
            let mut keystream = self.block(counter);
            for (byte, k) in chunk.iter_mut().zip(keystream.iter()) {
                *byte ^= k;
            }
            keystream.zeroize();
            counter = counter.wrapping_add(1);
        }

        Ok(())
    }
}
