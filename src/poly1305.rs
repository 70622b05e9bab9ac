//! Poly1305 one-time authenticator.
//!
//! 130-bit prime-field MAC over 16-byte blocks, per RFC 8439. The
//! accumulator is held in five 32-bit limbs; multiplication folds the
//! high limbs back with the 2^130 = 5 (mod p) identity so reduction
//! never branches on the accumulator. The key must be used for exactly
//! one message.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Poly1305 key size (32 bytes: clamped r, then s).
pub const KEY_SIZE: usize = 32;

/// Poly1305 block and tag size (16 bytes).
pub const BLOCK_SIZE: usize = 16;

/// Incremental Poly1305 state. Key material and the accumulator are
/// scrubbed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Poly1305 {
    r: [u32; 4],
    s: [u32; 4],
    h: [u32; 5],
    buf: [u8; BLOCK_SIZE],
    buf_len: usize,
}

impl Poly1305 {
    /// Initialize from a 32-byte one-time key, clamping `r`.
    #[must_use]
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let mut r = [0u32; 4];
        let mut s = [0u32; 4];
        for i in 0..4 {
            r[i] = u32::from_le_bytes([key[4 * i], key[4 * i + 1], key[4 * i + 2], key[4 * i + 3]]);
            s[i] = u32::from_le_bytes([
                key[16 + 4 * i],
                key[16 + 4 * i + 1],
                key[16 + 4 * i + 2],
                key[16 + 4 * i + 3],
            ]);
        }
        r[0] &= 0x0fff_ffff;
        r[1] &= 0x0fff_fffc;
        r[2] &= 0x0fff_fffc;
        r[3] &= 0x0fff_fffc;

        Self {
            r,
            s,
            h: [0u32; 5],
            buf: [0u8; BLOCK_SIZE],
            buf_len: 0,
        }
    }

    /// Absorb message bytes.
    pub fn update(&mut self, mut data: &[u8]) {
        if self.buf_len > 0 {
            let take = (BLOCK_SIZE - self.buf_len).min(data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];

            if self.buf_len < BLOCK_SIZE {
                return;
            }
            let block = self.buf;
            self.process_block(&block, 1);
            self.buf_len = 0;
        }

        let mut chunks = data.chunks_exact(BLOCK_SIZE);
        for chunk in chunks.by_ref() {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            self.process_block(&block, 1);
        }

        let rem = chunks.remainder();
        self.buf[..rem.len()].copy_from_slice(rem);
        self.buf_len = rem.len();
    }

    /// Finish: pad the trailing partial block (0x01 terminator, zero
    /// fill), reduce the accumulator mod 2^130 - 5 and add `s` mod
    /// 2^128.
    #[must_use]
    pub fn finalize(mut self) -> [u8; BLOCK_SIZE] {
        if self.buf_len > 0 {
            self.buf[self.buf_len] = 1;
            for byte in &mut self.buf[self.buf_len + 1..] {
                *byte = 0;
            }
            let block = self.buf;
            // terminator already in the buffer, so no high bit here
            self.process_block(&block, 0);
        }

        // probe h + 5 for carry out of bit 130; fold 5 back in iff h >= p
        let mut c = 5u64;
        for limb in &self.h[..4] {
            c += u64::from(*limb);
            c >>= 32;
        }
        c += u64::from(self.h[4]);
        c = (c >> 2) * 5;

        let mut tag = [0u8; BLOCK_SIZE];
        for i in 0..4 {
            c += u64::from(self.h[i]) + u64::from(self.s[i]);
            tag[4 * i..4 * i + 4].copy_from_slice(&(c as u32).to_le_bytes());
            c >>= 32;
        }
        tag
    }

    /// h = (h + block + hibit * 2^128) * r mod 2^130 - 5.
    ///
    /// Schoolbook multiply in 32-bit limbs with 64-bit intermediates;
    /// limbs that would land above 2^128 are pre-multiplied by 5 and
    /// folded into the low limbs (2^130 = 5 mod p). The top limb keeps
    /// at most bit 131, so inputs to the next block stay in range.
    fn process_block(&mut self, block: &[u8; BLOCK_SIZE], hibit: u32) {
        let mut m = [0u32; 4];
        for (v, chunk) in m.iter_mut().zip(block.chunks_exact(4)) {
            *v = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let s0 = u64::from(self.h[0]) + u64::from(m[0]);
        let s1 = u64::from(self.h[1]) + u64::from(m[1]);
        let s2 = u64::from(self.h[2]) + u64::from(m[2]);
        let s3 = u64::from(self.h[3]) + u64::from(m[3]);
        let s4 = u64::from(self.h[4] + hibit);

        let r0 = u64::from(self.r[0]);
        let r1 = u64::from(self.r[1]);
        let r2 = u64::from(self.r[2]);
        let r3 = u64::from(self.r[3]);
        // r1..r3 have their low 2 bits clamped to zero, so (r >> 2) * 5
        // loses nothing; r0's low bits are recovered in x4
        let rr0 = (r0 >> 2) * 5;
        let rr1 = (r1 >> 2) * 5;
        let rr2 = (r2 >> 2) * 5;
        let rr3 = (r3 >> 2) * 5;

        let x0 = s0 * r0 + s1 * rr3 + s2 * rr2 + s3 * rr1 + s4 * rr0;
        let x1 = s0 * r1 + s1 * r0 + s2 * rr3 + s3 * rr2 + s4 * rr1;
        let x2 = s0 * r2 + s1 * r1 + s2 * r0 + s3 * rr3 + s4 * rr2;
        let x3 = s0 * r3 + s1 * r2 + s2 * r1 + s3 * r0 + s4 * rr3;
        let x4 = s4 * (r0 & 3);

        let msb = x4 + (x3 >> 32);
        let mut u = (msb >> 2) * 5;
        u += x0 & 0xffff_ffff;
        self.h[0] = u as u32;
        u >>= 32;
        u += (x1 & 0xffff_ffff) + (x0 >> 32);
        self.h[1] = u as u32;
        u >>= 32;
        u += (x2 & 0xffff_ffff) + (x1 >> 32);
        self.h[2] = u as u32;
        u >>= 32;
        u += (x3 & 0xffff_ffff) + (x2 >> 32);
        self.h[3] = u as u32;
        u >>= 32;
        u += msb & 3;
        self.h[4] = u as u32;
    }
}
