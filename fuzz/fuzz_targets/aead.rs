//! Fuzz target for the AEAD surface
//!
//! Tests that encrypt/decrypt correctly handle arbitrary input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xaead::aead::{AeadKey, Nonce};

#[derive(Debug, Arbitrary)]
struct AeadInput {
    key: [u8; 32],
    nonce: [u8; 24],
    plaintext: Vec<u8>,
    aad: Vec<u8>,
}

fuzz_target!(|input: AeadInput| {
    let key = AeadKey::new(input.key);
    let nonce = Nonce::from_bytes(input.nonce);

    // Fuzz encryption - should never panic
    if let Ok(ciphertext) = key.encrypt(&nonce, &input.plaintext, &input.aad) {
        // If encryption succeeded, decryption with same params must roundtrip
        let plaintext = key
            .decrypt(&nonce, &ciphertext, &input.aad)
            .expect("roundtrip decryption failed");
        assert_eq!(plaintext, input.plaintext);
    }

    // Fuzz decryption with arbitrary data - should never panic
    let _ = key.decrypt(&nonce, &input.plaintext, &input.aad);
});
