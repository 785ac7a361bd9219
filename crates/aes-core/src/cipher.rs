//! AES key schedule and block encryption/decryption.

use core::convert::TryInto;

use crate::block::Block;
use crate::key::{AesKey, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

fn sub_word(word: u32) -> u32 {
    let b0 = sbox((word >> 24) as u8) as u32;
    let b1 = sbox((word >> 16) as u8) as u32;
    let b2 = sbox((word >> 8) as u8) as u32;
    let b3 = sbox(word as u8) as u32;
    (b0 << 24) | (b1 << 16) | (b2 << 8) | b3
}

/// Expands a validated key into its round-key schedule.
///
/// Produces Nr + 1 round keys (11, 13 or 15) following the FIPS-197
/// expansion: every Nk-th word is rotated, substituted and mixed with the
/// round constant, and 256-bit keys substitute the mid-schedule word as well.
pub fn expand_key(key: &AesKey) -> RoundKeys {
    let nk = key.size().key_words();
    let nr = key.size().rounds();
    let total_words = 4 * (nr + 1);

    let mut w = [0u32; 60];
    for (i, chunk) in key.bytes().chunks_exact(4).enumerate() {
        let bytes: [u8; 4] = chunk.try_into().expect("chunk length is four");
        w[i] = u32::from_be_bytes(bytes);
    }

    for i in nk..total_words {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ (u32::from(RCON[i / nk - 1]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let mut round_keys = [[0u8; 16]; 15];
    for (round, key_block) in round_keys.iter_mut().enumerate().take(nr + 1) {
        for (word_idx, slot) in key_block.chunks_exact_mut(4).enumerate() {
            slot.copy_from_slice(&w[round * 4 + word_idx].to_be_bytes());
        }
    }

    RoundKeys::new(round_keys, nr)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    let rounds = round_keys.rounds();

    add_round_key(&mut state, round_keys.get(0));

    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(rounds));

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    let rounds = round_keys.rounds();

    add_round_key(&mut state, round_keys.get(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, round_keys.get(0));

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{AesKey, KeySize};
    use rand::RngCore;

    // FIPS-197 Appendix C example vectors; one plaintext, one key per size.
    const PLAIN: Block = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];

    const KEY_128: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const CIPHER_128: Block = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    const KEY_192: [u8; 24] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17,
    ];
    const CIPHER_192: Block = [
        0xdd, 0xa9, 0x7c, 0xa4, 0x86, 0x4c, 0xdf, 0xe0, 0x6e, 0xaf, 0x70, 0xa0, 0xec, 0x0d, 0x71,
        0x91,
    ];

    const KEY_256: [u8; 32] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
        0x1e, 0x1f,
    ];
    const CIPHER_256: Block = [
        0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b, 0x49, 0x60,
        0x89,
    ];

    #[test]
    fn encrypt_matches_fips_vectors() {
        let cases: [(&[u8], KeySize, Block); 3] = [
            (&KEY_128, KeySize::Aes128, CIPHER_128),
            (&KEY_192, KeySize::Aes192, CIPHER_192),
            (&KEY_256, KeySize::Aes256, CIPHER_256),
        ];
        for (key_bytes, size, expected) in cases {
            let key = AesKey::new(key_bytes, size).expect("valid key");
            let round_keys = expand_key(&key);
            assert_eq!(encrypt_block(&PLAIN, &round_keys), expected);
        }
    }

    #[test]
    fn decrypt_matches_fips_vectors() {
        let cases: [(&[u8], KeySize, Block); 3] = [
            (&KEY_128, KeySize::Aes128, CIPHER_128),
            (&KEY_192, KeySize::Aes192, CIPHER_192),
            (&KEY_256, KeySize::Aes256, CIPHER_256),
        ];
        for (key_bytes, size, ciphertext) in cases {
            let key = AesKey::new(key_bytes, size).expect("valid key");
            let round_keys = expand_key(&key);
            assert_eq!(decrypt_block(&ciphertext, &round_keys), PLAIN);
        }
    }

    #[test]
    fn round_key_counts_per_size() {
        for (size, rounds) in [
            (KeySize::Aes128, 10),
            (KeySize::Aes192, 12),
            (KeySize::Aes256, 14),
        ] {
            let key = AesKey::new(&vec![0u8; size.key_len()], size).expect("valid key");
            assert_eq!(expand_key(&key).rounds(), rounds);
        }
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for size in [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256] {
            for _ in 0..50 {
                let mut key_bytes = vec![0u8; size.key_len()];
                let mut block = [0u8; 16];
                rng.fill_bytes(&mut key_bytes);
                rng.fill_bytes(&mut block);
                let key = AesKey::new(&key_bytes, size).expect("valid key");
                let rks = expand_key(&key);
                let ct = encrypt_block(&block, &rks);
                let pt = decrypt_block(&ct, &rks);
                assert_eq!(pt, block);
            }
        }
    }
}
