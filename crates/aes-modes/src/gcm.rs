//! Galois/Counter mode.

use aes_core::{encrypt_block, expand_key, xor_in_place, AesKey, Block, RoundKeys, BLOCK_SIZE};

use crate::ctr;
use crate::error::CipherError;
use crate::ghash::Ghash;
use crate::mode::{CipherMode, Intent};
use crate::verify::{verify_tag, VerificationResult};

/// AES in Galois/Counter mode.
///
/// Every call is self-contained: nothing chains across calls, so the
/// operations take `&self` and one instance may process many messages, each
/// under its own nonce. Decryption reports tag verification as a
/// [`VerificationResult`] while still producing plaintext; discarding that
/// plaintext on `Inconsistent` is the caller's contract.
pub struct GcmMode {
    round_keys: RoundKeys,
    h: Block,
    intent: Intent,
}

impl GcmMode {
    /// Builds a GCM instance, expanding the key schedule and the hash key
    /// H = E_K(0^128) once.
    pub fn new(key: &[u8], key_bits: usize, intent: Intent) -> Result<Self, CipherError> {
        let key = AesKey::from_bits(key, key_bits)?;
        let round_keys = expand_key(&key);
        let h = encrypt_block(&[0u8; BLOCK_SIZE], &round_keys);
        Ok(Self {
            round_keys,
            h,
            intent,
        })
    }

    /// Intent the instance was constructed with.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Derives the pre-counter block J0 from a nonce of any length.
    ///
    /// A 96-bit nonce is used directly with a trailing 32-bit 1; any other
    /// length is hashed through GHASH per NIST SP 800-38D §7.1.
    fn j0(&self, nonce: &[u8]) -> Block {
        if nonce.len() == 12 {
            let mut block = [0u8; BLOCK_SIZE];
            block[..12].copy_from_slice(nonce);
            block[BLOCK_SIZE - 1] = 1;
            block
        } else {
            let mut hash = Ghash::new(&self.h);
            hash.update(nonce);
            hash.update_lengths(0, nonce.len() as u64 * 8);
            hash.digest()
        }
    }

    /// XORs the counter keystream starting at inc(J0) over `input`.
    fn keystream_xor(&self, j0: &Block, input: &[u8], output: &mut [u8]) {
        let mut counter = *j0;
        for (in_chunk, out_chunk) in input.chunks(BLOCK_SIZE).zip(output.chunks_mut(BLOCK_SIZE)) {
            ctr::increment(&mut counter);
            let keystream = encrypt_block(&counter, &self.round_keys);
            for ((dst, &src), &ks) in out_chunk.iter_mut().zip(in_chunk).zip(keystream.iter()) {
                *dst = src ^ ks;
            }
        }
    }

    /// GHASH over (AAD, ciphertext, lengths), whitened with E_K(J0).
    fn auth_tag(&self, j0: &Block, aad: &[u8], ciphertext: &[u8]) -> Block {
        let mut hash = Ghash::new(&self.h);
        hash.update(aad);
        hash.update(ciphertext);
        hash.update_lengths(aad.len() as u64 * 8, ciphertext.len() as u64 * 8);
        let mut tag = hash.digest();
        xor_in_place(&mut tag, &encrypt_block(j0, &self.round_keys));
        tag
    }

    /// Encrypts `plaintext` into `output` and writes the 16-byte
    /// authentication tag over the AAD and ciphertext into `tag`.
    ///
    /// Zero-length plaintext and AAD are both valid; the ciphertext length
    /// always equals the plaintext length.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        output: &mut [u8],
        nonce: &[u8],
        aad: &[u8],
        tag: &mut [u8; BLOCK_SIZE],
    ) -> Result<(), CipherError> {
        if output.len() < plaintext.len() {
            return Err(CipherError::BufferSize {
                required: plaintext.len(),
                actual: output.len(),
            });
        }
        let j0 = self.j0(nonce);
        self.keystream_xor(&j0, plaintext, output);
        *tag = self.auth_tag(&j0, aad, &output[..plaintext.len()]);
        Ok(())
    }

    /// Decrypts `ciphertext` into `output` and verifies `expected_tag`.
    ///
    /// Plaintext is produced unconditionally; the tag comparison covers all
    /// 16 bytes in fixed time and its outcome is returned as data. Callers
    /// must discard the plaintext when the result is
    /// [`VerificationResult::Inconsistent`].
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        output: &mut [u8],
        nonce: &[u8],
        aad: &[u8],
        expected_tag: &[u8; BLOCK_SIZE],
    ) -> Result<VerificationResult, CipherError> {
        if output.len() < ciphertext.len() {
            return Err(CipherError::BufferSize {
                required: ciphertext.len(),
                actual: output.len(),
            });
        }
        let j0 = self.j0(nonce);
        self.keystream_xor(&j0, ciphertext, output);
        let tag = self.auth_tag(&j0, aad, ciphertext);
        Ok(verify_tag(&tag, expected_tag))
    }
}

impl CipherMode for GcmMode {
    fn new(key: &[u8], key_bits: usize, intent: Intent) -> Result<Self, CipherError> {
        GcmMode::new(key, key_bits, intent)
    }

    fn name(&self) -> &'static str {
        "AES_GCM"
    }

    fn output_len(&self, input_len: usize) -> usize {
        input_len
    }
}
