//! Counter (CTR) mode.

use aes_core::{encrypt_block, expand_key, AesKey, Block, RoundKeys, BLOCK_SIZE};

use crate::error::CipherError;
use crate::mode::{CipherMode, Intent};

/// Increments a 16-byte big-endian counter by one.
///
/// The carry propagates through the whole block and wraps silently from the
/// all-0xFF state to all zero. The counter stays in byte-array form; it is
/// never narrowed to a native integer.
pub fn increment(counter: &mut Block) {
    for byte in counter.iter_mut().rev() {
        let (next, carry) = byte.overflowing_add(1);
        *byte = next;
        if !carry {
            break;
        }
    }
}

/// AES in counter mode.
///
/// The instance owns a 16-byte counter that advances one per block across
/// calls: passing `Some(counter)` loads a fresh value, `None` continues from
/// where the previous call stopped. The full 16 bytes are one opaque
/// counter; embedding a nonce in its leading bytes is the caller's layout
/// decision.
pub struct CtrMode {
    round_keys: RoundKeys,
    counter: Block,
    intent: Intent,
}

impl CtrMode {
    /// Builds a CTR instance, expanding the key schedule once.
    pub fn new(key: &[u8], key_bits: usize, intent: Intent) -> Result<Self, CipherError> {
        let key = AesKey::from_bits(key, key_bits)?;
        Ok(Self {
            round_keys: expand_key(&key),
            counter: [0u8; BLOCK_SIZE],
            intent,
        })
    }

    /// Intent the instance was constructed with.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Encrypts `input` into `output`, returning the bytes written.
    ///
    /// Each 16-byte unit (including a partial tail) is XORed with the
    /// encrypted counter; output length always equals input length.
    pub fn encrypt(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        counter: Option<&Block>,
    ) -> Result<usize, CipherError> {
        if output.len() < input.len() {
            return Err(CipherError::BufferSize {
                required: input.len(),
                actual: output.len(),
            });
        }
        if let Some(counter) = counter {
            self.counter = *counter;
        }

        for (in_chunk, out_chunk) in input.chunks(BLOCK_SIZE).zip(output.chunks_mut(BLOCK_SIZE)) {
            let keystream = encrypt_block(&self.counter, &self.round_keys);
            for ((dst, &src), &ks) in out_chunk.iter_mut().zip(in_chunk).zip(keystream.iter()) {
                *dst = src ^ ks;
            }
            increment(&mut self.counter);
        }

        Ok(input.len())
    }

    /// Decrypts `input` into `output`; the identical keystream operation.
    pub fn decrypt(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        counter: Option<&Block>,
    ) -> Result<usize, CipherError> {
        self.encrypt(input, output, counter)
    }
}

impl CipherMode for CtrMode {
    fn new(key: &[u8], key_bits: usize, intent: Intent) -> Result<Self, CipherError> {
        CtrMode::new(key, key_bits, intent)
    }

    fn name(&self) -> &'static str {
        "AES_CTR"
    }

    fn output_len(&self, input_len: usize) -> usize {
        input_len
    }
}
