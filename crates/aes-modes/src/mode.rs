//! Shared surface of the three operating modes.

use crate::error::CipherError;
use aes_core::BLOCK_SIZE;

/// Whether a mode instance was constructed to encrypt or decrypt.
///
/// Recorded at construction; the shared key schedule serves both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// The instance encrypts caller buffers.
    Encryption,
    /// The instance decrypts caller buffers.
    Decryption,
}

/// Construction and sizing surface common to CBC, CTR and GCM.
///
/// Exactly these three modes implement the trait; the selection happens once
/// at construction from the caller's choice.
pub trait CipherMode: Sized {
    /// Builds a mode instance, expanding the key schedule once.
    fn new(key: &[u8], key_bits: usize, intent: Intent) -> Result<Self, CipherError>;

    /// Human-readable mode identifier.
    fn name(&self) -> &'static str;

    /// Cipher block size in bytes, always 16.
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Required output-buffer length for an input of `input_len` bytes.
    ///
    /// Identity for CTR and GCM; the padded length for CBC encryption.
    fn output_len(&self, input_len: usize) -> usize;
}
