//! Error taxonomy for the operating modes.

use aes_core::KeyError;
use thiserror::Error;

/// Failures surfaced by mode construction and per-call operations.
///
/// GCM authentication outcomes are deliberately absent: tag verification is
/// reported through [`crate::VerificationResult`] so that callers cannot
/// short-circuit the check by catching an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Bad key size or key/size mismatch, rejected at construction.
    #[error("invalid cipher configuration: {0}")]
    Configuration(#[from] KeyError),
    /// CBC ciphertext whose length is not a positive multiple of 16.
    #[error("ciphertext length {len} is not a multiple of the 16-byte block size")]
    Alignment {
        /// Offending ciphertext length.
        len: usize,
    },
    /// CBC decryption found invalid padding in the final block.
    #[error("invalid padding in final block")]
    Padding,
    /// Output region too small for the guaranteed result length.
    #[error("output buffer holds {actual} bytes but {required} are required")]
    BufferSize {
        /// Bytes the operation guarantees to produce.
        required: usize,
        /// Bytes the caller actually supplied.
        actual: usize,
    },
}
