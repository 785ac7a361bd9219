//! AES operating modes: CBC, CTR and GCM.
//!
//! Builds the three standard modes on the block transform from `aes-core`:
//! - [`CbcMode`]: chained blocks with CMS padding.
//! - [`CtrMode`]: keystream over a 128-bit big-endian counter.
//! - [`GcmMode`]: counter-mode encryption plus a GHASH authentication tag.
//!
//! A mode instance is constructed from `(key bytes, key size in bits,
//! intent)` and expands the key schedule exactly once. CBC and CTR carry
//! chaining/counter state across calls and therefore take `&mut self`; GCM
//! calls are self-contained. Tag verification on GCM decryption is reported
//! as a [`VerificationResult`], never as an error, and runs in fixed time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cbc;
mod ctr;
mod error;
mod gcm;
mod ghash;
mod mode;
mod padding;
mod verify;

pub use crate::cbc::CbcMode;
pub use crate::ctr::{increment, CtrMode};
pub use crate::error::CipherError;
pub use crate::gcm::GcmMode;
pub use crate::ghash::{gf128_mul, Ghash};
pub use crate::mode::{CipherMode, Intent};
pub use crate::padding::PaddingMode;
pub use crate::verify::VerificationResult;
pub use aes_core::{Block, KeyError, KeySize, BLOCK_SIZE};
