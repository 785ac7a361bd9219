//! AES key schedule and block transform for the cipher-mode crates.
//!
//! This crate intentionally mirrors the FIPS-197 specification and provides:
//! - Key schedule for AES-128, AES-192 and AES-256.
//! - Single-block encryption and decryption.
//! - Public types shared across the workspace.
//!
//! The block transform is a pure function of (round keys, one block); the
//! modes crate layers chaining, counters and authentication on top. S-box
//! lookups are table-based and not hardened against cache-timing channels.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod round;
mod sbox;

pub use crate::block::{xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key};
pub use crate::key::{AesKey, KeyError, KeySize, RoundKeys};
