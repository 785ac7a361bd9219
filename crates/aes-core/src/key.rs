//! Key material types for AES.

use thiserror::Error;

use crate::block::Block;

/// Errors raised while validating key material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The requested key size is not one of 128, 192 or 256 bits.
    #[error("unsupported AES key size: {0} bits")]
    UnsupportedKeySize(usize),
    /// The key bytes do not match the declared key size.
    #[error("key is {actual} bytes but the declared size requires {expected}")]
    LengthMismatch {
        /// Byte length the declared size requires.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
    },
}

/// Supported AES key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Maps a bit count onto a key size.
    pub fn from_bits(bits: usize) -> Result<Self, KeyError> {
        match bits {
            128 => Ok(Self::Aes128),
            192 => Ok(Self::Aes192),
            256 => Ok(Self::Aes256),
            other => Err(KeyError::UnsupportedKeySize(other)),
        }
    }

    /// Key size in bits.
    pub const fn bits(self) -> usize {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }

    /// Key length in bytes.
    pub const fn key_len(self) -> usize {
        self.bits() / 8
    }

    /// Number of cipher rounds (Nr).
    pub const fn rounds(self) -> usize {
        match self {
            Self::Aes128 => 10,
            Self::Aes192 => 12,
            Self::Aes256 => 14,
        }
    }

    /// Number of 32-bit words in the raw key (Nk).
    pub(crate) const fn key_words(self) -> usize {
        self.key_len() / 4
    }
}

/// Validated AES key bytes paired with their declared size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AesKey {
    bytes: [u8; 32],
    size: KeySize,
}

impl AesKey {
    /// Wraps raw key bytes, checking them against the declared size.
    pub fn new(bytes: &[u8], size: KeySize) -> Result<Self, KeyError> {
        if bytes.len() != size.key_len() {
            return Err(KeyError::LengthMismatch {
                expected: size.key_len(),
                actual: bytes.len(),
            });
        }
        let mut storage = [0u8; 32];
        storage[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: storage,
            size,
        })
    }

    /// Wraps raw key bytes against a size given in bits.
    pub fn from_bits(bytes: &[u8], bits: usize) -> Result<Self, KeyError> {
        Self::new(bytes, KeySize::from_bits(bits)?)
    }

    /// Declared key size.
    pub fn size(&self) -> KeySize {
        self.size
    }

    /// The raw key bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.size.key_len()]
    }
}

/// Expanded round keys for any supported key size.
///
/// Storage is sized for the largest schedule (15 round keys for AES-256);
/// `rounds` records how many are live. The set never changes once expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys {
    keys: [Block; 15],
    rounds: usize,
}

impl RoundKeys {
    pub(crate) fn new(keys: [Block; 15], rounds: usize) -> Self {
        Self { keys, rounds }
    }

    /// Returns the round key at the requested index (0..=Nr).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.keys[round]
    }

    /// Number of cipher rounds (10, 12 or 14).
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_bit_counts() {
        for bits in [0, 64, 129, 512] {
            assert_eq!(
                KeySize::from_bits(bits),
                Err(KeyError::UnsupportedKeySize(bits))
            );
        }
    }

    #[test]
    fn rejects_mismatched_key_length() {
        let short = [0u8; 15];
        assert_eq!(
            AesKey::new(&short, KeySize::Aes128),
            Err(KeyError::LengthMismatch {
                expected: 16,
                actual: 15
            })
        );
        assert!(AesKey::new(&[0u8; 24], KeySize::Aes192).is_ok());
    }

    #[test]
    fn exposes_only_declared_bytes() {
        let key = AesKey::new(&[7u8; 16], KeySize::Aes128).expect("valid key");
        assert_eq!(key.bytes().len(), 16);
        assert_eq!(key.size().rounds(), 10);
    }
}
