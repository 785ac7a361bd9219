//! Cipher-block chaining mode.

use aes_core::{
    decrypt_block, encrypt_block, expand_key, xor_in_place, AesKey, Block, RoundKeys, BLOCK_SIZE,
};

use crate::error::CipherError;
use crate::mode::{CipherMode, Intent};
use crate::padding::{self, PaddingMode};

/// AES in CBC mode.
///
/// The chaining block persists across calls on the same instance: passing
/// `Some(iv)` (re)initializes it, `None` continues the running chain. One
/// instance therefore serves one logical stream; concurrent use requires an
/// instance per stream.
pub struct CbcMode {
    round_keys: RoundKeys,
    chain: Block,
    padding: PaddingMode,
    intent: Intent,
}

impl CbcMode {
    /// Builds a CBC instance with the default (CMS) padding policy.
    pub fn new(key: &[u8], key_bits: usize, intent: Intent) -> Result<Self, CipherError> {
        Self::with_padding(key, key_bits, intent, PaddingMode::default())
    }

    /// Builds a CBC instance with an explicit padding policy.
    pub fn with_padding(
        key: &[u8],
        key_bits: usize,
        intent: Intent,
        padding: PaddingMode,
    ) -> Result<Self, CipherError> {
        let key = AesKey::from_bits(key, key_bits)?;
        Ok(Self {
            round_keys: expand_key(&key),
            chain: [0u8; BLOCK_SIZE],
            padding,
            intent,
        })
    }

    /// Intent the instance was constructed with.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Padding policy in effect.
    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    /// Encrypts `plaintext` into `output`, returning the ciphertext length.
    ///
    /// The plaintext is padded to the next block boundary (a full pad block
    /// when already aligned), so the result is always `output_len(len)`
    /// bytes; `output` must hold at least that many.
    pub fn encrypt(
        &mut self,
        plaintext: &[u8],
        output: &mut [u8],
        iv: Option<&Block>,
    ) -> Result<usize, CipherError> {
        let required = padding::padded_len(plaintext.len());
        if output.len() < required {
            return Err(CipherError::BufferSize {
                required,
                actual: output.len(),
            });
        }
        if let Some(iv) = iv {
            self.chain = *iv;
        }

        let mut chunks = plaintext.chunks_exact(BLOCK_SIZE);
        let mut offset = 0;
        for chunk in chunks.by_ref() {
            let mut block: Block = chunk.try_into().expect("chunk length is sixteen");
            xor_in_place(&mut block, &self.chain);
            self.chain = encrypt_block(&block, &self.round_keys);
            output[offset..offset + BLOCK_SIZE].copy_from_slice(&self.chain);
            offset += BLOCK_SIZE;
        }

        let tail = chunks.remainder();
        let mut block = [0u8; BLOCK_SIZE];
        block[..tail.len()].copy_from_slice(tail);
        match self.padding {
            PaddingMode::Cms => padding::write_pad(&mut block, tail.len()),
        }
        xor_in_place(&mut block, &self.chain);
        self.chain = encrypt_block(&block, &self.round_keys);
        output[offset..offset + BLOCK_SIZE].copy_from_slice(&self.chain);

        Ok(required)
    }

    /// Decrypts `ciphertext` into `output`, returning the plaintext length.
    ///
    /// The ciphertext must be a positive multiple of 16 bytes. The final
    /// block's padding is validated in fixed time; on a padding failure the
    /// leading `ciphertext.len() - 16` bytes of `output` hold intermediate
    /// data and must be ignored.
    pub fn decrypt(
        &mut self,
        ciphertext: &[u8],
        output: &mut [u8],
        iv: Option<&Block>,
    ) -> Result<usize, CipherError> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CipherError::Alignment {
                len: ciphertext.len(),
            });
        }
        let full = ciphertext.len() - BLOCK_SIZE;
        if output.len() < full {
            return Err(CipherError::BufferSize {
                required: full,
                actual: output.len(),
            });
        }
        if let Some(iv) = iv {
            self.chain = *iv;
        }

        let mut offset = 0;
        let mut last = [0u8; BLOCK_SIZE];
        for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
            let ct_block: Block = chunk.try_into().expect("chunk length is sixteen");
            let mut block = decrypt_block(&ct_block, &self.round_keys);
            xor_in_place(&mut block, &self.chain);
            self.chain = ct_block;
            if offset < full {
                output[offset..offset + BLOCK_SIZE].copy_from_slice(&block);
                offset += BLOCK_SIZE;
            } else {
                last = block;
            }
        }

        let kept = match self.padding {
            PaddingMode::Cms => padding::checked_unpad(&last)?,
        };
        let plaintext_len = full + kept;
        if output.len() < plaintext_len {
            return Err(CipherError::BufferSize {
                required: plaintext_len,
                actual: output.len(),
            });
        }
        output[full..plaintext_len].copy_from_slice(&last[..kept]);
        Ok(plaintext_len)
    }
}

impl CipherMode for CbcMode {
    fn new(key: &[u8], key_bits: usize, intent: Intent) -> Result<Self, CipherError> {
        CbcMode::new(key, key_bits, intent)
    }

    fn name(&self) -> &'static str {
        "AES_CBC"
    }

    fn output_len(&self, input_len: usize) -> usize {
        padding::padded_len(input_len)
    }
}
