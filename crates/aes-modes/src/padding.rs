//! CBC padding policies.

use aes_core::BLOCK_SIZE;

use crate::error::CipherError;

/// Selectable padding policy for CBC.
///
/// Only the CMS value-repeated convention is implemented today; adding a
/// policy means adding a variant here together with its fixtures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaddingMode {
    /// Value N repeated N times, N = 16 − (len mod 16); a full 0x10 block
    /// is appended when the input is already block-aligned.
    #[default]
    Cms,
}

/// Ciphertext length for `len` plaintext bytes under CMS padding.
pub(crate) fn padded_len(len: usize) -> usize {
    len - len % BLOCK_SIZE + BLOCK_SIZE
}

/// Fills the tail of `block` after `used` payload bytes with the pad value.
pub(crate) fn write_pad(block: &mut [u8; BLOCK_SIZE], used: usize) {
    let pad = (BLOCK_SIZE - used) as u8;
    for byte in block.iter_mut().skip(used) {
        *byte = pad;
    }
}

// 0xff when a < b, 0x00 otherwise, without branching.
fn lt_mask(a: u8, b: u8) -> u8 {
    (((a as u16).wrapping_sub(b as u16)) >> 8) as u8
}

// 0xff when a == b, 0x00 otherwise, without branching.
fn eq_mask(a: u8, b: u8) -> u8 {
    let diff = (a ^ b) as u16;
    (diff.wrapping_sub(1) >> 8) as u8
}

/// Validates CMS padding over the final block in fixed time.
///
/// Every byte of the block participates in the scan whatever the claimed pad
/// value, so a forged block costs the same time as a valid one. Returns the
/// number of payload bytes kept from the block.
pub(crate) fn checked_unpad(block: &[u8; BLOCK_SIZE]) -> Result<usize, CipherError> {
    let pad = block[BLOCK_SIZE - 1];
    let out_of_range = lt_mask(BLOCK_SIZE as u8, pad) | eq_mask(pad, 0);

    let mut mismatch = 0u8;
    for (i, &byte) in block.iter().enumerate() {
        let in_pad = !lt_mask(i as u8, (BLOCK_SIZE as u8).wrapping_sub(pad));
        mismatch |= in_pad & (byte ^ pad);
    }

    if out_of_range | mismatch != 0 {
        return Err(CipherError::Padding);
    }
    Ok(BLOCK_SIZE - pad as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_and_unpads_every_payload_length() {
        for used in 0..BLOCK_SIZE {
            let mut block = [0xaau8; BLOCK_SIZE];
            write_pad(&mut block, used);
            assert_eq!(checked_unpad(&block), Ok(used));
        }
    }

    #[test]
    fn rejects_zero_and_oversized_pad_values() {
        let mut block = [0u8; BLOCK_SIZE];
        assert_eq!(checked_unpad(&block), Err(CipherError::Padding));
        block = [0x11u8; BLOCK_SIZE];
        assert_eq!(checked_unpad(&block), Err(CipherError::Padding));
    }

    #[test]
    fn rejects_inconsistent_pad_bytes() {
        let mut block = [0u8; BLOCK_SIZE];
        write_pad(&mut block, 12);
        block[13] ^= 0x01;
        assert_eq!(checked_unpad(&block), Err(CipherError::Padding));
    }

    #[test]
    fn full_pad_block_keeps_nothing() {
        let block = [0x10u8; BLOCK_SIZE];
        assert_eq!(checked_unpad(&block), Ok(0));
    }

    #[test]
    fn padded_len_rounds_to_the_next_block() {
        assert_eq!(padded_len(0), 16);
        assert_eq!(padded_len(15), 16);
        assert_eq!(padded_len(16), 32);
        assert_eq!(padded_len(37), 48);
    }
}
