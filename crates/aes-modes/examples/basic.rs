//! Demonstrates an authenticated GCM round trip and a CBC round trip.

use aes_modes::{CbcMode, CipherMode, GcmMode, Intent, VerificationResult};

fn main() {
    let key = b"WellHelloFriends";
    let message = b"attack at dawn, bring snacks";

    // GCM: ciphertext plus a 16-byte tag over message and associated data.
    let nonce = [0x24u8; 12];
    let aad = b"header-v1";
    let gcm = GcmMode::new(key, 128, Intent::Encryption).expect("valid key");
    let mut ciphertext = vec![0u8; gcm.output_len(message.len())];
    let mut tag = [0u8; 16];
    gcm.encrypt(message, &mut ciphertext, &nonce, aad, &mut tag)
        .expect("buffer is sized correctly");

    let mut recovered = vec![0u8; ciphertext.len()];
    let result = gcm
        .decrypt(&ciphertext, &mut recovered, &nonce, aad, &tag)
        .expect("buffer is sized correctly");
    assert_eq!(result, VerificationResult::Consistent);
    assert_eq!(recovered, message);
    println!("GCM round trip verified ({} ciphertext bytes)", ciphertext.len());

    // CBC: padded chaining under a caller-supplied IV.
    let iv = [7u8; 16];
    let mut cbc = CbcMode::new(key, 128, Intent::Encryption).expect("valid key");
    let mut padded = vec![0u8; cbc.output_len(message.len())];
    let written = cbc
        .encrypt(message, &mut padded, Some(&iv))
        .expect("buffer is sized correctly");

    let mut cbc_dec = CbcMode::new(key, 128, Intent::Decryption).expect("valid key");
    let mut plain = vec![0u8; written];
    let length = cbc_dec
        .decrypt(&padded[..written], &mut plain, Some(&iv))
        .expect("padding is intact");
    assert_eq!(&plain[..length], message);
    println!("CBC round trip verified ({written} ciphertext bytes)");
}
