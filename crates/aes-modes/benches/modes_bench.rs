use criterion::{criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_core::{encrypt_block, expand_key, AesKey, KeySize};
use aes_modes::{CbcMode, CipherMode, CtrMode, GcmMode, Intent};

const KEY: [u8; 16] = [0x2bu8; 16];
const BUF_LEN: usize = 1024;

fn bench_block(c: &mut Criterion) {
    let key = AesKey::new(&KEY, KeySize::Aes128).expect("valid key");
    let round_keys = expand_key(&key);
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut block = [0u8; 16];
    rng.fill_bytes(&mut block);

    let mut group = c.benchmark_group("block");
    group.bench_function("encrypt_block", |b| {
        b.iter(|| encrypt_block(&block, &round_keys));
    });
    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let mut data = vec![0u8; BUF_LEN];
    rng.fill_bytes(&mut data);
    let iv = [3u8; 16];
    let nonce = [4u8; 12];

    let mut group = c.benchmark_group("modes");
    group.sample_size(50);

    group.bench_function("cbc_encrypt_1k", |b| {
        let mut cipher = CbcMode::new(&KEY, 128, Intent::Encryption).expect("cipher");
        let mut out = vec![0u8; cipher.output_len(BUF_LEN)];
        b.iter(|| cipher.encrypt(&data, &mut out, Some(&iv)).expect("encrypt"));
    });

    group.bench_function("ctr_encrypt_1k", |b| {
        let mut cipher = CtrMode::new(&KEY, 128, Intent::Encryption).expect("cipher");
        let mut out = vec![0u8; BUF_LEN];
        b.iter(|| cipher.encrypt(&data, &mut out, Some(&iv)).expect("encrypt"));
    });

    group.bench_function("gcm_encrypt_1k", |b| {
        let cipher = GcmMode::new(&KEY, 128, Intent::Encryption).expect("cipher");
        let mut out = vec![0u8; BUF_LEN];
        let mut tag = [0u8; 16];
        b.iter(|| {
            cipher
                .encrypt(&data, &mut out, &nonce, &[], &mut tag)
                .expect("encrypt")
        });
    });

    group.finish();
}

criterion_group!(benches, bench_block, bench_modes);
criterion_main!(benches);
