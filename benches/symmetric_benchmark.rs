use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use seal_cipher::prelude::*;
use std::hint::black_box;

const KIBIBYTE: usize = 1024;
const PLAINTEXT_SIZE: usize = 64 * KIBIBYTE;

/// Creates a keyed instance with random IV and a random plaintext buffer.
fn setup(name: &str, mode: Option<BlockMode>) -> CipherInstance {
    let mut cipher = CipherFactory::new().create(name).unwrap();
    cipher.generate_key().unwrap();
    if let Some(mode) = mode {
        cipher.set_block_mode(mode).unwrap();
        cipher.set_rand_iv(cipher.block_size()).unwrap();
    }

    let mut plaintext = vec![0u8; PLAINTEXT_SIZE];
    RandomSource::Rand.fill(&mut plaintext).unwrap();
    cipher.set_plaintext(plaintext);
    cipher
}

fn benchmark_block_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Block Modes");
    group.throughput(Throughput::Bytes(PLAINTEXT_SIZE as u64));

    for (name, mode) in [
        ("aes", BlockMode::Ecb),
        ("aes", BlockMode::Cbc),
        ("aes", BlockMode::Ctr),
        ("blowfish", BlockMode::Cbc),
        ("blowfish", BlockMode::Cfb),
    ] {
        let mut cipher = setup(name, Some(mode));
        group.bench_function(format!("{name}_{}_encrypt", mode.symbol()), |b| {
            b.iter(|| {
                black_box(cipher.encrypt().unwrap());
            });
        });

        cipher.encrypt().unwrap();
        group.bench_function(format!("{name}_{}_decrypt", mode.symbol()), |b| {
            b.iter(|| {
                black_box(cipher.decrypt().unwrap());
            });
        });
    }

    group.finish();
}

fn benchmark_stream_ciphers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stream Ciphers");
    group.throughput(Throughput::Bytes(PLAINTEXT_SIZE as u64));

    for name in ["arc4", "marc4"] {
        let mut cipher = setup(name, None);
        group.bench_function(name, |b| {
            b.iter(|| {
                black_box(cipher.encrypt().unwrap());
            });
        });
    }

    group.finish();
}

/// Measures configuration cost alone: option parsing plus key schedule checks.
fn benchmark_configuration(c: &mut Criterion) {
    let factory = CipherFactory::new();
    let options = CipherOptions::builder()
        .set_key_length(32)
        .set_key_hex("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f")
        .set_iv(vec![0u8; 16])
        .set_block_mode(BlockMode::Cbc)
        .set_padding(Padding::Pkcs)
        .build();

    c.bench_function("create_with_options", |b| {
        b.iter(|| {
            black_box(factory.create_with_options("aes", black_box(&options)).unwrap());
        });
    });
}

criterion_group!(
    benches,
    benchmark_block_modes,
    benchmark_stream_ciphers,
    benchmark_configuration
);
criterion_main!(benches);
