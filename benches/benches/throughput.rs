//! RC6 Criterion Benchmark
//!
//! Block cipher latency, mode throughput, Polyval and AEAD end to end.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rc6::{Aead, BlockCipher, Ctr, Dispatch, Ecb, Polyval, Rc6};
use std::hint::black_box;

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn random_bytes(size: usize) -> Vec<u8> {
    let mut input = vec![0u8; size];
    rand::rng().fill(&mut input[..]);
    input
}

// =============================================================================
// BENCHMARK 1: BLOCK CIPHER
// =============================================================================

/// Key schedule and single-block latency for both word widths.
fn bench_block_cipher(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Block-Cipher");
    let key = [0x42u8; 16];

    let narrow = Rc6::<u32>::default();
    let wide = Rc6::<u64>::default();

    group.bench_function("key-schedule-32", |b| {
        b.iter(|| narrow.key_schedule(black_box(&key)).unwrap())
    });
    group.bench_function("key-schedule-64", |b| {
        b.iter(|| wide.key_schedule(black_box(&key)).unwrap())
    });

    let narrow_schedule = narrow.expand_key(&key).unwrap();
    let mut block = [0u8; 16];
    group.throughput(Throughput::Bytes(16));
    group.bench_function("encrypt-block-32", |b| {
        b.iter(|| narrow.encrypt_block_with(&narrow_schedule, black_box(&mut block)))
    });

    let wide_schedule = wide.expand_key(&key).unwrap();
    let mut wide_block = [0u8; 32];
    group.throughput(Throughput::Bytes(32));
    group.bench_function("encrypt-block-64", |b| {
        b.iter(|| wide.encrypt_block_with(&wide_schedule, black_box(&mut wide_block)))
    });
    group.finish();
}

// =============================================================================
// BENCHMARK 2: MODES
// =============================================================================

/// ECB and sequential CTR throughput.
fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Modes");
    let key = [7u8; 16];
    let tag = [9u8; 16];
    let ecb = Ecb::new(Rc6::<u32>::default());
    let ctr = Ctr::new(Rc6::<u32>::default());

    let sizes = [(KB, "1KB"), (64 * KB, "64KB"), (MB, "1MB")];

    for (size, name) in sizes {
        let mut input = random_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_function(BenchmarkId::new("ecb", name), |b| {
            b.iter(|| ecb.encrypt(black_box(&mut input), &key).unwrap())
        });
        group.bench_function(BenchmarkId::new("ctr", name), |b| {
            b.iter(|| ctr.crypt(black_box(&mut input), &key, &tag).unwrap())
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: POLYVAL
// =============================================================================

/// Universal hash throughput.
fn bench_polyval(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Polyval");
    let key = [0x25u8; 16];

    for (size, name) in [(64, "64B"), (4 * KB, "4KB"), (MB, "1MB")] {
        let input = random_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let mut polyval = Polyval::new(&key);
                polyval.update(black_box(data));
                polyval.digest()
            })
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 4: AEAD
// =============================================================================

/// Seal and open end to end, including key derivation.
fn bench_aead(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-AEAD");
    group.sample_size(50);

    let kgk = [0x11u8; 16];
    let nonce = [0x22u8; 12];
    let aead = Aead::<u32>::new(&kgk).unwrap();

    for (size, name) in [(64, "64B"), (4 * KB, "4KB"), (MB, "1MB"), (16 * MB, "16MB")] {
        let input = random_bytes(size);
        let sealed = aead.seal_with_nonce(&input, b"", &nonce).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("seal", name), &input, |b, data| {
            b.iter(|| aead.seal_with_nonce(black_box(data), b"", &nonce).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("open", name), &sealed, |b, data| {
            b.iter(|| aead.open_with_nonce(black_box(data), b"", &nonce).unwrap())
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 5: THREAD SCALING
// =============================================================================

/// Parallel CTR scaling using Rayon (1 to N threads).
#[cfg(feature = "multithread")]
fn bench_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("5-Thread-Scaling");
    group.sample_size(50);

    let size = 16 * MB;
    let mut input = random_bytes(size);
    let ctr = Ctr::new(Rc6::<u32>::default());
    group.throughput(Throughput::Bytes(size as u64));

    let max_threads = num_cpus::get();
    let thread_counts: Vec<usize> = [1, 2, 4, 8, 16, 32]
        .iter()
        .copied()
        .filter(|&t| t <= max_threads)
        .collect();

    for threads in thread_counts {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}threads", threads)),
            &threads,
            |b, &t| {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(t)
                    .build()
                    .unwrap();
                pool.install(|| {
                    b.iter(|| {
                        ctr.crypt_with(black_box(&mut input), &[1u8; 16], &[2u8; 16], Dispatch::Parallel)
                            .unwrap()
                    })
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// MAIN
// =============================================================================

criterion_group!(benches, bench_block_cipher, bench_modes, bench_polyval, bench_aead,);

#[cfg(feature = "multithread")]
criterion_group!(benches_multithread, bench_thread_scaling,);

#[cfg(feature = "multithread")]
criterion_main!(benches, benches_multithread);

#[cfg(not(feature = "multithread"))]
criterion_main!(benches);
