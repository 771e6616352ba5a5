//! End-to-end encoding/decoding benchmarks
//!
//! Run with: cargo bench --bench end_to_end

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use onas::{decode_from_bytes, encode_to_bytes, encode_to_preview, CodecConfig, SampleGrid};

fn create_test_grid(size: u32) -> SampleGrid {
    let n = size as usize;
    let samples = (0..n * n)
        .map(|i| {
            let (x, y) = (i % n, i / n);
            ((x * 255) / n) as f64 * 0.75 + ((y * 255) / n) as f64 * 0.25
        })
        .collect();
    SampleGrid::from_vec(size, size, samples).unwrap()
}

fn bench_encode_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Encode by Image Size");

    for &size in &[64u32, 128, 256, 512] {
        let grid = create_test_grid(size);
        group.throughput(Throughput::Elements(u64::from(size * size)));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| encode_to_bytes(black_box(&grid), CodecConfig::default()).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_decode_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode by Image Size");

    for &size in &[64u32, 128, 256, 512] {
        let grid = create_test_grid(size);
        let bytes = encode_to_bytes(&grid, CodecConfig::default()).unwrap();
        group.throughput(Throughput::Elements(u64::from(size * size)));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| decode_from_bytes(black_box(&bytes)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_preview_by_block_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Preview by Block Size");
    let grid = create_test_grid(256);

    for &block_size in &[4usize, 8, 16, 32] {
        let config = CodecConfig::new().block_size(block_size);
        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                b.iter(|| encode_to_preview(black_box(&grid), config).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_by_size,
    bench_decode_by_size,
    bench_preview_by_block_size
);
criterion_main!(benches);
