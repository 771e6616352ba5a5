//! Benchmarks for the block transform stages
//!
//! Run with: cargo bench --bench transforms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use onas_core::CodecConfig;
use onas_transform::{
    dct2d_forward, dct2d_forward_direct, dct2d_inverse, zigzag_order, Block, BlockRegion,
    DctBasis, Quantizer, ZigZag,
};

fn pattern(n: usize) -> Vec<f64> {
    (0..n * n).map(|i| ((i * 37 + 11) % 256) as f64).collect()
}

fn bench_dct(c: &mut Criterion) {
    let mut group = c.benchmark_group("DCT Transform");

    for &n in &[4usize, 8, 16, 32] {
        let input = pattern(n);
        let basis = DctBasis::shared(n);

        group.bench_with_input(BenchmarkId::new("separable_forward", n), &n, |b, _| {
            b.iter(|| dct2d_forward(black_box(&input), &basis, &basis));
        });

        let coefficients = dct2d_forward(&input, &basis, &basis);
        group.bench_with_input(BenchmarkId::new("separable_inverse", n), &n, |b, _| {
            b.iter(|| dct2d_inverse(black_box(&coefficients), &basis, &basis));
        });
    }

    // Direct form is O(n^4); keep it to the small sizes
    for &n in &[4usize, 8] {
        let input = pattern(n);
        group.bench_with_input(BenchmarkId::new("direct_forward", n), &n, |b, &n| {
            b.iter(|| dct2d_forward_direct(black_box(&input), n, n));
        });
    }

    group.finish();
}

fn bench_quantization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quantization");

    let region = BlockRegion {
        row: 0,
        col: 0,
        rows: 8,
        cols: 8,
        size: 8,
    };
    let block = Block::new(region, pattern(8).iter().map(|v| v * 4.0 - 512.0).collect());

    for &factor in &[0.5, 1.0, 4.0] {
        let quantizer = Quantizer::new(&CodecConfig::new().quantization_factor(factor));
        group.bench_with_input(BenchmarkId::new("quantize_8x8", factor), &factor, |b, _| {
            b.iter(|| quantizer.quantize(black_box(&block)));
        });
    }

    group.finish();
}

fn bench_zigzag(c: &mut Criterion) {
    let mut group = c.benchmark_group("Zigzag");

    group.bench_function("generate_order_32", |b| {
        b.iter(|| zigzag_order(black_box(32)));
    });

    let zigzag = ZigZag::standard();
    let block: Vec<i32> = (0..64).collect();
    group.bench_function("flatten_8x8", |b| {
        b.iter(|| zigzag.flatten(black_box(&block)));
    });

    group.finish();
}

criterion_group!(benches, bench_dct, bench_quantization, bench_zigzag);
criterion_main!(benches);
