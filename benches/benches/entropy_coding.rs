//! Benchmarks for DC/AC entropy coding and stream serialization
//!
//! Run with: cargo bench --bench entropy_coding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use onas::Pipeline;
use onas_bitstream::{StreamHeader, SymbolStream};
use onas_core::{CodecConfig, SampleGrid};
use onas_decoder::{read_stream, EntropyDecoder};
use onas_encoder::{run_length_encode, write_stream, EntropyEncoder};
use onas_transform::{BlockLayout, QuantizedBlock};

fn test_grid(size: u32) -> SampleGrid {
    let n = size as usize;
    let samples = (0..n * n)
        .map(|i| {
            let (x, y) = (i % n, i / n);
            ((x * 255) / n + (y * 7) % 32) as f64
        })
        .collect();
    SampleGrid::from_vec(size, size, samples).unwrap()
}

fn quantized_blocks(grid: &SampleGrid, factor: f64) -> Vec<QuantizedBlock> {
    let pipeline = Pipeline::new(CodecConfig::new().quantization_factor(factor)).unwrap();
    let quantized = pipeline.partition(grid).unwrap().transform().quantize();
    quantized.blocks().to_vec()
}

fn bench_run_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("AC Run-Length");

    let sparse: Vec<i32> = (0..63).map(|i| if i % 17 == 0 { i - 30 } else { 0 }).collect();
    let dense: Vec<i32> = (0..63).map(|i| (i % 7) - 3).collect();

    group.bench_function("sparse_63", |b| b.iter(|| run_length_encode(black_box(&sparse))));
    group.bench_function("dense_63", |b| b.iter(|| run_length_encode(black_box(&dense))));

    group.finish();
}

fn bench_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Entropy Coding");

    for &size in &[64u32, 256] {
        let grid = test_grid(size);
        let blocks = quantized_blocks(&grid, 1.0);
        let layout = BlockLayout::new(grid.dimensions(), 8).unwrap();
        group.throughput(Throughput::Elements(blocks.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &size, |b, _| {
            b.iter(|| EntropyEncoder::new().encode(black_box(&blocks)).unwrap());
        });

        let stream: SymbolStream = EntropyEncoder::new().encode(&blocks).unwrap();
        group.bench_with_input(BenchmarkId::new("decode", size), &size, |b, _| {
            b.iter(|| EntropyDecoder::new().decode(black_box(&stream), &layout).unwrap());
        });

        let header = StreamHeader::new(grid.dimensions(), 1.0);
        group.bench_with_input(BenchmarkId::new("write_stream", size), &size, |b, _| {
            b.iter(|| {
                let mut bytes = Vec::new();
                write_stream(&header, black_box(&stream), &mut bytes).unwrap();
                bytes
            });
        });

        let mut bytes = Vec::new();
        write_stream(&header, &stream, &mut bytes).unwrap();
        group.bench_with_input(BenchmarkId::new("read_stream", size), &size, |b, _| {
            b.iter(|| {
                read_stream(black_box(bytes.as_slice()), |_| Ok(layout.block_count()), 63).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_run_length, bench_encode_decode);
criterion_main!(benches);
