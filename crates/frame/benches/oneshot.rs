//! crates/frame/benches/oneshot.rs
//!
//! Benchmarks for single-shot compression and decompression.
//!
//! Run with: `cargo bench -p frame`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use frame::{CompressOptions, CompressionLevel, Compressor, Decompressor};

/// Generate moderately compressible text-like data of the specified size.
fn generate_text_data(size: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog; "
        .iter()
        .copied()
        .cycle()
        .enumerate()
        .map(|(i, b)| if i % 97 == 0 { b'#' } else { b })
        .take(size)
        .collect()
}

/// Benchmark compression into a reused buffer against a fresh allocation per call.
fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for size in [1024, 16 * 1024, 256 * 1024] {
        let data = generate_text_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        let mut compressor = Compressor::new(None).expect("compressor");
        let mut reused = Vec::new();
        group.bench_with_input(BenchmarkId::new("reused", size), &data, |b, data| {
            b.iter(|| black_box(compressor.compress(&mut reused, black_box(data)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("fresh", size), &data, |b, data| {
            b.iter(|| black_box(compressor.compress_to_vec(black_box(data)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark named compression levels on the same input.
fn bench_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_levels");
    let data = generate_text_data(64 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for (name, level) in [
        ("fast", CompressionLevel::Fast),
        ("default", CompressionLevel::Default),
        ("best", CompressionLevel::Best),
    ] {
        let options = CompressOptions::new().with_level(level);
        let mut compressor = Compressor::new(Some(&options)).expect("compressor");
        let mut dst = Vec::new();
        group.bench_function(name, |b| {
            b.iter(|| black_box(compressor.compress(&mut dst, black_box(&data)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark decompression, including the content-size check.
fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for size in [1024, 16 * 1024, 256 * 1024] {
        let data = generate_text_data(size);
        let frame = Compressor::new(None)
            .expect("compressor")
            .compress_to_vec(&data)
            .expect("compress");
        group.throughput(Throughput::Bytes(size as u64));

        let mut d = Decompressor::new(0).expect("decompressor");
        let mut reused = Vec::new();
        group.bench_with_input(BenchmarkId::new("reused", size), &frame, |b, frame| {
            b.iter(|| black_box(d.decompress(&mut reused, black_box(frame)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("fresh", size), &frame, |b, frame| {
            b.iter(|| black_box(d.decompress_to_vec(black_box(frame)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_levels, bench_decompress);
criterion_main!(benches);
