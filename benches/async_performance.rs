//! Async batch benchmarks for subpack
//!
//! Compares compressing many buffers one after another with the bounded
//! concurrent batch processor.

#![cfg(feature = "async")]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;
use subpack::{compress_bytes, AsyncBatchProcessor, CompressOptions, Method};
use tokio::runtime::Runtime;

fn generate_test_data(size: usize, seed: usize) -> Vec<u8> {
    let pattern = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
    pattern
        .iter()
        .copied()
        .cycle()
        .skip(seed % pattern.len())
        .take(size)
        .collect()
}

fn batch_processing_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("async_batch_processing");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for file_count in [4usize, 16] {
        let buffers: Vec<Vec<u8>> = (0..file_count)
            .map(|seed| generate_test_data(16384, seed))
            .collect();
        let total: usize = buffers.iter().map(Vec::len).sum();
        group.throughput(Throughput::Bytes(total as u64));

        let options = CompressOptions::new(Method::Dictionary);
        group.bench_with_input(
            BenchmarkId::new("sequential", file_count),
            &buffers,
            |b, buffers| {
                b.iter(|| {
                    buffers
                        .iter()
                        .map(|data| compress_bytes(black_box(data), &options).unwrap())
                        .collect::<Vec<_>>()
                })
            },
        );

        for concurrency in [2usize, num_cpus::get()] {
            let processor = AsyncBatchProcessor::new()
                .with_concurrency(concurrency)
                .with_options(options.clone());
            group.bench_with_input(
                BenchmarkId::new(format!("concurrent_{concurrency}"), file_count),
                &buffers,
                |b, buffers| {
                    b.iter(|| {
                        rt.block_on(processor.compress_buffers(black_box(buffers.clone())))
                            .unwrap()
                    })
                },
            );
        }
    }

    group.finish();
}

fn spawn_blocking_overhead(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("async_overhead");
    let data = generate_test_data(4096, 0);

    group.bench_function("sync", |b| {
        b.iter(|| compress_bytes(black_box(&data), &CompressOptions::new(Method::Huffman)).unwrap())
    });
    group.bench_function("async", |b| {
        b.iter(|| {
            rt.block_on(subpack::compress_bytes_async(
                black_box(data.clone()),
                CompressOptions::new(Method::Huffman),
            ))
            .unwrap()
        })
    });

    group.finish();
}

criterion_group!(async_benches, batch_processing_benchmark, spawn_blocking_overhead);
criterion_main!(async_benches);
