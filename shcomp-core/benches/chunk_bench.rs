//! Chunk codec throughput benchmarks.
//!
//! Measures how fast a stream is cut into chunks for byte-aligned and
//! unaligned widths, and how fast chunks are written back.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use shcomp_core::{BitReader, BitWriter, ChunkCodec, ChunkConfig};
use std::hint::black_box;
use std::io::Cursor;

/// Reproducible pseudo-random input.
fn random(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        // Linear congruential generator
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

const WIDTHS: &[u16] = &[1, 4, 7, 8, 12, 16, 33];

fn bench_read_chunks(c: &mut Criterion) {
    let data = random(64 * 1024);
    let mut group = c.benchmark_group("read_chunk");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for &width in WIDTHS {
        let codec = ChunkCodec::new(ChunkConfig::new(width)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(width), &data, |b, data| {
            let mut buf = vec![0u8; codec.config().packed_len()];
            b.iter(|| {
                let mut reader = BitReader::new(Cursor::new(data.as_slice()));
                let mut bits = 0u64;
                loop {
                    let n = codec.read_chunk(&mut reader, &mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    bits += n as u64;
                }
                black_box(bits)
            });
        });
    }

    group.finish();
}

fn bench_write_chunks(c: &mut Criterion) {
    let data = random(64 * 1024);
    let mut group = c.benchmark_group("write_chunk");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for &width in &[4u16, 8, 12] {
        let codec = ChunkCodec::new(ChunkConfig::new(width)).unwrap();
        let mut reader = BitReader::new(Cursor::new(data.as_slice()));
        let chunks: Vec<_> = codec.chunks(&mut reader).map(|c| c.unwrap()).collect();

        group.bench_with_input(BenchmarkId::from_parameter(width), &chunks, |b, chunks| {
            b.iter(|| {
                let mut output = Vec::with_capacity(data.len());
                {
                    let mut writer = BitWriter::new(&mut output);
                    for chunk in chunks {
                        codec.write_value(&mut writer, chunk).unwrap();
                    }
                    writer.finish().unwrap();
                }
                black_box(output)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_read_chunks, bench_write_chunks);
criterion_main!(benches);
