use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mstquant::mst::{MstStrategy, build_mst};
use mstquant::{QuantizeConfig, quantize};
use rgb::RGB8;

fn scattered_colors(n: usize) -> Vec<RGB8> {
    (0..n as u32)
        .map(|i| {
            let h = i.wrapping_mul(2654435761);
            RGB8 {
                r: (h >> 8) as u8,
                g: (h >> 16) as u8,
                b: (h >> 24) as u8,
            }
        })
        .collect()
}

fn bench_mst(c: &mut Criterion) {
    let colors = scattered_colors(2_000);

    c.bench_function("mst_priority_queue_2k", |b| {
        b.iter(|| {
            let tree = build_mst(black_box(&colors), MstStrategy::PriorityQueue);
            black_box(tree.total_weight());
        });
    });

    c.bench_function("mst_dense_2k", |b| {
        b.iter(|| {
            let tree = build_mst(black_box(&colors), MstStrategy::Dense);
            black_box(tree.total_weight());
        });
    });
}

fn bench_quantize(c: &mut Criterion) {
    let (width, height) = (256, 256);
    let pixels: Vec<RGB8> = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            RGB8 {
                r: (x / 8 * 8) as u8,
                g: (y / 8 * 8) as u8,
                b: ((x + y) / 16 * 8) as u8,
            }
        })
        .collect();
    let config = QuantizeConfig::new().clusters(64);

    c.bench_function("quantize_256x256_k64", |b| {
        b.iter(|| {
            let result = quantize(black_box(&pixels), width, height, &config).unwrap();
            black_box(result.mst_weight());
        });
    });
}

criterion_group!(benches, bench_mst, bench_quantize);
criterion_main!(benches);
