//! Benchmarks for reflect and wrap waveshapers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use trigger_dsp::dsp::shaper::{reflect_block, wrap_block};

use crate::BLOCK_SIZES;

pub fn bench_shaper(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/shaper");

    for &size in BLOCK_SIZES {
        // Ramp over [-4, 4) so every fold and wrap branch is taken
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 8.0 - 4.0)
            .collect();
        let mut output = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("reflect", size), &size, |b, _| {
            b.iter(|| reflect_block(black_box(&input), black_box(&mut output)))
        });

        group.bench_with_input(BenchmarkId::new("wrap", size), &size, |b, _| {
            b.iter(|| wrap_block(black_box(&input), black_box(&mut output)))
        });
    }

    group.finish();
}
