//! Benchmarks for the one-zero filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use trigger_dsp::dsp::{rzero::rzero_block, RZeroFilter, SeedPolicy};

use crate::BLOCK_SIZES;

pub fn bench_rzero(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/rzero");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut output = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("block", size), &size, |b, _| {
            b.iter(|| rzero_block(black_box(&input), black_box(&mut output), 0.95, 0.0))
        });

        let mut filter = RZeroFilter::new(SeedPolicy::Zero);
        group.bench_with_input(BenchmarkId::new("filter", size), &size, |b, _| {
            b.iter(|| filter.render(black_box(&input), black_box(&mut output), 1.0))
        });
    }

    group.finish();
}
