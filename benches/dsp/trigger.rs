//! Benchmarks for trigger span dispatch and click rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use trigger_dsp::dsp::{click::render_clicks, Trigger, TriggerTimer, Time};

use crate::BLOCK_SIZES;

pub fn bench_trigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/trigger");

    for &size in BLOCK_SIZES {
        let idle = Trigger::new(size);
        let mut once = Trigger::new(size);
        once.fire(size / 2).unwrap();
        let mut dense = Trigger::new(size);
        for offset in (0..size).step_by(size / 8) {
            dense.fire(offset).unwrap();
        }

        let mut buffer = vec![0.0f32; size];
        for (name, trigger) in [("click_idle", &idle), ("click_once", &once), ("click_dense", &dense)] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| render_clicks(black_box(&mut buffer), black_box(trigger)))
            });
        }

        let mut timer = TriggerTimer::new();
        let mut out = Time::ZERO;
        group.bench_with_input(BenchmarkId::new("timer_once", size), &size, |b, _| {
            b.iter(|| timer.process(black_box(&once), 48_000.0, &mut out))
        });
    }

    group.finish();
}
