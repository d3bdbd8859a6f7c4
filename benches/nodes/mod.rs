//! Benchmarks for operators executed against a port store.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use trigger_dsp::graph::{
    vertex::names, AnyOperator, BuildParams, NodeKind, Operator, OperatorSettings, PortBinder,
    PortData, VertexBindings,
};

use crate::BLOCK_SIZES;

pub fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("nodes/chain");

    for &size in BLOCK_SIZES {
        let settings = OperatorSettings::new(48_000.0, size).unwrap();
        let mut data = PortData::new();
        let clock = data.trigger(size);

        // click -> rzero -> reflect, wired by output names
        let mut chain: Vec<AnyOperator> = Vec::new();
        let mut inputs = VertexBindings::new();
        inputs.bind(names::IN, clock);
        for kind in [NodeKind::Click, NodeKind::RZero, NodeKind::Reflect] {
            let params = BuildParams::new(settings, &inputs).unwrap();
            let op = kind.create(&params, &mut data).unwrap();
            let mut outputs = VertexBindings::new();
            op.bind_outputs(&mut outputs);
            inputs = VertexBindings::new();
            inputs.bind_any(names::IN, outputs.get(names::OUT).unwrap());
            chain.push(op);
        }

        let mut timer = {
            let mut inputs = VertexBindings::new();
            inputs.bind(names::IN, clock);
            let params = BuildParams::new(settings, &inputs).unwrap();
            NodeKind::Timer.create(&params, &mut data).unwrap()
        };

        group.bench_with_input(BenchmarkId::new("click_rzero_reflect", size), &size, |b, _| {
            b.iter(|| {
                data.advance_triggers();
                if let Some(trigger) = data.get_mut(clock) {
                    let _ = trigger.fire(0);
                }
                for op in chain.iter_mut() {
                    op.execute(black_box(&mut data));
                }
                timer.execute(black_box(&mut data));
            })
        });
    }

    group.finish();
}
