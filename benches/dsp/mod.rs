//! Benchmarks for block-level DSP primitives.

mod rzero;
mod shaper;
mod trigger;

pub use rzero::bench_rzero;
pub use shaper::bench_shaper;
pub use trigger::bench_trigger;
