//! Low-level DSP primitives used by the node operators.
//!
//! These components are allocation-free and realtime-safe. They only know
//! about sample slices and trigger offsets; ports, bindings and metadata live
//! in `graph`.

/// Single-sample impulses on trigger.
pub mod click;
/// One-zero recursive filter with carried state.
pub mod rzero;
/// Reflect and wrap waveshapers.
pub mod shaper;
/// Elapsed time between triggers.
pub mod timer;
/// Sparse trigger events and block dispatch.
pub mod trigger;

pub use rzero::{RZeroFilter, SeedPolicy};
pub use timer::{Time, TriggerTimer};
pub use trigger::{Dispatch, Trigger, TriggerWatch};
