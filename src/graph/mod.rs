//! Graph-facing operators built on the `dsp` primitives.
//!
//! Every node kind declares a static port table, resolves its inputs once at
//! build time into typed references, and then runs block by block against a
//! host-owned [`port::PortData`] store. Nothing here allocates after build.

/// Impulse generator driven by a trigger.
pub mod click;
/// Node kinds and the `AnyOperator` sum type.
pub mod kind;
/// Operator traits, settings and build parameters.
pub mod node;
/// Typed port values and the slot store they live in.
pub mod port;
/// Class descriptors and the process-wide registry.
pub mod registry;
/// One-zero filter node.
pub mod rzero;
/// Reflect and Wrap waveshapers.
pub mod shaper;
/// Interval measurement between triggers.
pub mod timer;
/// Static port tables per node kind.
pub mod vertex;

pub use click::ClickOperator;
pub use kind::{AnyOperator, NodeKind};
pub use node::{BuildParams, Operator, OperatorSettings, PortBinder, VertexBindings};
pub use port::{AnyRef, AudioBuffer, DataRef, DataType, PortData};
pub use rzero::RZeroOperator;
pub use shaper::{ReflectOperator, WrapOperator};
pub use timer::TimerOperator;
