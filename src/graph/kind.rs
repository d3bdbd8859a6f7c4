//! Closed set of node kinds and the operator sum type.
//!
//! Hosts that don't know the concrete operator type at compile time build
//! through [`NodeKind::create`] and drive the resulting [`AnyOperator`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::graph::click::{self, ClickOperator};
use crate::graph::node::{BuildParams, Operator, PortBinder, VertexBindings};
use crate::graph::port::PortData;
use crate::graph::registry::ClassDescriptor;
use crate::graph::rzero::{self, RZeroOperator};
use crate::graph::shaper::{self, ReflectOperator, WrapOperator};
use crate::graph::timer::{self, TimerOperator};
use crate::graph::vertex::VertexInterface;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Click,
    Timer,
    RZero,
    Reflect,
    Wrap,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Click,
        NodeKind::Timer,
        NodeKind::RZero,
        NodeKind::Reflect,
        NodeKind::Wrap,
    ];

    pub fn name(self) -> &'static str {
        self.class().display_name
    }

    pub fn class(self) -> &'static ClassDescriptor {
        match self {
            NodeKind::Click => &click::CLASS,
            NodeKind::Timer => &timer::CLASS,
            NodeKind::RZero => &rzero::CLASS,
            NodeKind::Reflect => &shaper::REFLECT_CLASS,
            NodeKind::Wrap => &shaper::WRAP_CLASS,
        }
    }

    pub fn vertex_interface(self) -> &'static VertexInterface {
        self.class().interface
    }

    /// Build an operator of this kind, allocating defaults and outputs in `data`.
    pub fn create(self, params: &BuildParams<'_>, data: &mut PortData) -> Result<AnyOperator, BuildError> {
        let op = match self {
            NodeKind::Click => AnyOperator::Click(ClickOperator::create(params, data)?),
            NodeKind::Timer => AnyOperator::Timer(TimerOperator::create(params, data)?),
            NodeKind::RZero => AnyOperator::RZero(RZeroOperator::create(params, data)?),
            NodeKind::Reflect => AnyOperator::Reflect(ReflectOperator::create(params, data)?),
            NodeKind::Wrap => AnyOperator::Wrap(WrapOperator::create(params, data)?),
        };

        tracing::debug!(
            node = self.name(),
            block_size = params.settings().block_size,
            seed = ?params.seed(),
            "operator built"
        );
        Ok(op)
    }
}

#[derive(Debug)]
pub enum AnyOperator {
    Click(ClickOperator),
    Timer(TimerOperator),
    RZero(RZeroOperator),
    Reflect(ReflectOperator),
    Wrap(WrapOperator),
}

impl AnyOperator {
    pub fn kind(&self) -> NodeKind {
        match self {
            AnyOperator::Click(_) => NodeKind::Click,
            AnyOperator::Timer(_) => NodeKind::Timer,
            AnyOperator::RZero(_) => NodeKind::RZero,
            AnyOperator::Reflect(_) => NodeKind::Reflect,
            AnyOperator::Wrap(_) => NodeKind::Wrap,
        }
    }

    /// Blocks seen with more than one trigger, for trigger-driven kinds.
    pub fn overlapping_blocks(&self) -> Option<u64> {
        match self {
            AnyOperator::Click(op) => Some(op.overlapping_blocks()),
            AnyOperator::Timer(op) => Some(op.overlapping_blocks()),
            _ => None,
        }
    }
}

impl PortBinder for AnyOperator {
    fn bind_inputs(&self, inputs: &mut VertexBindings) {
        match self {
            AnyOperator::Click(op) => op.bind_inputs(inputs),
            AnyOperator::Timer(op) => op.bind_inputs(inputs),
            AnyOperator::RZero(op) => op.bind_inputs(inputs),
            AnyOperator::Reflect(op) => op.bind_inputs(inputs),
            AnyOperator::Wrap(op) => op.bind_inputs(inputs),
        }
    }

    fn bind_outputs(&self, outputs: &mut VertexBindings) {
        match self {
            AnyOperator::Click(op) => op.bind_outputs(outputs),
            AnyOperator::Timer(op) => op.bind_outputs(outputs),
            AnyOperator::RZero(op) => op.bind_outputs(outputs),
            AnyOperator::Reflect(op) => op.bind_outputs(outputs),
            AnyOperator::Wrap(op) => op.bind_outputs(outputs),
        }
    }
}

impl Operator for AnyOperator {
    #[inline]
    fn execute(&mut self, data: &mut PortData) {
        match self {
            AnyOperator::Click(op) => op.execute(data),
            AnyOperator::Timer(op) => op.execute(data),
            AnyOperator::RZero(op) => op.execute(data),
            AnyOperator::Reflect(op) => op.execute(data),
            AnyOperator::Wrap(op) => op.execute(data),
        }
    }
}
