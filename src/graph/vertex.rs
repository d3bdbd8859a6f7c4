//! Port configuration tables.
//!
//! Each node kind declares its ports once, as a static table of
//! `{name, type, default, description}` rows. The same table drives the
//! declared vertex interface, default creation at build time and the
//! operator's bind step, so a port name is spelled in exactly one place.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::dsp::Time;
use crate::graph::port::{AnyRef, AudioBuffer, DataType, PortData};
use names::{A, IN, OUT};

/// Shared port names.
pub mod names {
    pub const IN: &str = "In";
    pub const OUT: &str = "Out";
    pub const A: &str = "A";
}

/// Value a port starts from when nothing is connected.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortDefault {
    /// Silent audio block.
    Silence,
    /// Trigger that never fires.
    Never,
    Float(f32),
    Time(f64),
}

impl PortDefault {
    /// Allocate the default value in `data`, sized for `block_size`.
    pub fn create(self, block_size: usize, data: &mut PortData) -> AnyRef {
        match self {
            PortDefault::Silence => data.insert(AudioBuffer::new(block_size)).into(),
            PortDefault::Never => data.trigger(block_size).into(),
            PortDefault::Float(value) => data.float(value).into(),
            PortDefault::Time(seconds) => data.time(Time::from_seconds(seconds)).into(),
        }
    }
}

/// One row of a port table.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortSpec {
    pub name: &'static str,
    pub data_type: DataType,
    pub default: PortDefault,
    pub description: &'static str,
}

impl PortSpec {
    pub const fn new(
        name: &'static str,
        data_type: DataType,
        default: PortDefault,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            data_type,
            default,
            description,
        }
    }
}

/// Ordered input and output ports of one node kind.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInterface {
    pub node: &'static str,
    pub inputs: &'static [PortSpec],
    pub outputs: &'static [PortSpec],
}

impl VertexInterface {
    pub fn input(&self, name: &str) -> Option<&'static PortSpec> {
        self.inputs.iter().find(|spec| spec.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&'static PortSpec> {
        self.outputs.iter().find(|spec| spec.name == name)
    }
}

pub static CLICK: VertexInterface = VertexInterface {
    node: "Click",
    inputs: &[PortSpec::new(
        IN,
        DataType::Trigger,
        PortDefault::Never,
        "Trigger the 'click' signal",
    )],
    outputs: &[PortSpec::new(
        OUT,
        DataType::Audio,
        PortDefault::Silence,
        "Audio output.",
    )],
};

pub static TIMER: VertexInterface = VertexInterface {
    node: "Timer",
    inputs: &[PortSpec::new(
        IN,
        DataType::Trigger,
        PortDefault::Never,
        "Input trigger which outputs time since last trigger.",
    )],
    outputs: &[PortSpec::new(
        OUT,
        DataType::Time,
        PortDefault::Time(0.0),
        "The time between triggers.",
    )],
};

pub static RZERO: VertexInterface = VertexInterface {
    node: "RZero (Audio)",
    inputs: &[
        PortSpec::new(IN, DataType::Audio, PortDefault::Silence, "Audio input."),
        PortSpec::new(
            A,
            DataType::Float,
            PortDefault::Float(1.0),
            "Coefficient for prior sample. 1.0 for differentiation.",
        ),
    ],
    outputs: &[PortSpec::new(
        OUT,
        DataType::Audio,
        PortDefault::Silence,
        "Audio output.",
    )],
};

pub static REFLECT: VertexInterface = VertexInterface {
    node: "Reflect (Audio)",
    inputs: &[PortSpec::new(
        IN,
        DataType::Audio,
        PortDefault::Silence,
        "Audio input.",
    )],
    outputs: &[PortSpec::new(
        OUT,
        DataType::Audio,
        PortDefault::Silence,
        "Audio output.",
    )],
};

pub static WRAP: VertexInterface = VertexInterface {
    node: "Wrap (Audio)",
    inputs: &[PortSpec::new(
        IN,
        DataType::Audio,
        PortDefault::Silence,
        "Audio input.",
    )],
    outputs: &[PortSpec::new(
        OUT,
        DataType::Audio,
        PortDefault::Silence,
        "Audio output.",
    )],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rzero_coefficient_defaults_to_one() {
        let spec = RZERO.input(A).unwrap();
        assert_eq!(spec.data_type, DataType::Float);
        assert_eq!(spec.default, PortDefault::Float(1.0));
    }

    #[test]
    fn test_lookup_by_name() {
        assert!(CLICK.input(IN).is_some());
        assert!(CLICK.input(A).is_none());
        assert_eq!(TIMER.output(OUT).map(|s| s.data_type), Some(DataType::Time));
    }

    #[test]
    fn test_defaults_create_matching_values() {
        let mut data = PortData::new();
        for interface in [&CLICK, &TIMER, &RZERO, &REFLECT, &WRAP] {
            for spec in interface.inputs.iter().chain(interface.outputs) {
                let r = spec.default.create(64, &mut data);
                let (data_type, frames) = data.describe(r).unwrap();
                assert_eq!(data_type, spec.data_type, "{}.{}", interface.node, spec.name);
                if let Some(frames) = frames {
                    assert_eq!(frames, 64);
                }
            }
        }
    }
}
