use crate::dsp::SeedPolicy;
use crate::error::{BuildError, SettingsError};
use crate::graph::port::{AnyRef, DataRef, PortData, PortType};
use crate::graph::vertex::{PortSpec, VertexInterface};
use crate::MAX_BLOCK_SIZE;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-block settings supplied by the host
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - block_size: Frames per block. Fixed for the life of every operator
///   built with these settings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorSettings {
    pub sample_rate: f32,
    pub block_size: usize,
}

impl OperatorSettings {
    pub fn new(sample_rate: f32, block_size: usize) -> Result<Self, SettingsError> {
        let settings = Self {
            sample_rate,
            block_size,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(SettingsError::SampleRate(self.sample_rate));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(SettingsError::BlockSize {
                got: self.block_size,
                max: MAX_BLOCK_SIZE,
            });
        }
        Ok(())
    }

    /// Length of one block in seconds.
    pub fn block_duration(&self) -> f64 {
        self.block_size as f64 / self.sample_rate as f64
    }
}

impl Default for OperatorSettings {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            block_size: 480,
        }
    }
}

/// References listed by port name.
///
/// Hosts fill one of these with resolved inputs before building an operator;
/// operators fill them from `PortBinder` so the host can wire their outputs.
#[derive(Debug, Clone, Default)]
pub struct VertexBindings {
    entries: Vec<(String, AnyRef)>,
}

impl VertexBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to a typed reference, replacing any previous binding.
    pub fn bind<T: PortType>(&mut self, name: &str, r: DataRef<T>) {
        self.bind_any(name, r.into());
    }

    pub fn bind_any(&mut self, name: &str, r: AnyRef) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = r,
            None => self.entries.push((name.to_owned(), r)),
        }
    }

    pub fn get(&self, name: &str) -> Option<AnyRef> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| *r)
    }

    pub fn get_typed<T: PortType>(&self, name: &str) -> Option<DataRef<T>> {
        self.get(name).and_then(AnyRef::downcast)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AnyRef)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reports the references an operator holds, by port name.
pub trait PortBinder {
    fn bind_inputs(&self, inputs: &mut VertexBindings);
    fn bind_outputs(&self, outputs: &mut VertexBindings);
}

/// Runtime instance of a node.
///
/// `execute` is called once per block on the audio thread. It must not
/// allocate, block or fail; `data` is the store the bound references point
/// into.
pub trait Operator: PortBinder + Send {
    fn execute(&mut self, data: &mut PortData);
}

/// Everything needed to construct an operator.
#[derive(Debug, Clone, Copy)]
pub struct BuildParams<'a> {
    settings: OperatorSettings,
    inputs: &'a VertexBindings,
    seed: SeedPolicy,
}

impl<'a> BuildParams<'a> {
    pub fn new(settings: OperatorSettings, inputs: &'a VertexBindings) -> Result<Self, BuildError> {
        settings.validate()?;
        Ok(Self {
            settings,
            inputs,
            seed: SeedPolicy::default(),
        })
    }

    /// Initial-state policy for recursive filters.
    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    pub fn settings(&self) -> &OperatorSettings {
        &self.settings
    }

    pub fn seed(&self) -> SeedPolicy {
        self.seed
    }

    /// Reject bindings for ports the node does not declare.
    pub fn check_inputs(&self, interface: &VertexInterface) -> Result<(), BuildError> {
        match self
            .inputs
            .iter()
            .find(|(name, _)| interface.input(name).is_none())
        {
            Some((name, _)) => Err(BuildError::UnknownPort {
                node: interface.node,
                port: name.to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Resolve an input port: the host's binding if there is one, otherwise a
    /// fresh default from the port table.
    pub fn get_or_create_default<T: PortType>(
        &self,
        interface: &VertexInterface,
        port: &str,
        data: &mut PortData,
    ) -> Result<DataRef<T>, BuildError> {
        let spec = interface.input(port).ok_or_else(|| BuildError::UnknownPort {
            node: interface.node,
            port: port.to_owned(),
        })?;

        let erased = match self.inputs.get(port) {
            Some(bound) => {
                self.check_bound(spec, bound, data)?;
                bound
            }
            None => spec.default.create(self.settings.block_size, data),
        };
        downcast(spec, erased)
    }

    /// Allocate an output port owned by the operator.
    pub fn create_output<T: PortType>(
        &self,
        interface: &VertexInterface,
        port: &str,
        data: &mut PortData,
    ) -> Result<DataRef<T>, BuildError> {
        let spec = interface.output(port).ok_or_else(|| BuildError::UnknownPort {
            node: interface.node,
            port: port.to_owned(),
        })?;
        downcast(spec, spec.default.create(self.settings.block_size, data))
    }

    fn check_bound(&self, spec: &PortSpec, bound: AnyRef, data: &PortData) -> Result<(), BuildError> {
        if bound.data_type() != spec.data_type {
            return Err(BuildError::TypeMismatch {
                port: spec.name,
                expected: spec.data_type,
                found: bound.data_type(),
            });
        }

        let (stored, frames) = data
            .describe(bound)
            .ok_or(BuildError::DanglingReference { port: spec.name })?;
        if stored != spec.data_type {
            return Err(BuildError::TypeMismatch {
                port: spec.name,
                expected: spec.data_type,
                found: stored,
            });
        }
        match frames {
            Some(found) if found != self.settings.block_size => Err(BuildError::BlockSizeMismatch {
                port: spec.name,
                expected: self.settings.block_size,
                found,
            }),
            _ => Ok(()),
        }
    }
}

fn downcast<T: PortType>(spec: &PortSpec, erased: AnyRef) -> Result<DataRef<T>, BuildError> {
    erased.downcast::<T>().ok_or(BuildError::TypeMismatch {
        port: spec.name,
        expected: T::DATA_TYPE,
        found: erased.data_type(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::Trigger;
    use crate::graph::port::{AudioBuffer, DataType};
    use crate::graph::vertex::{names, CLICK, RZERO};

    #[test]
    fn test_settings_validation() {
        assert!(OperatorSettings::new(48_000.0, 256).is_ok());
        assert_eq!(
            OperatorSettings::new(0.0, 256),
            Err(SettingsError::SampleRate(0.0))
        );
        assert!(OperatorSettings::new(f32::NAN, 256).is_err());
        assert_eq!(
            OperatorSettings::new(48_000.0, 0),
            Err(SettingsError::BlockSize {
                got: 0,
                max: MAX_BLOCK_SIZE
            })
        );
        assert!(OperatorSettings::new(48_000.0, MAX_BLOCK_SIZE + 1).is_err());
    }

    #[test]
    fn test_block_duration() {
        let settings = OperatorSettings::default();
        assert!((settings.block_duration() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_bind_replaces_existing_name() {
        let mut data = PortData::new();
        let first = data.float(1.0);
        let second = data.float(2.0);
        let mut bindings = VertexBindings::new();

        bindings.bind(names::A, first);
        bindings.bind(names::A, second);

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.get_typed::<f32>(names::A), Some(second));
    }

    #[test]
    fn test_missing_input_gets_table_default() {
        let mut data = PortData::new();
        let inputs = VertexBindings::new();
        let params = BuildParams::new(OperatorSettings::default(), &inputs).unwrap();

        let a: DataRef<f32> = params.get_or_create_default(&RZERO, names::A, &mut data).unwrap();
        let input: DataRef<AudioBuffer> = params.get_or_create_default(&RZERO, names::IN, &mut data).unwrap();

        assert_eq!(data.read(a), Some(1.0));
        assert_eq!(data.get(input).map(|b| b.len()), Some(480));
    }

    #[test]
    fn test_bound_input_is_used() {
        let mut data = PortData::new();
        let coefficient = data.float(0.5);
        let mut inputs = VertexBindings::new();
        inputs.bind(names::A, coefficient);
        let params = BuildParams::new(OperatorSettings::default(), &inputs).unwrap();

        let a: DataRef<f32> = params.get_or_create_default(&RZERO, names::A, &mut data).unwrap();

        assert_eq!(a, coefficient);
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let mut data = PortData::new();
        let mut inputs = VertexBindings::new();
        inputs.bind(names::IN, data.float(0.0));
        let params = BuildParams::new(OperatorSettings::default(), &inputs).unwrap();

        let err = params
            .get_or_create_default::<Trigger>(&CLICK, names::IN, &mut data)
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::TypeMismatch {
                port: names::IN,
                expected: DataType::Trigger,
                found: DataType::Float
            }
        );
    }

    #[test]
    fn test_wrong_block_size_is_rejected() {
        let mut data = PortData::new();
        let mut inputs = VertexBindings::new();
        inputs.bind(names::IN, data.audio(64));
        let params = BuildParams::new(OperatorSettings::default(), &inputs).unwrap();

        let err = params
            .get_or_create_default::<AudioBuffer>(&RZERO, names::IN, &mut data)
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::BlockSizeMismatch {
                port: names::IN,
                expected: 480,
                found: 64
            }
        );
    }

    #[test]
    fn test_dangling_reference_is_rejected() {
        let mut data = PortData::new();
        let trigger = data.trigger(480);
        data.remove(trigger);
        let mut inputs = VertexBindings::new();
        inputs.bind(names::IN, trigger);
        let params = BuildParams::new(OperatorSettings::default(), &inputs).unwrap();

        let err = params
            .get_or_create_default::<Trigger>(&CLICK, names::IN, &mut data)
            .unwrap_err();
        assert_eq!(err, BuildError::DanglingReference { port: names::IN });
    }

    #[test]
    fn test_unknown_port_is_rejected() {
        let mut data = PortData::new();
        let mut inputs = VertexBindings::new();
        inputs.bind("Gain", data.float(1.0));
        let params = BuildParams::new(OperatorSettings::default(), &inputs).unwrap();

        assert_eq!(
            params.check_inputs(&CLICK),
            Err(BuildError::UnknownPort {
                node: "Click",
                port: "Gain".to_owned()
            })
        );
    }

    #[test]
    fn test_invalid_settings_fail_build_params() {
        let inputs = VertexBindings::new();
        let settings = OperatorSettings {
            sample_rate: -1.0,
            block_size: 64,
        };
        assert!(matches!(
            BuildParams::new(settings, &inputs),
            Err(BuildError::Settings(SettingsError::SampleRate(_)))
        ));
    }
}
