use crate::dsp::shaper::{reflect_block, wrap_block};
use crate::error::BuildError;
use crate::graph::node::{BuildParams, Operator, PortBinder, VertexBindings};
use crate::graph::port::{AudioBuffer, DataRef, PortData};
use crate::graph::registry::{ClassDescriptor, ClassName};
use crate::graph::vertex::{names, VertexInterface, REFLECT, WRAP};

/*
Shaper Nodes
============

Reflect and Wrap share everything except the per-sample curve: one audio
input, one audio output, no state. Both are thin wrappers over `dsp::shaper`.

  Reflect: folds at ±1, output in [-1, 1]
  Wrap:    modulo into [-1, 1)
*/

pub static REFLECT_CLASS: ClassDescriptor = ClassDescriptor {
    class_name: ClassName {
        namespace: "UE",
        name: "Reflect (Audio)",
        variant: "Audio",
    },
    major_version: 1,
    minor_version: 0,
    display_name: "Reflect (Audio)",
    description: "Applies Reflect to the audio input.",
    author: "geekrelief",
    category: "Utils",
    interface: &REFLECT,
};

pub static WRAP_CLASS: ClassDescriptor = ClassDescriptor {
    class_name: ClassName {
        namespace: "UE",
        name: "Wrap (Audio)",
        variant: "Audio",
    },
    major_version: 1,
    minor_version: 0,
    display_name: "Wrap (Audio)",
    description: "Applies Wrap to the audio input.",
    author: "geekrelief",
    category: "Utils",
    interface: &WRAP,
};

/// Input/output pair shared by the stateless shapers.
#[derive(Debug, Clone, Copy)]
struct ShaperPorts {
    input: DataRef<AudioBuffer>,
    output: DataRef<AudioBuffer>,
}

impl ShaperPorts {
    fn create(
        interface: &VertexInterface,
        params: &BuildParams<'_>,
        data: &mut PortData,
    ) -> Result<Self, BuildError> {
        params.check_inputs(interface)?;

        Ok(Self {
            input: params.get_or_create_default(interface, names::IN, data)?,
            output: params.create_output(interface, names::OUT, data)?,
        })
    }

    fn bind_inputs(&self, inputs: &mut VertexBindings) {
        inputs.bind(names::IN, self.input);
    }

    fn bind_outputs(&self, outputs: &mut VertexBindings) {
        outputs.bind(names::OUT, self.output);
    }

    #[inline]
    fn apply(&self, data: &mut PortData, shape: fn(&[f32], &mut [f32])) {
        if let Some((input, out)) = data.read_write(self.input, self.output) {
            shape(input, out);
        }
    }
}

/// Folds the input back into [-1, 1].
#[derive(Debug)]
pub struct ReflectOperator {
    ports: ShaperPorts,
}

impl ReflectOperator {
    pub fn create(params: &BuildParams<'_>, data: &mut PortData) -> Result<Self, BuildError> {
        Ok(Self {
            ports: ShaperPorts::create(&REFLECT, params, data)?,
        })
    }

    pub fn output(&self) -> DataRef<AudioBuffer> {
        self.ports.output
    }
}

impl PortBinder for ReflectOperator {
    fn bind_inputs(&self, inputs: &mut VertexBindings) {
        self.ports.bind_inputs(inputs);
    }

    fn bind_outputs(&self, outputs: &mut VertexBindings) {
        self.ports.bind_outputs(outputs);
    }
}

impl Operator for ReflectOperator {
    fn execute(&mut self, data: &mut PortData) {
        self.ports.apply(data, reflect_block);
    }
}

/// Wraps the input into [-1, 1).
#[derive(Debug)]
pub struct WrapOperator {
    ports: ShaperPorts,
}

impl WrapOperator {
    pub fn create(params: &BuildParams<'_>, data: &mut PortData) -> Result<Self, BuildError> {
        Ok(Self {
            ports: ShaperPorts::create(&WRAP, params, data)?,
        })
    }

    pub fn output(&self) -> DataRef<AudioBuffer> {
        self.ports.output
    }
}

impl PortBinder for WrapOperator {
    fn bind_inputs(&self, inputs: &mut VertexBindings) {
        self.ports.bind_inputs(inputs);
    }

    fn bind_outputs(&self, outputs: &mut VertexBindings) {
        self.ports.bind_outputs(outputs);
    }
}

impl Operator for WrapOperator {
    fn execute(&mut self, data: &mut PortData) {
        self.ports.apply(data, wrap_block);
    }
}
