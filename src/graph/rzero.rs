use crate::dsp::RZeroFilter;
use crate::error::BuildError;
use crate::graph::node::{BuildParams, Operator, PortBinder, VertexBindings};
use crate::graph::port::{AudioBuffer, DataRef, PortData};
use crate::graph::registry::{ClassDescriptor, ClassName};
use crate::graph::vertex::{names, RZERO};

pub static CLASS: ClassDescriptor = ClassDescriptor {
    class_name: ClassName {
        namespace: "UE",
        name: "RZero (Audio)",
        variant: "Audio",
    },
    major_version: 1,
    minor_version: 0,
    display_name: "RZero (Audio)",
    description: "Applies PureData RZero filter y[n] = x[n] - a[n] * x[n-1].",
    author: "geekrelief",
    category: "Utils",
    interface: &RZERO,
};

/// One-zero filter node. The coefficient port is sampled once per block.
#[derive(Debug)]
pub struct RZeroOperator {
    input: DataRef<AudioBuffer>,
    coefficient: DataRef<f32>,
    output: DataRef<AudioBuffer>,
    filter: RZeroFilter,
}

impl RZeroOperator {
    pub fn create(params: &BuildParams<'_>, data: &mut PortData) -> Result<Self, BuildError> {
        params.check_inputs(&RZERO)?;

        Ok(Self {
            input: params.get_or_create_default(&RZERO, names::IN, data)?,
            coefficient: params.get_or_create_default(&RZERO, names::A, data)?,
            output: params.create_output(&RZERO, names::OUT, data)?,
            filter: RZeroFilter::new(params.seed()),
        })
    }

    pub fn output(&self) -> DataRef<AudioBuffer> {
        self.output
    }

    pub fn prior_sample(&self) -> Option<f32> {
        self.filter.prior_sample()
    }
}

impl PortBinder for RZeroOperator {
    fn bind_inputs(&self, inputs: &mut VertexBindings) {
        inputs.bind(names::IN, self.input);
        inputs.bind(names::A, self.coefficient);
    }

    fn bind_outputs(&self, outputs: &mut VertexBindings) {
        outputs.bind(names::OUT, self.output);
    }
}

impl Operator for RZeroOperator {
    fn execute(&mut self, data: &mut PortData) {
        let Some(a) = data.read(self.coefficient) else {
            return;
        };
        let Some((input, out)) = data.read_write(self.input, self.output) else {
            return;
        };

        self.filter.render(input, out, a);
    }
}
