use crate::dsp::click::render_clicks;
use crate::dsp::{Trigger, TriggerWatch};
use crate::error::BuildError;
use crate::graph::node::{BuildParams, Operator, PortBinder, VertexBindings};
use crate::graph::port::{AudioBuffer, DataRef, PortData};
use crate::graph::registry::{ClassDescriptor, ClassName};
use crate::graph::vertex::{names, CLICK};

pub static CLASS: ClassDescriptor = ClassDescriptor {
    class_name: ClassName {
        namespace: "UE",
        name: "Click",
        variant: "",
    },
    major_version: 1,
    minor_version: 0,
    display_name: "Click",
    description: "Outputs a variety of 'click' signals for use in signal processing",
    author: "Chris Wratt",
    category: "Utils",
    interface: &CLICK,
};

/// Emits a one-sample impulse at each trigger.
#[derive(Debug)]
pub struct ClickOperator {
    trigger: DataRef<Trigger>,
    output: DataRef<AudioBuffer>,
    watch: TriggerWatch,
}

impl ClickOperator {
    pub fn create(params: &BuildParams<'_>, data: &mut PortData) -> Result<Self, BuildError> {
        params.check_inputs(&CLICK)?;

        Ok(Self {
            trigger: params.get_or_create_default(&CLICK, names::IN, data)?,
            output: params.create_output(&CLICK, names::OUT, data)?,
            watch: TriggerWatch::new(),
        })
    }

    pub fn output(&self) -> DataRef<AudioBuffer> {
        self.output
    }

    /// Blocks that carried more than one trigger.
    pub fn overlapping_blocks(&self) -> u64 {
        self.watch.overlapping_blocks()
    }
}

impl PortBinder for ClickOperator {
    fn bind_inputs(&self, inputs: &mut VertexBindings) {
        inputs.bind(names::IN, self.trigger);
    }

    fn bind_outputs(&self, outputs: &mut VertexBindings) {
        outputs.bind(names::OUT, self.output);
    }
}

impl Operator for ClickOperator {
    fn execute(&mut self, data: &mut PortData) {
        let Some((trigger, out)) = data.read_write(self.trigger, self.output) else {
            return;
        };

        let report = render_clicks(out, trigger);
        self.watch.observe(CLICK.node, report);
    }
}
