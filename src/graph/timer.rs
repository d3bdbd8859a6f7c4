use crate::dsp::{Time, Trigger, TriggerTimer, TriggerWatch};
use crate::error::BuildError;
use crate::graph::node::{BuildParams, Operator, PortBinder, VertexBindings};
use crate::graph::port::{DataRef, PortData};
use crate::graph::registry::{ClassDescriptor, ClassName};
use crate::graph::vertex::{names, TIMER};

pub static CLASS: ClassDescriptor = ClassDescriptor {
    class_name: ClassName {
        namespace: "UE",
        name: "Timer",
        variant: "",
    },
    major_version: 1,
    minor_version: 0,
    display_name: "Timer",
    description: "Outputs time between triggers (does not support multiple triggers in single buffer callback)",
    author: "Chris Wratt",
    category: "Utils",
    interface: &TIMER,
};

/// Outputs the time between consecutive triggers.
#[derive(Debug)]
pub struct TimerOperator {
    sample_rate: f32,
    trigger: DataRef<Trigger>,
    output: DataRef<Time>,
    timer: TriggerTimer,
    watch: TriggerWatch,
}

impl TimerOperator {
    pub fn create(params: &BuildParams<'_>, data: &mut PortData) -> Result<Self, BuildError> {
        params.check_inputs(&TIMER)?;

        Ok(Self {
            sample_rate: params.settings().sample_rate,
            trigger: params.get_or_create_default(&TIMER, names::IN, data)?,
            output: params.create_output(&TIMER, names::OUT, data)?,
            timer: TriggerTimer::new(),
            watch: TriggerWatch::new(),
        })
    }

    pub fn output(&self) -> DataRef<Time> {
        self.output
    }

    pub fn frames_since_last_trigger(&self) -> u64 {
        self.timer.frames_since_last_trigger()
    }

    pub fn overlapping_blocks(&self) -> u64 {
        self.watch.overlapping_blocks()
    }
}

impl PortBinder for TimerOperator {
    fn bind_inputs(&self, inputs: &mut VertexBindings) {
        inputs.bind(names::IN, self.trigger);
    }

    fn bind_outputs(&self, outputs: &mut VertexBindings) {
        outputs.bind(names::OUT, self.output);
    }
}

impl Operator for TimerOperator {
    fn execute(&mut self, data: &mut PortData) {
        let Some((trigger, out)) = data.read_write(self.trigger, self.output) else {
            return;
        };

        let report = self.timer.process(trigger, self.sample_rate, out);
        self.watch.observe(TIMER.node, report);
    }
}
