//! Patch - the fixed node chain rendered on the audio thread
//!
//!   clock ──► Click ──► RZero ──► gain ──► Reflect | Wrap ──► out
//!     └─────► Timer

use trigger_dsp::{
    dsp::Trigger,
    graph::{
        registry, vertex::names, AudioBuffer, BuildParams, ClickOperator, DataRef, Operator,
        OperatorSettings, PortData, RZeroOperator, ReflectOperator, TimerOperator, VertexBindings,
        WrapOperator,
    },
    io::{self, TriggerSource},
    BuildError,
};

use super::ui::state::{ControlMessage, ScopeUpdate, ShaperMode};

pub const MIN_BPM: f64 = 20.0;
pub const MAX_BPM: f64 = 400.0;

/// Drive into the shaper so folding and wrapping are audible.
const DRIVE: f32 = 1.6;

/// Sample-accurate beat clock
#[derive(Debug, Clone)]
pub struct Metronome {
    bpm: f64,
    sample_rate: f64,
    frames_until_beat: f64,
}

impl Metronome {
    pub fn new(bpm: f64, sample_rate: f32) -> Self {
        Self {
            bpm: bpm.clamp(MIN_BPM, MAX_BPM),
            sample_rate: f64::from(sample_rate),
            frames_until_beat: 0.0,
        }
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
    }

    fn frames_per_beat(&self) -> f64 {
        self.sample_rate * 60.0 / self.bpm
    }

    /// Fire every beat that lands in this block. Returns the number fired.
    pub fn schedule(&mut self, trigger: &mut Trigger) -> usize {
        let block = trigger.block_size() as f64;
        let mut fired = 0;

        while self.frames_until_beat < block {
            if trigger.fire(self.frames_until_beat as usize).is_ok() {
                fired += 1;
            }
            self.frames_until_beat += self.frames_per_beat();
        }
        self.frames_until_beat -= block;
        fired
    }
}

pub struct Patch {
    data: PortData,
    clock: DataRef<Trigger>,
    coefficient: DataRef<f32>,
    gained: DataRef<AudioBuffer>,
    click: ClickOperator,
    timer: TimerOperator,
    rzero: RZeroOperator,
    reflect: ReflectOperator,
    wrap: WrapOperator,
    metronome: Metronome,
    shaper: ShaperMode,
    /// Rendered block and read position within it
    block: Vec<f32>,
    cursor: usize,
    beats: u64,
    dropped_taps: u64,
}

impl Patch {
    pub fn new(settings: OperatorSettings, bpm: f64, coefficient: f32) -> Result<Self, BuildError> {
        registry::init();

        let mut data = PortData::with_capacity(16);
        let clock = data.trigger(settings.block_size);
        let coefficient = data.float(coefficient);
        let gained = data.audio(settings.block_size);

        let mut clock_in = VertexBindings::new();
        clock_in.bind(names::IN, clock);
        let params = BuildParams::new(settings, &clock_in)?;
        let click = ClickOperator::create(&params, &mut data)?;
        let timer = TimerOperator::create(&params, &mut data)?;

        let mut rzero_in = VertexBindings::new();
        rzero_in.bind(names::IN, click.output());
        rzero_in.bind(names::A, coefficient);
        let rzero = RZeroOperator::create(&BuildParams::new(settings, &rzero_in)?, &mut data)?;

        let mut shaper_in = VertexBindings::new();
        shaper_in.bind(names::IN, gained);
        let params = BuildParams::new(settings, &shaper_in)?;
        let reflect = ReflectOperator::create(&params, &mut data)?;
        let wrap = WrapOperator::create(&params, &mut data)?;

        tracing::info!(
            sample_rate = settings.sample_rate,
            block_size = settings.block_size,
            values = data.len(),
            "patch built"
        );

        Ok(Self {
            data,
            clock,
            coefficient,
            gained,
            click,
            timer,
            rzero,
            reflect,
            wrap,
            metronome: Metronome::new(bpm, settings.sample_rate),
            shaper: ShaperMode::Reflect,
            block: vec![0.0; settings.block_size],
            cursor: settings.block_size,
            beats: 0,
            dropped_taps: 0,
        })
    }

    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::SetShaper(mode) => self.shaper = mode,
            ControlMessage::SetCoefficient(a) => {
                self.data.set(self.coefficient, a);
            }
            ControlMessage::SetTempo(bpm) => self.metronome.set_bpm(bpm),
        }
    }

    /// Fill an interleaved output buffer, rendering new blocks as needed.
    /// Mono signal is copied to every channel.
    pub fn fill<S: TriggerSource>(&mut self, taps: &mut S, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            if self.cursor >= self.block.len() {
                self.render_block(taps);
                self.cursor = 0;
            }
            frame.fill(self.block[self.cursor]);
            self.cursor += 1;
        }
    }

    fn render_block<S: TriggerSource>(&mut self, taps: &mut S) {
        self.data.advance_triggers();
        if let Some(clock) = self.data.get_mut(self.clock) {
            self.metronome.schedule(clock);
            if io::fire_from(clock, taps).is_err() {
                self.dropped_taps += 1;
            }
            self.beats += clock.len() as u64;
        }

        self.click.execute(&mut self.data);
        self.timer.execute(&mut self.data);
        self.rzero.execute(&mut self.data);

        if let Some((filtered, gained)) = self.data.read_write(self.rzero.output(), self.gained) {
            for (dst, &src) in gained.iter_mut().zip(filtered.iter()) {
                *dst = src * DRIVE;
            }
        }

        let shaped = match self.shaper {
            ShaperMode::Reflect => {
                self.reflect.execute(&mut self.data);
                self.reflect.output()
            }
            ShaperMode::Wrap => {
                self.wrap.execute(&mut self.data);
                self.wrap.output()
            }
        };

        match self.data.get(shaped) {
            Some(buffer) => self.block.copy_from_slice(buffer),
            None => self.block.fill(0.0),
        }
    }

    pub fn snapshot(&self) -> ScopeUpdate {
        ScopeUpdate {
            bpm: self.metronome.bpm(),
            coefficient: self.data.read(self.coefficient).unwrap_or(1.0),
            shaper: self.shaper,
            interval: self
                .data
                .read(self.timer.output())
                .map(|t| t.seconds())
                .unwrap_or(0.0),
            beats: self.beats,
            overlapping: self.click.overlapping_blocks() + self.timer.overlapping_blocks(),
            dropped_taps: self.dropped_taps,
        }
    }
}
