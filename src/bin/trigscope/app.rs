//! Trigscope - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use trigger_dsp::graph::OperatorSettings;

use super::patch::Patch;
use super::ui::{
    state::{ControlMessage, ScopeInit, ScopeUpdate},
    UiApp, UiLinks,
};

/// Frames per operator block
const BLOCK_SIZE: usize = 256;
/// Ring buffer capacity for scope samples (~0.2 s at 48 kHz)
const AUDIO_RING: usize = 8192;

pub struct Trigscope {
    bpm: f64,
    coefficient: f32,
}

impl Trigscope {
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            coefficient: 1.0,
        }
    }

    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Initial RZero coefficient
    pub fn coefficient(mut self, a: f32) -> Self {
        self.coefficient = a;
        self
    }

    /// Open the default output device and run until the UI quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let settings = OperatorSettings::new(sample_rate, BLOCK_SIZE)
            .wrap_err("device sample rate rejected")?;
        let mut patch = Patch::new(settings, self.bpm, self.coefficient)
            .wrap_err("failed to build patch")?;
        let initial = patch.snapshot();

        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(AUDIO_RING);
        let (mut state_tx, state_rx) = RingBuffer::<ScopeUpdate>::new(16);
        let (control_tx, mut control_rx) = RingBuffer::<ControlMessage>::new(64);
        let (tap_tx, mut tap_rx) = RingBuffer::<usize>::new(16);

        tracing::info!(sample_rate, channels, bpm = self.bpm, "opening output stream");

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                while let Ok(message) = control_rx.pop() {
                    patch.apply(message);
                }

                patch.fill(&mut tap_rx, data, channels);

                // first channel only; drop what the UI hasn't drained
                for frame in data.chunks(channels.max(1)) {
                    if audio_tx.push(frame[0]).is_err() {
                        break;
                    }
                }
                let _ = state_tx.push(patch.snapshot());
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;

        let links = UiLinks {
            audio_rx,
            state_rx,
            control_tx,
            tap_tx,
        };
        let init = ScopeInit {
            sample_rate,
            block_size: BLOCK_SIZE,
        };
        let mut ui = UiApp::new(links, init, initial);

        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        tracing::info!("trigscope stopped");
        result
    }
}

impl Default for Trigscope {
    fn default() -> Self {
        Self::new()
    }
}
