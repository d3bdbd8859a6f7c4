//! TUI for trigscope
//!
//! Draws the shaped output, its spectrum and a readout, and sends control
//! changes back to the audio thread.

mod readout;
mod spectrum;
pub mod state;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

use readout::{render_readout, AudioStats};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use state::{ControlMessage, ScopeInit, ScopeUpdate};
use waveform::render_waveform;

use crate::patch::{MAX_BPM, MIN_BPM};

/// Samples kept for drawing and analysis
const VIS_BUFFER_SIZE: usize = 2048;
const COEFFICIENT_STEP: f32 = 0.05;
const TEMPO_STEP: f64 = 5.0;

/// Channels owned by the UI side
pub struct UiLinks {
    pub audio_rx: Consumer<f32>,
    pub state_rx: Consumer<ScopeUpdate>,
    pub control_tx: Producer<ControlMessage>,
    pub tap_tx: Producer<usize>,
}

pub struct UiApp {
    links: UiLinks,
    init: ScopeInit,
    current: ScopeUpdate,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(links: UiLinks, init: ScopeInit, initial: ScopeUpdate) -> Self {
        Self {
            links,
            init,
            current: initial,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, init.sample_rate),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_audio(&mut self) {
        let before = self.audio_buffer.len();
        while let Ok(sample) = self.links.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }

        if self.audio_buffer.len() > before {
            let excess = self.audio_buffer.len().saturating_sub(VIS_BUFFER_SIZE);
            self.audio_buffer.drain(..excess);
            self.spectrum.update(&self.audio_buffer);
        }
    }

    fn poll_state(&mut self) {
        while let Ok(update) = self.links.state_rx.pop() {
            self.current = update;
        }
    }

    fn send(&mut self, message: ControlMessage) {
        if self.links.control_tx.push(message).is_err() {
            tracing::warn!(?message, "control queue full");
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.links.tap_tx.push(0).is_err() {
                    tracing::warn!("tap queue full");
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                let mode = self.current.shaper.toggled();
                self.current.shaper = mode;
                self.send(ControlMessage::SetShaper(mode));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_coefficient(COEFFICIENT_STEP),
            KeyCode::Char('-') => self.nudge_coefficient(-COEFFICIENT_STEP),
            KeyCode::Char(']') => self.nudge_tempo(TEMPO_STEP),
            KeyCode::Char('[') => self.nudge_tempo(-TEMPO_STEP),
            _ => {}
        }
    }

    fn nudge_coefficient(&mut self, step: f32) {
        let a = (self.current.coefficient + step).clamp(-1.0, 1.0);
        self.current.coefficient = a;
        self.send(ControlMessage::SetCoefficient(a));
    }

    fn nudge_tempo(&mut self, step: f64) {
        let bpm = (self.current.bpm + step).clamp(MIN_BPM, MAX_BPM);
        self.current.bpm = bpm;
        self.send(ControlMessage::SetTempo(bpm));
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Readout
                Constraint::Min(8),     // Waveform
                Constraint::Length(10), // Spectrum
                Constraint::Length(1),  // Help
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_readout(frame, chunks[0], &self.init, &self.current, &stats);
        render_waveform(frame, chunks[1], &self.audio_buffer, self.current.shaper);
        render_spectrum(frame, chunks[2], self.spectrum.data());

        let help = Paragraph::new(
            " [Q] Quit  [Space] Tap  [S] Shaper  [+/-] Coefficient  [[/]] Tempo",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
