//! Spectrum widget
//!
//! Band energy of the output on a log-frequency axis. Clicks are broadband, so
//! each band averages every FFT bin it covers instead of sampling one.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

const BANDS: usize = 48;
const MIN_FREQ: f64 = 20.0;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// FFT bin range `[lo, hi)` per band
    bands: Vec<(usize, usize)>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 centre frequency, level dB)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        // Hann
        let window = (0..fft_len)
            .map(|i| {
                if fft_len > 1 {
                    let phase = 2.0 * std::f32::consts::PI * i as f32 / (fft_len - 1) as f32;
                    0.5 * (1.0 - phase.cos())
                } else {
                    1.0
                }
            })
            .collect();

        let sample_rate = f64::from(sample_rate);
        let nyquist = (sample_rate / 2.0).min(20_000.0).max(MIN_FREQ * 2.0);
        let half = (fft_len / 2).max(1);
        let bin_of = |freq: f64| ((freq * fft_len as f64 / sample_rate) as usize).min(half - 1);
        let edge = |i: usize| MIN_FREQ * (nyquist / MIN_FREQ).powf(i as f64 / BANDS as f64);

        let mut bands = Vec::with_capacity(BANDS);
        let mut spectrum = Vec::with_capacity(BANDS);
        for i in 0..BANDS {
            let (lo_freq, hi_freq) = (edge(i), edge(i + 1));
            let lo = bin_of(lo_freq);
            let hi = bin_of(hi_freq).max(lo + 1);
            bands.push((lo, hi));
            spectrum.push(((lo_freq * hi_freq).sqrt().log10(), FLOOR_DB));
        }

        Self {
            window,
            bands,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            spectrum,
        }
    }

    /// Analyze `buffer`. Ignored unless it matches the FFT length.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (point, &(lo, hi)) in self.spectrum.iter_mut().zip(&self.bands) {
            let bins = &self.scratch[lo..hi];
            let power = bins.iter().map(|c| c.norm_sqr()).sum::<f32>() / bins.len() as f32;
            point.1 = (10.0 * f64::from(power.max(1e-12)).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let peak_db = spectrum.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([MIN_FREQ.log10(), 20_000f64.log10()])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, peak_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
