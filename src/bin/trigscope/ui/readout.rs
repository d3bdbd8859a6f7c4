//! Readout bar - tempo, node parameters, timer value and trigger health

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{ScopeInit, ScopeUpdate};

pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_readout(
    frame: &mut Frame,
    area: Rect,
    init: &ScopeInit,
    update: &ScopeUpdate,
    stats: &AudioStats,
) {
    let block = Block::default().title(" trigscope ").borders(Borders::ALL);

    // timer reads 0 until two triggers have been seen
    let interval = if update.beats < 2 {
        "--".to_owned()
    } else {
        format!("{:.3}s", update.interval)
    };
    let health = if update.overlapping > 0 || update.dropped_taps > 0 {
        Color::Red
    } else {
        Color::DarkGray
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", update.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("A: {:.2}  ", update.coefficient),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{}  ", update.shaper.label()),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("Timer: {}  ", interval),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Beats: {}  ", update.beats),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Overlap: {}  Dropped: {}  ", update.overlapping, update.dropped_taps),
            Style::default().fg(health),
        ),
        Span::styled(
            format!("{:.1}kHz/{}  ", init.sample_rate / 1000.0, init.block_size),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
