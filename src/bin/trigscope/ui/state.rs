//! Shared state types for UI communication
//!
//! Everything crossing the audio thread boundary is `Copy`.

/// Which waveshaper closes the chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaperMode {
    Reflect,
    Wrap,
}

impl ShaperMode {
    pub fn toggled(self) -> Self {
        match self {
            ShaperMode::Reflect => ShaperMode::Wrap,
            ShaperMode::Wrap => ShaperMode::Reflect,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShaperMode::Reflect => "Reflect",
            ShaperMode::Wrap => "Wrap",
        }
    }
}

/// Commands sent from UI thread to audio thread
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    SetShaper(ShaperMode),
    /// RZero coefficient `A`
    SetCoefficient(f32),
    /// Metronome tempo in BPM
    SetTempo(f64),
}

/// Static state known before the stream starts
#[derive(Clone, Copy, Debug)]
pub struct ScopeInit {
    pub sample_rate: f32,
    pub block_size: usize,
}

/// Dynamic state sent from the audio thread once per callback
#[derive(Clone, Copy, Debug)]
pub struct ScopeUpdate {
    pub bpm: f64,
    pub coefficient: f32,
    pub shaper: ShaperMode,
    /// Last interval measured by the timer node, in seconds
    pub interval: f64,
    /// Triggers fired so far, clock and taps
    pub beats: u64,
    /// Blocks the click or timer saw with more than one trigger
    pub overlapping: u64,
    pub dropped_taps: u64,
}
