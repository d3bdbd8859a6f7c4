use std::cell::Cell;

use super::trigger::{Dispatch, Trigger};

/*
Trigger Timer
=============

Measures the time between consecutive triggers, in seconds.

The timer keeps a running count of frames since the last trigger. Untriggered
spans add their length. A triggered span first emits

    time = (frames_since_last_trigger + start) / sample_rate

and then restarts the count with the length of the triggered span itself:

  block 480 frames, trigger at 100, previous trigger 300 frames before block

    ├── untriggered (0, 100) ──┼──── triggered (100, 480) ────┤
    count: 300 + 100 = 400      emit (400 + 100) / sr
                                count = 0 + 380

The `+ start` term is measured from the block start, not from the span start,
so a second trigger in the same block sees frames counted twice. Multiple
triggers per block are outside the timer's contract and are left as-is.
*/

/// Time value carried by timer outputs.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Time(f64);

impl Time {
    pub const ZERO: Self = Self(0.0);

    pub fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    pub fn seconds(self) -> f64 {
        self.0
    }
}

/// Frame counter between triggers.
#[derive(Debug, Default, Clone)]
pub struct TriggerTimer {
    frames_since_last_trigger: u64,
    primed: bool,
}

impl TriggerTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the timer by one block.
    ///
    /// `out` is written once per triggered span and left untouched otherwise,
    /// so it holds the last measured interval across silent blocks.
    pub fn process(&mut self, trigger: &Trigger, sample_rate: f32, out: &mut Time) -> Dispatch {
        let count = Cell::new(self.frames_since_last_trigger);

        let report = trigger.execute_block(
            |start, end| {
                count.set(count.get() + (end - start) as u64);
            },
            |start, end| {
                let seconds = (count.get() as f32 + start as f32) / sample_rate;
                *out = Time::from_seconds(f64::from(seconds));

                // restart; the rest of this block counts toward the next interval
                count.set((end - start) as u64);
            },
        );

        self.frames_since_last_trigger = count.get();
        if report.triggered > 0 {
            self.primed = true;
        }
        report
    }

    /// Frames accumulated since the last trigger.
    pub fn frames_since_last_trigger(&self) -> u64 {
        self.frames_since_last_trigger
    }

    /// Whether at least one trigger has been seen.
    pub fn is_primed(&self) -> bool {
        self.primed
    }
}
