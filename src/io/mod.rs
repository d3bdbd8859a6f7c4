//! Trigger delivery from control threads into the audio thread.

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::Trigger;
use crate::error::TriggerError;

/// Source of frame offsets to fire in the coming block.
pub trait TriggerSource {
    fn pop(&mut self) -> Option<usize>;
}

#[cfg(feature = "rtrb")]
impl TriggerSource for Consumer<usize> {
    fn pop(&mut self) -> Option<usize> {
        Consumer::pop(self).ok()
    }
}

impl TriggerSource for std::vec::IntoIter<usize> {
    fn pop(&mut self) -> Option<usize> {
        self.next()
    }
}

/// Drain `source` into `trigger`.
///
/// Offsets are taken until the source runs dry. The first offset the trigger
/// rejects stops the drain and is returned; already-fired offsets stay.
pub fn fire_from<S: TriggerSource + ?Sized>(
    trigger: &mut Trigger,
    source: &mut S,
) -> Result<usize, TriggerError> {
    let mut fired = 0;
    while let Some(offset) = source.pop() {
        trigger.fire(offset)?;
        fired += 1;
    }
    Ok(fired)
}
