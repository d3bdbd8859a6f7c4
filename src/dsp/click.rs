//! Single-sample impulse generator.
//!
//! Every triggered span receives a `1.0` on its first frame; everything else
//! in the block is silence. There is no state between blocks, so a click is
//! never smeared across a block boundary.

use super::trigger::{Dispatch, Trigger};

/// Render one block of clicks into `out`.
pub fn render_clicks(out: &mut [f32], trigger: &Trigger) -> Dispatch {
    out.fill(0.0);

    trigger.execute_block(
        |_, _| {},
        |start, _| {
            if let Some(sample) = out.get_mut(start) {
                *sample = 1.0;
            }
        },
    )
}
