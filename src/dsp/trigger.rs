use arrayvec::ArrayVec;

use crate::{TriggerError, MAX_TRIGGERS_PER_BLOCK};

/*
Trigger Dispatch
================

A trigger is a sparse list of frame offsets inside one block. Nodes never walk
the offsets themselves; they hand two callbacks to `execute_block` and receive
the block split into sub-ranges:

  block of 16 frames, trigger at 5

    0         5                 16
    ├─────────┼─────────────────┤
    untriggered  triggered
    (0, 5)       (5, 16)

  no trigger:   untriggered(0, 16)
  trigger at 0: triggered(0, 16)

With more than one trigger every offset opens a triggered span that runs to
the next offset (or the block end):

  triggers at 2 and 9:  untriggered(0, 2), triggered(2, 9), triggered(9, 16)

Only the single-trigger case is in contract for the nodes in this crate. The
multi-trigger partition is reported through `Dispatch` so callers can detect
it, but nothing here corrects it.
*/

/// Sparse trigger events for one block.
#[derive(Debug, Clone)]
pub struct Trigger {
    frames: ArrayVec<usize, MAX_TRIGGERS_PER_BLOCK>,
    block_size: usize,
}

impl Trigger {
    /// A trigger that never fires, sized for `block_size` frames.
    pub fn new(block_size: usize) -> Self {
        Self {
            frames: ArrayVec::new(),
            block_size,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Schedule a trigger at `offset` in the current block.
    ///
    /// Offsets are kept sorted, so callers may fire in any order.
    pub fn fire(&mut self, offset: usize) -> Result<(), TriggerError> {
        if offset >= self.block_size {
            return Err(TriggerError::OutOfBlock {
                offset,
                block_size: self.block_size,
            });
        }

        let index = self.frames.partition_point(|&frame| frame <= offset);
        self.frames
            .try_insert(index, offset)
            .map_err(|_| TriggerError::Capacity(MAX_TRIGGERS_PER_BLOCK))
    }

    /// Drop the previous block's events. Called by the owner once per block
    /// before new triggers are fired.
    pub fn advance_block(&mut self) {
        self.frames.clear();
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    pub fn is_triggered(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Split this block into untriggered and triggered spans.
    pub fn execute_block<U, T>(&self, on_untriggered: U, on_triggered: T) -> Dispatch
    where
        U: FnMut(usize, usize),
        T: FnMut(usize, usize),
    {
        dispatch(self.block_size, &self.frames, on_untriggered, on_triggered)
    }
}

/// Summary of one dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Number of triggered spans handed to the callback.
    pub triggered: usize,
}

impl Dispatch {
    /// More than one trigger landed in the block.
    pub fn is_overlapping(&self) -> bool {
        self.triggered > 1
    }
}

/// Partition `0..block_size` around sorted trigger `frames`.
///
/// Callbacks run in frame order and receive `(start, end)` with `end`
/// exclusive.
pub fn dispatch<U, T>(
    block_size: usize,
    frames: &[usize],
    mut on_untriggered: U,
    mut on_triggered: T,
) -> Dispatch
where
    U: FnMut(usize, usize),
    T: FnMut(usize, usize),
{
    let Some((&first, _)) = frames.split_first() else {
        on_untriggered(0, block_size);
        return Dispatch::default();
    };

    if first > 0 {
        on_untriggered(0, first);
    }

    for pair in frames.windows(2) {
        on_triggered(pair[0], pair[1]);
    }

    // split_first succeeded, so last exists
    if let Some(&last) = frames.last() {
        on_triggered(last, block_size);
    }

    Dispatch {
        triggered: frames.len(),
    }
}

/// Detects blocks that carry more than one trigger.
///
/// The first overlapping block is logged; later ones are only counted so the
/// audio thread does not keep formatting log records.
#[derive(Debug, Default, Clone)]
pub struct TriggerWatch {
    overlapping_blocks: u64,
    reported: bool,
}

impl TriggerWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, node: &'static str, dispatch: Dispatch) {
        if !dispatch.is_overlapping() {
            return;
        }

        self.overlapping_blocks += 1;
        if !self.reported {
            self.reported = true;
            tracing::warn!(
                node,
                triggers = dispatch.triggered,
                "multiple triggers in one block are not supported; spans are passed through uncorrected"
            );
        }
    }

    /// Blocks seen so far that carried more than one trigger.
    pub fn overlapping_blocks(&self) -> u64 {
        self.overlapping_blocks
    }
}
