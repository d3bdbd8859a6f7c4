#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
RZero Filter
============

One real zero, no poles:

    y[n] = x[n] - a * x[n-1]

  a = 1.0   first difference (differentiator), kills DC
  a = 0.0   passthrough
  a = -1.0  two-point sum, a gentle lowpass

The only state is the previous input sample. It is carried from the end of
one block into the start of the next, so splitting a signal into blocks gives
the same output as processing it in one go.

Before the first block there is no previous sample. `SeedPolicy` decides what
stands in for it.
*/

/// What the filter uses as `x[-1]` before it has seen any input.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Start from silence. The first output equals the first input.
    #[default]
    Zero,
    /// Start from NaN. The first output sample is NaN, later samples are
    /// unaffected.
    Propagate,
}

impl SeedPolicy {
    pub fn initial_sample(self) -> f32 {
        match self {
            SeedPolicy::Zero => 0.0,
            SeedPolicy::Propagate => f32::NAN,
        }
    }
}

/// Run the filter over one block and return the new prior sample.
///
/// `coefficient` is held for the whole block.
#[inline]
pub fn rzero_block(input: &[f32], output: &mut [f32], coefficient: f32, prior_sample: f32) -> f32 {
    let mut prior = prior_sample;

    for (out, &x) in output.iter_mut().zip(input) {
        *out = x - coefficient * prior;
        prior = x;
    }

    prior
}

#[derive(Debug, Clone)]
pub struct RZeroFilter {
    prior_sample: Option<f32>, // None until the first block
    seed: SeedPolicy,
}

impl RZeroFilter {
    pub fn new(seed: SeedPolicy) -> Self {
        Self {
            prior_sample: None,
            seed,
        }
    }

    pub fn render(&mut self, input: &[f32], output: &mut [f32], coefficient: f32) {
        let prior = self
            .prior_sample
            .unwrap_or_else(|| self.seed.initial_sample());

        // an empty block leaves the filter unprimed
        if input.is_empty() || output.is_empty() {
            return;
        }

        self.prior_sample = Some(rzero_block(input, output, coefficient, prior));
    }

    pub fn prior_sample(&self) -> Option<f32> {
        self.prior_sample
    }

    pub fn is_primed(&self) -> bool {
        self.prior_sample.is_some()
    }

    pub fn seed(&self) -> SeedPolicy {
        self.seed
    }
}

impl Default for RZeroFilter {
    fn default() -> Self {
        Self::new(SeedPolicy::default())
    }
}
