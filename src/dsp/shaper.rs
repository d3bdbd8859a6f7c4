//! Stateless folding and wrapping waveshapers
//!
//! Both shapers keep any finite input inside the unit range, but they get
//! there differently:
//!
//! Reflect (triangle fold):
//!   Values past ±1 bounce back like a mirror. The transfer curve is a
//!   triangle wave with period 4 that is the identity on [-1, 1].
//!
//! ```text
//!    1 ┤    ╱╲      ╱
//!      │   ╱  ╲    ╱
//!    0 ┼──╱────╲──╱───
//!      │ ╱      ╲╱
//!   -1 ┤╱
//!      -1  1   3   5
//! ```
//!
//!   - continuous, so folding adds harmonics without clicks
//!   - odd: reflect(-x) = -reflect(x)
//!
//! Wrap (modulo):
//!   Values past the range re-enter from the opposite side:
//!     y = ((x + 1) mod 2) - 1      y in [-1, 1)
//!   The modulo is euclidean, so negative inputs wrap the same way positive
//!   ones do. The curve is a sawtooth with period 2 and jumps at every odd
//!   integer.

/// Fold `sample` back into [-1, 1].
#[inline]
pub fn reflect(sample: f32) -> f32 {
    // fold the magnitude, then mirror for negative input so symmetry is exact
    let t = sample.abs() % 4.0;
    let folded = if t <= 1.0 {
        t
    } else if t <= 3.0 {
        2.0 - t
    } else {
        t - 4.0
    };
    if sample.is_sign_negative() {
        -folded
    } else {
        folded
    }
}

/// Wrap `sample` into [-1, 1).
#[inline]
pub fn wrap(sample: f32) -> f32 {
    let mut r = (sample + 1.0).rem_euclid(2.0);
    // rem_euclid can round a tiny negative remainder up to the divisor
    if r >= 2.0 {
        r = 0.0;
    }
    r - 1.0
}

/// Apply [`reflect`] from `input` into `output`.
pub fn reflect_block(input: &[f32], output: &mut [f32]) {
    for (out, &x) in output.iter_mut().zip(input) {
        *out = reflect(x);
    }
}

/// Apply [`wrap`] from `input` into `output`.
pub fn wrap_block(input: &[f32], output: &mut [f32]) {
    for (out, &x) in output.iter_mut().zip(input) {
        *out = wrap(x);
    }
}

/// Apply [`reflect`] to a buffer in place.
pub fn reflect_buffer(buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = reflect(*sample);
    }
}

/// Apply [`wrap`] to a buffer in place.
pub fn wrap_buffer(buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = wrap(*sample);
    }
}
