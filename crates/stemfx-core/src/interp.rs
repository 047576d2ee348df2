//! Sub-sample readback kernels.
//!
//! [`linear`] reads a plain slice and refuses to read past its end.
//! [`cubic`] reads a [`RingBuffer`] and wraps around it.

use crate::RingBuffer;

/// Linear interpolation at fractional position `pos`.
///
/// Returns 0.0 when `pos` is negative or non-finite, or when the right-hand
/// neighbour would fall past the last valid index.
#[inline]
pub fn linear(samples: &[f32], pos: f32) -> f32 {
    if !pos.is_finite() || pos < 0.0 {
        return 0.0;
    }
    let i = pos as usize;
    if i + 1 >= samples.len() {
        return 0.0;
    }
    let frac = pos - i as f32;
    let a = samples[i];
    a + frac * (samples[i + 1] - a)
}

/// 4-point Catmull-Rom interpolation at `pos`, wrapped modulo capacity.
#[inline]
pub fn cubic(ring: &RingBuffer, pos: f32) -> f32 {
    if !pos.is_finite() {
        return 0.0;
    }
    let capacity = ring.capacity() as f32;
    let wrapped = pos.rem_euclid(capacity);
    let base = wrapped.floor();
    cubic_at(ring, base as isize, wrapped - base)
}

/// Cubic interpolation between slot `i` and `i + 1` at fraction `t`.
///
/// Splitting the position keeps long rings exact where a single `f32` index
/// would lose sub-sample precision.
#[inline]
pub fn cubic_at(ring: &RingBuffer, i: isize, t: f32) -> f32 {
    let y0 = ring.read_signed(i - 1);
    let y1 = ring.read_signed(i);
    let y2 = ring.read_signed(i + 1);
    let y3 = ring.read_signed(i + 2);

    catmull_rom(y0, y1, y2, y3, t)
}

#[inline]
fn catmull_rom(y0: f32, y1: f32, y2: f32, y3: f32, t: f32) -> f32 {
    let c0 = y1;
    let c1 = 0.5 * (y2 - y0);
    let c2 = y0 - 2.5 * y1 + 2.0 * y2 - 0.5 * y3;
    let c3 = 0.5 * (y3 - y0) + 1.5 * (y1 - y2);
    ((c3 * t + c2) * t + c1) * t + c0
}
