//! Dual-cursor overlap-add pitch shifter with cubic interpolation.
//!
//! ## Algorithm Overview
//!
//! 1. **History**: input is recorded into an 8192-sample circular buffer.
//! 2. **Grain cursors**: every hop (512 samples) two read cursors are anchored
//!    behind the write head, half a grain apart, far enough back that a grain
//!    read at the pitch ratio stays inside the recorded history.
//! 3. **Synthesis**: each cursor renders 2048 output samples, advancing by the
//!    pitch ratio per sample with 4-point cubic interpolation, tapered by the
//!    Hann window and overlap-added into an 8192-sample output ring.
//! 4. **Emission**: the current output slot is clamped to [-1, 1], scaled by
//!    0.9 and cleared.
//!
//! A ratio within 0.001 of unity bypasses synthesis and copies input through.

use stemfx_core::{
    block_range, interp, GrainConfig, RingBuffer, StereoBuffer, StereoBufferMut, WindowTable,
};

use super::{clamp_ratio, PitchQuality, PitchShifter};

const BYPASS_TOLERANCE: f32 = 0.001;
const OUTPUT_GAIN: f32 = 0.9;
/// Samples a cursor must stay behind the write head (cubic reads `i+2`).
const HEAD_GUARD: f32 = 3.0;

/// Per-grain weight: `min(1, 0.7 / sqrt(ratio))`, halved for the two cursors.
#[inline]
fn grain_gain(ratio: f32) -> f32 {
    (0.7 / ratio.sqrt()).min(1.0) * 0.5
}

/// Wrap a physical position into `[0, capacity)`.
#[inline]
fn wrap(pos: f32, capacity: f32) -> f32 {
    let wrapped = pos.rem_euclid(capacity);
    if wrapped >= capacity {
        0.0
    } else {
        wrapped
    }
}

/// Read position for output sample `j` of a grain that starts `start_age`
/// samples behind `head`, or `None` once the read would come within
/// `HEAD_GUARD` of the head.
#[inline]
fn grain_position(head: usize, start_age: f32, j: usize, ratio: f32, capacity: f32) -> Option<f32> {
    let age = start_age - j as f32 * ratio;
    if age < HEAD_GUARD {
        return None;
    }
    Some(wrap(head as f32 - age, capacity))
}

#[derive(Debug, Clone)]
struct Channel {
    input: RingBuffer,
    output: RingBuffer,
    /// Grain read cursors into `input`, in physical (wrapped) positions.
    cursors: [f32; 2],
}

impl Channel {
    fn new(buffer_size: usize) -> Self {
        Self {
            input: RingBuffer::new(buffer_size),
            output: RingBuffer::new(buffer_size),
            cursors: [0.0; 2],
        }
    }

    /// Samples behind `head` where each cursor starts its grain.
    ///
    /// Cursor 1 is placed so its grain ends just behind the head; cursor 0
    /// starts half a grain earlier.
    fn start_ages(&self, grain_size: usize, ratio: f32) -> [f32; 2] {
        let capacity = self.input.capacity() as f32;
        let half = (grain_size / 2) as f32;
        let span = grain_size as f32 * ratio.max(1.0);
        let lead = (span + HEAD_GUARD).min(capacity - 2.0 - half);
        [lead + half, lead]
    }

    fn render_grains(&mut self, shape: &GrainShape, head: usize, out_start: usize, ratio: f32) {
        let capacity = self.input.capacity() as f32;
        let grain_size = shape.window.len();
        let gain = grain_gain(ratio);

        for (c, start_age) in self.start_ages(grain_size, ratio).into_iter().enumerate() {
            for (j, &w) in shape.window.as_slice().iter().enumerate() {
                // Ages only shrink; once inside the guard the rest of the grain is skipped.
                let Some(pos) = grain_position(head, start_age, j, ratio, capacity) else {
                    break;
                };
                let sample = interp::cubic(&self.input, pos) * w * gain;
                self.output.add(out_start + j, sample);
            }
            self.cursors[c] = wrap(head as f32 - (start_age - grain_size as f32 * ratio), capacity);
        }
    }

    #[inline]
    fn step(
        &mut self,
        x: f32,
        position: usize,
        trigger: bool,
        shape: &GrainShape,
        ratio: f32,
    ) -> f32 {
        self.input.write(position, x);
        if trigger {
            let head = self.input.index(position + 1);
            self.render_grains(shape, head, position, ratio);
        }
        let y = self.output.take(position);
        if y.is_nan() {
            0.0
        } else {
            y.clamp(-1.0, 1.0) * OUTPUT_GAIN
        }
    }

    #[inline]
    fn bypass(&mut self, x: f32, position: usize) -> f32 {
        self.input.write(position, x);
        self.output.take(position);
        x
    }

    fn reset(&mut self) {
        self.input.clear();
        self.output.clear();
        self.cursors = [0.0; 2];
    }
}

#[derive(Debug, Clone)]
struct GrainShape {
    window: WindowTable,
    hop_size: usize,
}

/// High-quality pitch shifter (2048 grains, 512 hop, 8192 rings by default).
#[derive(Debug, Clone)]
pub struct HqPitchShifter {
    shape: GrainShape,
    left: Channel,
    right: Channel,
    /// Samples written so far.
    position: usize,
}

impl HqPitchShifter {
    pub fn new() -> Self {
        Self::with_config(GrainConfig::HIGH_QUALITY)
    }

    pub fn with_config(config: GrainConfig) -> Self {
        let grain_size = config.grain_size.max(2);
        let hop_size = config.hop_size.clamp(1, grain_size);
        let buffer_size = config.buffer_size.max(grain_size * 4);

        Self {
            shape: GrainShape {
                window: WindowTable::hann_phase(grain_size),
                hop_size,
            },
            left: Channel::new(buffer_size),
            right: Channel::new(buffer_size),
            position: 0,
        }
    }

    pub fn grain_size(&self) -> usize {
        self.shape.window.len()
    }

    pub fn hop_size(&self) -> usize {
        self.shape.hop_size
    }

    pub fn buffer_size(&self) -> usize {
        self.left.input.capacity()
    }

    pub fn window(&self) -> &WindowTable {
        &self.shape.window
    }

    /// True until more than two grains of history exist.
    pub fn is_warming_up(&self) -> bool {
        self.position <= 2 * self.grain_size()
    }

    /// Current grain cursors of the left channel.
    pub fn cursors(&self) -> [f32; 2] {
        self.left.cursors
    }

    /// Whether `pitch_ratio` takes the unity fast path.
    pub fn is_bypassed(pitch_ratio: f32) -> bool {
        (clamp_ratio(pitch_ratio) - 1.0).abs() < BYPASS_TOLERANCE
    }

    #[inline]
    fn grain_due(&self, written: usize) -> bool {
        written > 2 * self.grain_size() && written % self.shape.hop_size == 0
    }
}

impl Default for HqPitchShifter {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchShifter for HqPitchShifter {
    fn process(
        &mut self,
        begin: usize,
        end: usize,
        input: StereoBuffer<'_>,
        mut output: StereoBufferMut<'_>,
        pitch_ratio: f32,
    ) {
        let ratio = clamp_ratio(pitch_ratio);
        let range = block_range(begin, end, &input, &output);

        if Self::is_bypassed(ratio) {
            for i in range {
                let position = self.position;
                output.left[i] = self.left.bypass(input.left[i], position);
                output.right[i] = self.right.bypass(input.right[i], position);
                self.position = position.wrapping_add(1);
            }
            return;
        }

        for i in range {
            let position = self.position;
            let trigger = self.grain_due(position + 1);

            output.left[i] = self
                .left
                .step(input.left[i], position, trigger, &self.shape, ratio);
            output.right[i] = self
                .right
                .step(input.right[i], position, trigger, &self.shape, ratio);

            self.position = position.wrapping_add(1);
        }
    }

    fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.position = 0;
    }

    fn latency_samples(&self) -> usize {
        2 * self.grain_size()
    }

    fn quality(&self) -> PitchQuality {
        PitchQuality::High
    }
}
