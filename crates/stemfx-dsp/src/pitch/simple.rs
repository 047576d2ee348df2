//! Single-stream overlap-add pitch shifter.
//!
//! ## Algorithm
//!
//! 1. Every input sample is written into a circular input buffer.
//! 2. Once a full window of history exists, every `hop_size` samples the most
//!    recent window is copied out, tapered, and resampled by the pitch ratio
//!    with linear interpolation.
//! 3. The resampled grain is overlap-added into a circular output buffer
//!    starting at the current output position.
//! 4. Each sample step emits one output slot (scaled by 0.3) and clears it.
//!
//! ## RT-Safety
//!
//! All buffers, including the grain scratch, are allocated in `new()`.

use stemfx_core::{
    block_range, interp, GrainConfig, RingBuffer, StereoBuffer, StereoBufferMut, WindowTable,
};

use super::{clamp_ratio, PitchQuality, PitchShifter};

/// Bounds the overlap-add sum of four grains.
const OUTPUT_GAIN: f32 = 0.3;

#[derive(Debug, Clone)]
struct Channel {
    input: RingBuffer,
    output: RingBuffer,
    grain: Vec<f32>,
}

impl Channel {
    fn new(window_size: usize, buffer_size: usize) -> Self {
        Self {
            input: RingBuffer::new(buffer_size),
            output: RingBuffer::new(buffer_size),
            grain: vec![0.0; window_size],
        }
    }

    /// Taper the newest `grain.len()` samples (ending before `written`) and
    /// overlap-add them, resampled by `ratio`, at `out_start`.
    fn render_grain(
        &mut self,
        window: &WindowTable,
        written: usize,
        out_start: usize,
        ratio: f32,
    ) {
        let oldest = written - self.grain.len();
        for (k, slot) in self.grain.iter_mut().enumerate() {
            *slot = self.input.read(oldest + k) * window.at(k);
        }

        for j in 0..self.grain.len() {
            let sample = interp::linear(&self.grain, j as f32 * ratio);
            self.output.add(out_start + j, sample);
        }
    }

    #[inline]
    fn step(
        &mut self,
        x: f32,
        position: usize,
        trigger: bool,
        window: &WindowTable,
        ratio: f32,
    ) -> f32 {
        self.input.write(position, x);
        if trigger {
            self.render_grain(window, position + 1, position, ratio);
        }
        self.output.take(position) * OUTPUT_GAIN
    }

    fn reset(&mut self) {
        self.input.clear();
        self.output.clear();
        self.grain.fill(0.0);
    }
}

/// Simple granular pitch shifter (1024 window, 256 hop by default).
#[derive(Debug, Clone)]
pub struct SimplePitchShifter {
    window: WindowTable,
    window_size: usize,
    hop_size: usize,
    left: Channel,
    right: Channel,
    /// Samples consumed so far; shared input/output cursor.
    position: usize,
}

impl SimplePitchShifter {
    pub fn new() -> Self {
        Self::with_config(GrainConfig::SIMPLE)
    }

    pub fn with_config(config: GrainConfig) -> Self {
        let window_size = config.grain_size.max(2);
        let hop_size = config.hop_size.clamp(1, window_size);
        let buffer_size = config.buffer_size.max(window_size);

        Self {
            window: WindowTable::hann(window_size),
            window_size,
            hop_size,
            left: Channel::new(window_size, buffer_size),
            right: Channel::new(window_size, buffer_size),
            position: 0,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    pub fn window(&self) -> &WindowTable {
        &self.window
    }

    /// True until a full window of input history exists.
    pub fn is_warming_up(&self) -> bool {
        self.position < self.window_size
    }

    #[inline]
    fn grain_due(&self, written: usize) -> bool {
        written >= self.window_size && written % self.hop_size == 0
    }
}

impl Default for SimplePitchShifter {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchShifter for SimplePitchShifter {
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

        for i in range {
            let position = self.position;
            let trigger = self.grain_due(position + 1);

            output.left[i] = self
                .left
                .step(input.left[i], position, trigger, &self.window, ratio);
            output.right[i] = self
                .right
                .step(input.right[i], position, trigger, &self.window, ratio);

            self.position = position.wrapping_add(1);
        }
    }

    fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.position = 0;
    }

    fn latency_samples(&self) -> usize {
        self.window_size
    }

    fn quality(&self) -> PitchQuality {
        PitchQuality::Simple
    }
}
