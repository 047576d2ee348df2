//! Stereo feedback delay line.

use stemfx_core::{block_range, interp, EffectConfig, RingBuffer, StereoBuffer, StereoBufferMut};

/// Default delay line length in seconds.
pub const MAX_DELAY_SECONDS: f32 = 2.0;

/// Fixed wet level added to the dry signal.
const WET_MIX: f32 = 0.5;

/// Shortest ring that still leaves one sample of delay after the cubic guard.
const MIN_CAPACITY: usize = 8;

/// Feedback delay with cubic-interpolated fractional delay times.
///
/// Delay time and feedback are per-call parameters. Feedback at or above 1.0
/// is allowed to grow without bound; no output clamp is applied.
#[derive(Debug, Clone)]
pub struct FeedbackDelay {
    sample_rate: f32,
    left: RingBuffer,
    right: RingBuffer,
    write_pos: usize,
}

impl FeedbackDelay {
    /// Allocate a 2-second line at `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self::with_max_delay(sample_rate, MAX_DELAY_SECONDS)
    }

    pub fn with_max_delay(sample_rate: u32, max_delay_seconds: f32) -> Self {
        let capacity = (sample_rate as f64 * max_delay_seconds.max(0.0) as f64) as usize;
        Self::with_capacity(sample_rate, capacity)
    }

    pub fn with_config(config: &EffectConfig) -> Self {
        Self::with_capacity(config.sample_rate, config.delay_capacity())
    }

    fn with_capacity(sample_rate: u32, capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        Self {
            sample_rate: sample_rate as f32,
            left: RingBuffer::new(capacity),
            right: RingBuffer::new(capacity),
            write_pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.left.capacity()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Longest reachable delay in seconds.
    pub fn max_delay_seconds(&self) -> f32 {
        self.max_delay_samples() / self.sample_rate
    }

    #[inline]
    fn max_delay_samples(&self) -> f32 {
        (self.capacity() - 4) as f32
    }

    /// Delay in samples for `seconds`, clamped to `[1, capacity - 4]`.
    ///
    /// NaN selects the one-sample minimum.
    #[inline]
    pub fn delay_samples(&self, seconds: f32) -> f32 {
        let samples = seconds * self.sample_rate;
        if samples.is_nan() {
            1.0
        } else {
            samples.clamp(1.0, self.max_delay_samples())
        }
    }

    /// Process `[begin, end)`: `out = dry + 0.5·delayed`, line ← `dry + feedback·delayed`.
    pub fn process(
        &mut self,
        begin: usize,
        end: usize,
        input: StereoBuffer<'_>,
        mut output: StereoBufferMut<'_>,
        delay_seconds: f32,
        feedback: f32,
    ) {
        let delay = self.delay_samples(delay_seconds);
        let feedback = if feedback.is_nan() { 0.0 } else { feedback };

        // Read point = write_pos - delay, split into slot and fraction.
        let whole = delay.ceil();
        let frac = whole - delay;
        let offset = whole as isize;
        let capacity = self.capacity();

        for i in block_range(begin, end, &input, &output) {
            let read = self.write_pos as isize - offset;

            let dry_l = input.left[i];
            let dry_r = input.right[i];
            let delayed_l = interp::cubic_at(&self.left, read, frac);
            let delayed_r = interp::cubic_at(&self.right, read, frac);

            output.left[i] = dry_l + WET_MIX * delayed_l;
            output.right[i] = dry_r + WET_MIX * delayed_r;

            self.left.write(self.write_pos, dry_l + feedback * delayed_l);
            self.right.write(self.write_pos, dry_r + feedback * delayed_r);

            self.write_pos = (self.write_pos + 1) % capacity;
        }
    }

    pub fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
        self.write_pos = 0;
    }
}
