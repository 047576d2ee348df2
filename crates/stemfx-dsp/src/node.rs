//! Effects with lock-free parameter handles.
//!
//! The engines in [`crate::pitch`] and [`crate::delay`] take their parameters
//! per call. The nodes here own them as `Arc<AtomicFloat>` so a control thread
//! can move a knob while the audio thread reads the value once per block.

use std::sync::Arc;

use stemfx_core::{AtomicFloat, StereoBuffer, StereoBufferMut};

use crate::delay::FeedbackDelay;
use crate::pitch::{semitones_to_ratio, PitchEngine, PitchQuality, PitchShifter};

/// Stereo pitch shifter driven by a shared ratio handle.
pub struct PitchShiftNode {
    ratio: Arc<AtomicFloat>,
    engine: PitchEngine,
}

impl PitchShiftNode {
    pub fn new(quality: PitchQuality, ratio: f32) -> Self {
        Self::from_engine(PitchEngine::new(quality), ratio)
    }

    pub fn from_engine(engine: PitchEngine, ratio: f32) -> Self {
        Self {
            ratio: Arc::new(AtomicFloat::new(ratio)),
            engine,
        }
    }

    pub fn builder() -> PitchShiftNodeBuilder {
        PitchShiftNodeBuilder::default()
    }

    pub fn ratio(&self) -> Arc<AtomicFloat> {
        Arc::clone(&self.ratio)
    }

    /// Stored as given; clamping happens when the block is processed.
    pub fn set_ratio(&self, ratio: f32) {
        self.ratio.set(ratio);
    }

    pub fn set_semitones(&self, semitones: f32) {
        self.ratio.set(semitones_to_ratio(semitones));
    }

    pub fn quality(&self) -> PitchQuality {
        self.engine.quality()
    }

    pub fn latency_samples(&self) -> usize {
        self.engine.latency_samples()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn engine(&self) -> &PitchEngine {
        &self.engine
    }

    /// Process the whole block with the current ratio.
    pub fn process_block(&mut self, input: StereoBuffer<'_>, output: StereoBufferMut<'_>) {
        let ratio = self.ratio.get();
        let len = input.len();
        self.engine.process(0, len, input, output, ratio);
    }
}

impl Clone for PitchShiftNode {
    fn clone(&self) -> Self {
        Self {
            ratio: Arc::clone(&self.ratio),
            engine: self.engine.clone(),
        }
    }
}

/// Builder for [`PitchShiftNode`].
#[derive(Clone, Debug)]
pub struct PitchShiftNodeBuilder {
    quality: PitchQuality,
    ratio: f32,
}

impl Default for PitchShiftNodeBuilder {
    fn default() -> Self {
        Self {
            quality: PitchQuality::High,
            ratio: 1.0,
        }
    }
}

impl PitchShiftNodeBuilder {
    pub fn quality(mut self, quality: PitchQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Playback-rate ratio (0.25 to 4.0 effective)
    pub fn ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn semitones(mut self, semitones: f32) -> Self {
        self.ratio = semitones_to_ratio(semitones);
        self
    }

    pub fn build(self) -> PitchShiftNode {
        PitchShiftNode::new(self.quality, self.ratio)
    }
}

/// Stereo feedback delay driven by shared time and feedback handles.
pub struct DelayNode {
    seconds: Arc<AtomicFloat>,
    feedback: Arc<AtomicFloat>,
    delay: FeedbackDelay,
}

impl DelayNode {
    pub fn new(sample_rate: u32, seconds: f32, feedback: f32) -> Self {
        Self::from_delay(FeedbackDelay::new(sample_rate), seconds, feedback)
    }

    pub fn from_delay(delay: FeedbackDelay, seconds: f32, feedback: f32) -> Self {
        Self {
            seconds: Arc::new(AtomicFloat::new(seconds)),
            feedback: Arc::new(AtomicFloat::new(feedback)),
            delay,
        }
    }

    pub fn delay_time(&self) -> Arc<AtomicFloat> {
        Arc::clone(&self.seconds)
    }

    pub fn feedback(&self) -> Arc<AtomicFloat> {
        Arc::clone(&self.feedback)
    }

    pub fn set_delay_time(&self, seconds: f32) {
        self.seconds.set(seconds);
    }

    pub fn set_feedback(&self, feedback: f32) {
        self.feedback.set(feedback);
    }

    pub fn sample_rate(&self) -> f32 {
        self.delay.sample_rate()
    }

    pub fn max_delay_seconds(&self) -> f32 {
        self.delay.max_delay_seconds()
    }

    pub fn reset(&mut self) {
        self.delay.reset();
    }

    /// Process the whole block with the current time and feedback.
    pub fn process_block(&mut self, input: StereoBuffer<'_>, output: StereoBufferMut<'_>) {
        let seconds = self.seconds.get();
        let feedback = self.feedback.get();
        let len = input.len();
        self.delay.process(0, len, input, output, seconds, feedback);
    }

    /// Swap in a line of the same length in seconds at a new rate.
    ///
    /// Allocates; not realtime-safe.
    pub fn rebuild(&mut self, sample_rate: u32) {
        let seconds = self.delay.capacity() as f64 / self.delay.sample_rate() as f64;
        tracing::debug!("Reallocating delay line for {} Hz", sample_rate);
        self.delay = FeedbackDelay::with_max_delay(sample_rate, seconds as f32);
    }
}

impl Clone for DelayNode {
    fn clone(&self) -> Self {
        Self {
            seconds: Arc::clone(&self.seconds),
            feedback: Arc::clone(&self.feedback),
            delay: self.delay.clone(),
        }
    }
}
