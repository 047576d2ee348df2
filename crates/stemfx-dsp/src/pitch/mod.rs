//! Time-domain granular pitch shifting.
//!
//! Two strategies share the [`PitchShifter`] interface:
//!
//! - [`SimplePitchShifter`] - single grain stream, linear interpolation, fixed 0.3 output gain
//! - [`HqPitchShifter`] - dual grain cursors, cubic interpolation, adaptive gain, unity bypass
//!
//! Both process left and right independently with a shared sample clock.

mod high_quality;
mod simple;

pub use high_quality::HqPitchShifter;
pub use simple::SimplePitchShifter;

use stemfx_core::{GrainConfig, StereoBuffer, StereoBufferMut};

pub const MIN_PITCH_RATIO: f32 = 0.25;
pub const MAX_PITCH_RATIO: f32 = 4.0;

/// Clamp a requested ratio into `[0.25, 4.0]`. NaN maps to unity.
#[inline]
pub fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() {
        1.0
    } else {
        ratio.clamp(MIN_PITCH_RATIO, MAX_PITCH_RATIO)
    }
}

/// Convert a semitone offset to a playback-rate ratio (`2^(st/12)`).
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    2.0_f32.powf(semitones / 12.0)
}

/// Pitch-shifter algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PitchQuality {
    /// 1024-sample grains, linear interpolation. Cheaper.
    Simple,
    /// 2048-sample dual grains, cubic interpolation.
    #[default]
    High,
}

impl PitchQuality {
    pub fn all() -> &'static [PitchQuality] {
        &[PitchQuality::Simple, PitchQuality::High]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PitchQuality::Simple => "simple",
            PitchQuality::High => "high",
        }
    }
}

/// Block-based stereo pitch shifter.
pub trait PitchShifter {
    /// Shift `[begin, end)` of `input` into the same range of `output`.
    ///
    /// The range is clipped to the shortest channel. Never allocates.
    fn process(
        &mut self,
        begin: usize,
        end: usize,
        input: StereoBuffer<'_>,
        output: StereoBufferMut<'_>,
        pitch_ratio: f32,
    );

    /// Zero all buffers and cursors.
    fn reset(&mut self);

    fn latency_samples(&self) -> usize;

    fn quality(&self) -> PitchQuality;
}

/// Either pitch-shifter strategy, chosen at construction.
#[derive(Debug, Clone)]
pub enum PitchEngine {
    Simple(SimplePitchShifter),
    High(HqPitchShifter),
}

impl PitchEngine {
    pub fn new(quality: PitchQuality) -> Self {
        match quality {
            PitchQuality::Simple => PitchEngine::Simple(SimplePitchShifter::new()),
            PitchQuality::High => PitchEngine::High(HqPitchShifter::new()),
        }
    }

    pub fn with_config(quality: PitchQuality, simple: GrainConfig, high: GrainConfig) -> Self {
        match quality {
            PitchQuality::Simple => PitchEngine::Simple(SimplePitchShifter::with_config(simple)),
            PitchQuality::High => PitchEngine::High(HqPitchShifter::with_config(high)),
        }
    }
}

impl PitchShifter for PitchEngine {
    fn process(
        &mut self,
        begin: usize,
        end: usize,
        input: StereoBuffer<'_>,
        output: StereoBufferMut<'_>,
        pitch_ratio: f32,
    ) {
        match self {
            PitchEngine::Simple(p) => p.process(begin, end, input, output, pitch_ratio),
            PitchEngine::High(p) => p.process(begin, end, input, output, pitch_ratio),
        }
    }

    fn reset(&mut self) {
        match self {
            PitchEngine::Simple(p) => p.reset(),
            PitchEngine::High(p) => p.reset(),
        }
    }

    fn latency_samples(&self) -> usize {
        match self {
            PitchEngine::Simple(p) => p.latency_samples(),
            PitchEngine::High(p) => p.latency_samples(),
        }
    }

    fn quality(&self) -> PitchQuality {
        match self {
            PitchEngine::Simple(_) => PitchQuality::Simple,
            PitchEngine::High(_) => PitchQuality::High,
        }
    }
}
