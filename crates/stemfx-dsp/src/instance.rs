//! One owned effect: a pitch shifter or a delay line.

use stemfx_core::{EffectConfig, StereoBuffer, StereoBufferMut};

use crate::delay::FeedbackDelay;
use crate::pitch::{PitchEngine, PitchQuality, PitchShifter};
use crate::{Error, Result};

/// Which effect an instance runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    PitchShift(PitchQuality),
    Delay,
}

impl EffectKind {
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::PitchShift(PitchQuality::Simple) => "pitch-shift (simple)",
            EffectKind::PitchShift(PitchQuality::High) => "pitch-shift (high)",
            EffectKind::Delay => "delay",
        }
    }
}

/// Per-call parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectParams {
    PitchShift { ratio: f32 },
    Delay { seconds: f32, feedback: f32 },
}

impl EffectParams {
    fn name(&self) -> &'static str {
        match self {
            EffectParams::PitchShift { .. } => "pitch-shift",
            EffectParams::Delay { .. } => "delay",
        }
    }
}

/// Owns every buffer, window table and cursor for exactly one effect.
///
/// Created once at a sample rate; `process` never allocates.
#[derive(Debug, Clone)]
pub enum EffectInstance {
    PitchShift(PitchEngine),
    Delay(FeedbackDelay),
}

impl EffectInstance {
    /// Allocate an instance with default sizes at `sample_rate`.
    pub fn new(kind: EffectKind, sample_rate: u32) -> Result<Self> {
        Self::with_config(kind, &EffectConfig::new(sample_rate))
    }

    pub fn with_config(kind: EffectKind, config: &EffectConfig) -> Result<Self> {
        config.validate()?;

        let instance = match kind {
            EffectKind::PitchShift(quality) => EffectInstance::PitchShift(
                PitchEngine::with_config(quality, config.simple, config.high_quality),
            ),
            EffectKind::Delay => EffectInstance::Delay(FeedbackDelay::with_config(config)),
        };

        tracing::debug!(
            "Created {} effect at {} Hz ({} samples latency)",
            kind.name(),
            config.sample_rate,
            instance.latency_samples()
        );
        Ok(instance)
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            EffectInstance::PitchShift(engine) => EffectKind::PitchShift(engine.quality()),
            EffectInstance::Delay(_) => EffectKind::Delay,
        }
    }

    /// Run `[begin, end)` with parameters matching this instance's kind.
    ///
    /// Mismatched parameters leave the output untouched and return
    /// [`Error::ParamsMismatch`].
    pub fn process(
        &mut self,
        begin: usize,
        end: usize,
        input: StereoBuffer<'_>,
        output: StereoBufferMut<'_>,
        params: EffectParams,
    ) -> Result<()> {
        match (self, params) {
            (EffectInstance::PitchShift(engine), EffectParams::PitchShift { ratio }) => {
                engine.process(begin, end, input, output, ratio);
                Ok(())
            }
            (EffectInstance::Delay(delay), EffectParams::Delay { seconds, feedback }) => {
                delay.process(begin, end, input, output, seconds, feedback);
                Ok(())
            }
            (instance, params) => Err(Error::ParamsMismatch {
                expected: instance.kind().name(),
                got: params.name(),
            }),
        }
    }

    pub fn reset(&mut self) {
        match self {
            EffectInstance::PitchShift(engine) => engine.reset(),
            EffectInstance::Delay(delay) => delay.reset(),
        }
    }

    pub fn latency_samples(&self) -> usize {
        match self {
            EffectInstance::PitchShift(engine) => engine.latency_samples(),
            EffectInstance::Delay(_) => 0,
        }
    }

    pub fn as_pitch_shifter_mut(&mut self) -> Option<&mut PitchEngine> {
        match self {
            EffectInstance::PitchShift(engine) => Some(engine),
            EffectInstance::Delay(_) => None,
        }
    }

    pub fn as_delay_mut(&mut self) -> Option<&mut FeedbackDelay> {
        match self {
            EffectInstance::Delay(delay) => Some(delay),
            EffectInstance::PitchShift(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            EffectKind::PitchShift(PitchQuality::Simple),
            EffectKind::PitchShift(PitchQuality::High),
            EffectKind::Delay,
        ] {
            assert_eq!(EffectInstance::new(kind, 48000).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        let err = EffectInstance::new(EffectKind::Delay, 0).unwrap_err();
        assert_eq!(
            err,
            Error::Core(stemfx_core::Error::InvalidSampleRate(0))
        );
    }

    #[test]
    fn test_delay_capacity_from_config() {
        let config = EffectConfig::new(48000).max_delay_seconds(0.5);
        let mut instance = EffectInstance::with_config(EffectKind::Delay, &config).unwrap();
        assert_eq!(instance.as_delay_mut().unwrap().capacity(), 24000);
        assert!(instance.as_pitch_shifter_mut().is_none());
    }

    #[test]
    fn test_params_mismatch_leaves_output() {
        let mut instance = EffectInstance::new(EffectKind::Delay, 44100).unwrap();
        let input = [1.0f32; 16];
        let mut left = [7.0f32; 16];
        let mut right = [7.0f32; 16];

        let err = instance
            .process(
                0,
                16,
                StereoBuffer::mono(&input),
                StereoBufferMut::new(&mut left, &mut right),
                EffectParams::PitchShift { ratio: 2.0 },
            )
            .unwrap_err();

        assert!(matches!(err, Error::ParamsMismatch { expected: "delay", .. }));
        assert!(left.iter().chain(right.iter()).all(|&s| s == 7.0));
    }

    #[test]
    fn test_latency() {
        let simple = EffectInstance::new(EffectKind::PitchShift(PitchQuality::Simple), 44100);
        assert_eq!(simple.unwrap().latency_samples(), 1024);
        let delay = EffectInstance::new(EffectKind::Delay, 44100).unwrap();
        assert_eq!(delay.latency_samples(), 0);
    }
}
