//! Effect construction configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const MIN_SAMPLE_RATE: u32 = 8000;
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Upper bound on the delay line length, in seconds.
const MAX_DELAY_LIMIT_SECONDS: f32 = 60.0;

/// Grain geometry for one pitch-shifter variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrainConfig {
    /// Grain (window) length in samples.
    pub grain_size: usize,
    /// Samples between successive grain triggers.
    pub hop_size: usize,
    /// Capacity of the input/output rings in samples.
    pub buffer_size: usize,
}

impl GrainConfig {
    /// Simple variant: 1024-sample window, 256 hop (4x overlap).
    pub const SIMPLE: Self = Self {
        grain_size: 1024,
        hop_size: 256,
        buffer_size: 1024,
    };

    /// High-quality variant: 2048-sample grains, 512 hop, 8192-sample rings.
    pub const HIGH_QUALITY: Self = Self {
        grain_size: 2048,
        hop_size: 512,
        buffer_size: 8192,
    };

    /// Samples shared between consecutive grains.
    pub fn overlap(&self) -> usize {
        self.grain_size.saturating_sub(self.hop_size)
    }

    fn validate(&self, label: &str, min_buffer: usize) -> Result<()> {
        if self.grain_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "{label}.grain_size {} must be at least 2",
                self.grain_size
            )));
        }
        if self.hop_size == 0 || self.hop_size > self.grain_size {
            return Err(Error::InvalidConfig(format!(
                "{label}.hop_size {} must be in 1..={}",
                self.hop_size, self.grain_size
            )));
        }
        if self.buffer_size < min_buffer {
            return Err(Error::InvalidConfig(format!(
                "{label}.buffer_size {} must be at least {min_buffer}",
                self.buffer_size
            )));
        }
        Ok(())
    }
}

/// Configuration shared by every effect instance created at one sample rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub sample_rate: u32,
    /// Length of the delay line in seconds.
    pub max_delay_seconds: f32,
    pub simple: GrainConfig,
    pub high_quality: GrainConfig,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            max_delay_seconds: 2.0,
            simple: GrainConfig::SIMPLE,
            high_quality: GrainConfig::HIGH_QUALITY,
        }
    }
}

impl EffectConfig {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn max_delay_seconds(mut self, seconds: f32) -> Self {
        self.max_delay_seconds = seconds;
        self
    }

    pub fn simple(mut self, grain: GrainConfig) -> Self {
        self.simple = grain;
        self
    }

    pub fn high_quality(mut self, grain: GrainConfig) -> Self {
        self.high_quality = grain;
        self
    }

    /// Delay ring capacity in samples (`sample_rate * max_delay_seconds`).
    pub fn delay_capacity(&self) -> usize {
        (self.sample_rate as f64 * self.max_delay_seconds as f64) as usize
    }

    pub fn validate(&self) -> Result<()> {
        let result = self.check();
        if let Err(err) = &result {
            tracing::warn!("Rejected effect config: {}", err);
        }
        result
    }

    fn check(&self) -> Result<()> {
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        if !self.max_delay_seconds.is_finite()
            || self.max_delay_seconds <= 0.0
            || self.max_delay_seconds > MAX_DELAY_LIMIT_SECONDS
        {
            return Err(Error::InvalidConfig(format!(
                "max_delay_seconds {} out of range (0-{} s)",
                self.max_delay_seconds, MAX_DELAY_LIMIT_SECONDS
            )));
        }
        // The cubic kernel needs at least four taps plus one sample of delay.
        if self.delay_capacity() < 8 {
            return Err(Error::InvalidConfig(format!(
                "delay line of {} samples is too short",
                self.delay_capacity()
            )));
        }
        self.simple.validate("simple", self.simple.grain_size)?;
        self.high_quality
            .validate("high_quality", self.high_quality.grain_size * 4)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EffectConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.delay_capacity(), 88200);
        assert_eq!(config.simple.overlap(), 768);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_rate_bounds() {
        assert_eq!(
            EffectConfig::new(4000).validate(),
            Err(Error::InvalidSampleRate(4000))
        );
        assert!(EffectConfig::new(8000).validate().is_ok());
        assert!(EffectConfig::new(384_000).validate().is_ok());
        assert!(EffectConfig::new(400_000).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_delay() {
        for seconds in [0.0, -1.0, f32::NAN, f32::INFINITY, 120.0] {
            let config = EffectConfig::default().max_delay_seconds(seconds);
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{seconds} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_bad_grains() {
        let zero_hop = GrainConfig {
            hop_size: 0,
            ..GrainConfig::SIMPLE
        };
        assert!(EffectConfig::default().simple(zero_hop).validate().is_err());

        let small_ring = GrainConfig {
            buffer_size: 4096,
            ..GrainConfig::HIGH_QUALITY
        };
        assert!(EffectConfig::default()
            .high_quality(small_ring)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EffectConfig =
            serde_json::from_str(r#"{ "sample_rate": 48000, "max_delay_seconds": 1.5 }"#)
                .unwrap();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.delay_capacity(), 72000);
        assert_eq!(config.simple, GrainConfig::SIMPLE);
        assert_eq!(config.high_quality, GrainConfig::HIGH_QUALITY);
    }
}
