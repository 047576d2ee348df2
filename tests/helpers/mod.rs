//! Test helpers and fixtures for stemfx integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (bypass, integer delays)
//! - `DSP_EPSILON` (1e-4): DSP processing (interpolation, overlap-add)
//! - `PERCEPTUAL_EPSILON` (0.001): Perceptual equivalence (-60dB)

pub mod tolerances;

use stemfx::prelude::*;

/// Default test sample rate
pub const TEST_SAMPLE_RATE: u32 = 44100;

/// Standard block size for deterministic testing
pub const TEST_BUFFER_SIZE: usize = 512;

/// Install a test-writer subscriber so `debug!` output shows on failure.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Create an instance at the test sample rate.
pub fn test_instance(kind: EffectKind) -> EffectInstance {
    EffectInstance::new(kind, TEST_SAMPLE_RATE).expect("Failed to create test instance")
}

/// Every effect kind, in a fixed order.
pub fn all_kinds() -> [EffectKind; 3] {
    [
        EffectKind::PitchShift(PitchQuality::Simple),
        EffectKind::PitchShift(PitchQuality::High),
        EffectKind::Delay,
    ]
}

/// Parameters that exercise the processing path of `kind`.
pub fn active_params(kind: EffectKind) -> EffectParams {
    match kind {
        EffectKind::PitchShift(_) => EffectParams::PitchShift { ratio: 1.5 },
        EffectKind::Delay => EffectParams::Delay {
            seconds: 0.25,
            feedback: 0.5,
        },
    }
}

/// Run `left`/`right` through `instance` in `block_size` chunks.
///
/// Returns `(left_out, right_out)`.
pub fn process_stereo(
    instance: &mut EffectInstance,
    left: &[f32],
    right: &[f32],
    params: EffectParams,
    block_size: usize,
) -> (Vec<f32>, Vec<f32>) {
    let len = left.len().min(right.len());
    let mut out_l = vec![0.0; len];
    let mut out_r = vec![0.0; len];

    let mut begin = 0;
    while begin < len {
        let end = (begin + block_size).min(len);
        instance
            .process(
                begin,
                end,
                StereoBuffer::new(left, right),
                StereoBufferMut::new(&mut out_l, &mut out_r),
                params,
            )
            .expect("Params must match the instance");
        begin = end;
    }

    (out_l, out_r)
}

/// Same signal on both channels; returns the left output.
pub fn process_mono(instance: &mut EffectInstance, input: &[f32], params: EffectParams) -> Vec<f32> {
    process_stereo(instance, input, input, params, TEST_BUFFER_SIZE).0
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Generate an impulse signal (single sample at 1.0, rest zeros).
pub fn generate_impulse(num_samples: usize, position: usize) -> Vec<f32> {
    let mut samples = vec![0.0; num_samples];
    if position < num_samples {
        samples[position] = 1.0;
    }
    samples
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Result of comparing two audio buffers.
#[derive(Debug, Clone)]
pub struct AudioComparisonResult {
    /// Whether all samples are within tolerance.
    pub equal: bool,
    /// Maximum absolute difference between any two samples.
    pub max_diff: f32,
    /// Index of first sample that exceeds tolerance (if any).
    pub first_diff_sample: Option<usize>,
    /// Number of samples that exceed tolerance.
    pub num_diffs: usize,
}

/// Compare two audio buffers with epsilon tolerance.
pub fn compare_audio(a: &[f32], b: &[f32], epsilon: f32) -> AudioComparisonResult {
    if a.len() != b.len() {
        return AudioComparisonResult {
            equal: false,
            max_diff: f32::MAX,
            first_diff_sample: Some(0),
            num_diffs: a.len().max(b.len()),
        };
    }

    let mut max_diff: f32 = 0.0;
    let mut first_diff: Option<usize> = None;
    let mut num_diffs = 0;

    for (i, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        max_diff = max_diff.max(diff);
        if diff > epsilon {
            num_diffs += 1;
            if first_diff.is_none() {
                first_diff = Some(i);
            }
        }
    }

    AudioComparisonResult {
        equal: num_diffs == 0,
        max_diff,
        first_diff_sample: first_diff,
        num_diffs,
    }
}

/// Assert two signals are equal within tolerance, with detailed error message.
pub fn assert_signals_equal(a: &[f32], b: &[f32], epsilon: f32, context: &str) {
    let result = compare_audio(a, b, epsilon);
    assert!(
        result.equal,
        "{}: Signals differ - first diff at sample {:?}, max_diff={:.6}, num_diffs={}",
        context,
        result.first_diff_sample,
        result.max_diff,
        result.num_diffs
    );
}

/// Assert signal is silent within threshold.
pub fn assert_is_silent(samples: &[f32], threshold: f32, context: &str) {
    let max_val = peak(samples);
    assert!(
        max_val <= threshold,
        "{}: Expected silence (threshold {}), but peak was {}",
        context,
        threshold,
        max_val
    );
}

/// Assert signal is NOT silent (has content above threshold).
pub fn assert_not_silent(samples: &[f32], min_peak: f32, context: &str) {
    let max_val = peak(samples);
    assert!(
        max_val >= min_peak,
        "{}: Expected audio (min_peak {}), but peak was only {}",
        context,
        min_peak,
        max_val
    );
}
