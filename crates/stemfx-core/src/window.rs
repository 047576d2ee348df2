//! Precomputed Hann window tables.

use std::f64::consts::TAU;

/// Immutable Hann taper over a fixed grain length.
///
/// Two constructions exist because the simple and high-quality pitch
/// shifters evaluate the cosine argument differently. Only the first half is
/// evaluated; the second half mirrors it so the table is exactly symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowTable {
    coeffs: Vec<f32>,
}

impl WindowTable {
    /// `w[i] = 0.5 * (1 - cos(2π·i / (N-1)))`
    pub fn hann(len: usize) -> Self {
        Self::build(len, |i, last| {
            0.5 * (1.0 - (TAU * i as f64 / last as f64).cos())
        })
    }

    /// Phase form: `phase = i / (N-1)`, `w = 0.5 * (1 - cos(2π·phase))`
    pub fn hann_phase(len: usize) -> Self {
        Self::build(len, |i, last| {
            let phase = i as f64 / last as f64;
            0.5 * (1.0 - (TAU * phase).cos())
        })
    }

    fn build(len: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        if len < 2 {
            return Self {
                coeffs: vec![1.0; len],
            };
        }
        let last = len - 1;
        let coeffs = (0..len).map(|i| f(i.min(last - i), last) as f32).collect();
        Self { coeffs }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Coefficient at `i`; zero outside the table.
    #[inline]
    pub fn at(&self, i: usize) -> f32 {
        self.coeffs.get(i).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.coeffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_endpoints_and_peak() {
        for window in [WindowTable::hann(1024), WindowTable::hann_phase(2048)] {
            let n = window.len();
            assert_abs_diff_eq!(window.at(0), 0.0, epsilon = 1e-7);
            assert_abs_diff_eq!(window.at(n - 1), 0.0, epsilon = 1e-7);
            assert_abs_diff_eq!(window.at(n / 2), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_odd_length_has_exact_peak() {
        let window = WindowTable::hann(9);
        assert_eq!(window.at(4), 1.0);
        assert_abs_diff_eq!(window.at(2), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_lengths() {
        assert!(WindowTable::hann(0).is_empty());
        assert_eq!(WindowTable::hann_phase(1).as_slice(), &[1.0]);
        assert_eq!(WindowTable::hann(2).as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_is_zero() {
        assert_eq!(WindowTable::hann(16).at(16), 0.0);
    }

    proptest! {
        #[test]
        fn symmetric(len in 2usize..4096) {
            for window in [WindowTable::hann(len), WindowTable::hann_phase(len)] {
                for i in 0..len {
                    prop_assert_eq!(window.at(i), window.at(len - 1 - i));
                }
            }
        }

        #[test]
        fn bounded(len in 2usize..4096) {
            let window = WindowTable::hann(len);
            prop_assert!(window.as_slice().iter().all(|&w| (0.0..=1.0).contains(&w)));
        }
    }
}
