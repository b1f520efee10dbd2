//! Distribution statistics over simulated samples.

use crate::error::{Result, SimulationError};

/// Summary statistics used by violin/box views.
///
/// `std_dev` is the population standard deviation. Percentiles use linear
/// interpolation between closest ranks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSummary {
    /// Number of samples
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// 5th percentile
    pub p5: f64,
    /// 25th percentile
    pub p25: f64,
    /// 50th percentile
    pub median: f64,
    /// 75th percentile
    pub p75: f64,
    /// 95th percentile
    pub p95: f64,
    /// Largest sample
    pub max: f64,
}

impl SampleSummary {
    /// Summarise `samples`.
    ///
    /// # Errors
    ///
    /// `EmptySample` if `samples` is empty.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(SimulationError::EmptySample);
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        Ok(Self {
            count: sorted.len(),
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            p5: percentile_sorted(&sorted, 0.05),
            p25: percentile_sorted(&sorted, 0.25),
            median: percentile_sorted(&sorted, 0.50),
            p75: percentile_sorted(&sorted, 0.75),
            p95: percentile_sorted(&sorted, 0.95),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }
}

/// Percentile `q` in [0, 1] of an ascending, non-empty slice.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_sample() {
        assert_eq!(
            SampleSummary::from_samples(&[]),
            Err(SimulationError::EmptySample)
        );
    }

    #[test]
    fn test_single_sample() {
        let s = SampleSummary::from_samples(&[7.0]).unwrap();
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 7.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.p5, 7.0);
        assert_eq!(s.p95, 7.0);
    }

    #[test]
    fn test_known_values() {
        let s = SampleSummary::from_samples(&[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_relative_eq!(s.mean, 3.0);
        assert_relative_eq!(s.std_dev, 2.0_f64.sqrt());
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_relative_eq!(s.median, 3.0);
        assert_relative_eq!(s.p25, 2.0);
        assert_relative_eq!(s.p75, 4.0);
        assert_relative_eq!(s.p5, 1.2, epsilon = 1e-12);
        assert_relative_eq!(s.iqr(), 2.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [0.0, 10.0];
        assert_relative_eq!(percentile_sorted(&sorted, 0.25), 2.5);
        assert_eq!(percentile_sorted(&sorted, 1.5), 10.0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_quantiles_are_ordered(
                samples in proptest::collection::vec(0.0f64..100.0, 1..200),
            ) {
                let s = SampleSummary::from_samples(&samples).unwrap();
                // interpolation may land one ulp past a neighbouring rank
                let eps = 1e-9;
                let chain = [s.min, s.p5, s.p25, s.median, s.p75, s.p95, s.max];
                for pair in chain.windows(2) {
                    prop_assert!(pair[0] <= pair[1] + eps);
                }
                prop_assert!(s.mean >= s.min - 1e-9 && s.mean <= s.max + 1e-9);
                prop_assert!(s.std_dev >= 0.0);
            }
        }
    }
}
