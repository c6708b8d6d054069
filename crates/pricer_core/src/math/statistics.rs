//! Sample statistics for simulation estimators.
//!
//! [`RunningStats`] accumulates count, sum and sum of squares in a single
//! pass. Two accumulators combine with [`RunningStats::merge`], which is
//! commutative and associative, so per-worker partial results can be reduced
//! in any order.

/// Single-pass accumulator of sample moments.
///
/// # Examples
///
/// ```
/// use pricer_core::math::statistics::RunningStats;
///
/// let mut stats = RunningStats::new();
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     stats.push(x);
/// }
/// assert_eq!(stats.count(), 4);
/// assert!((stats.mean() - 2.5).abs() < 1e-12);
/// assert!((stats.variance() - 5.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunningStats {
    count: usize,
    sum: f64,
    sum_sq: f64,
}

impl RunningStats {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        self.sum += x;
        self.sum_sq += x * x;
    }

    /// Combines two accumulators.
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
        }
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sum of observations.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Sample mean, zero when empty.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Unbiased sample variance (n − 1 denominator), zero below two samples.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        // Cancellation can push this fractionally negative
        ((self.sum_sq - self.sum * self.sum / n) / (n - 1.0)).max(0.0)
    }

    /// Standard error of the mean, √(variance / n).
    #[inline]
    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.variance() / self.count as f64).sqrt()
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        for x in iter {
            stats.push(x);
        }
        stats
    }
}

/// Arithmetic mean of a slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().copied().collect::<RunningStats>().mean()
}

/// Unbiased sample variance of a slice.
#[inline]
pub fn variance(values: &[f64]) -> f64 {
    values.iter().copied().collect::<RunningStats>().variance()
}

/// Standard error of the mean of a slice.
#[inline]
pub fn std_error(values: &[f64]) -> f64 {
    values.iter().copied().collect::<RunningStats>().std_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty_stats() {
        let stats = RunningStats::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.std_error(), 0.0);
    }

    #[test]
    fn test_single_sample_has_zero_variance() {
        let stats: RunningStats = [7.0].into_iter().collect();
        assert_eq!(stats.mean(), 7.0);
        assert_eq!(stats.variance(), 0.0);
    }

    #[test]
    fn test_slice_helpers() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&xs), 5.0, epsilon = 1e-12);
        assert_relative_eq!(variance(&xs), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(std_error(&xs), (32.0 / 7.0 / 8.0_f64).sqrt(), epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_merge_is_order_independent(
            xs in prop::collection::vec(-100.0f64..100.0, 1..50),
            split in 0usize..50,
        ) {
            let split = split.min(xs.len());
            let whole: RunningStats = xs.iter().copied().collect();
            let left: RunningStats = xs[..split].iter().copied().collect();
            let right: RunningStats = xs[split..].iter().copied().collect();

            let lr = left.merge(right);
            let rl = right.merge(left);
            prop_assert_eq!(lr.count(), whole.count());
            prop_assert!((lr.mean() - whole.mean()).abs() < 1e-9);
            prop_assert!((lr.variance() - rl.variance()).abs() < 1e-9);
        }
    }
}
