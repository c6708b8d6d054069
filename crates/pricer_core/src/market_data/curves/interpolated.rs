//! Interpolated yield curve implementation.

use super::traits::check_maturity;
use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// Pillar-based yield curve with linear interpolation on zero rates.
///
/// Rates are extrapolated flat before the first and after the last pillar.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, InterpolatedCurve};
///
/// let curve = InterpolatedCurve::<f64>::new(&[0.5, 1.0, 2.0, 5.0], &[0.02, 0.025, 0.03, 0.04]).unwrap();
/// assert!((curve.zero_rate(1.5).unwrap() - 0.0275).abs() < 1e-12);
/// // Flat beyond the last pillar
/// assert!((curve.zero_rate(30.0).unwrap() - 0.04).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedCurve<T: Float> {
    interpolator: LinearInterpolator<T>,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Construct from tenors (years) and zero rates.
    ///
    /// # Errors
    ///
    /// * `InvalidMaturity` - A negative tenor
    /// * `NonFiniteRate` - A non-finite rate
    /// * `Interpolation` - Fewer than 2 pillars, mismatched lengths or repeated tenors
    pub fn new(tenors: &[T], rates: &[T]) -> Result<Self, MarketDataError> {
        for &t in tenors {
            check_maturity(t)?;
        }
        if let Some(&r) = rates.iter().find(|r| !r.is_finite()) {
            return Err(MarketDataError::NonFiniteRate {
                name: "curve rate",
                value: r.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            interpolator: LinearInterpolator::new(tenors, rates)?,
        })
    }

    /// Pillar tenors in increasing order.
    #[inline]
    pub fn tenors(&self) -> &[T] {
        self.interpolator.xs()
    }

    /// Pillar zero rates aligned with [`InterpolatedCurve::tenors`].
    #[inline]
    pub fn rates(&self) -> &[T] {
        self.interpolator.ys()
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        Ok(self.interpolator.interpolate_clamped(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> InterpolatedCurve<f64> {
        InterpolatedCurve::new(&[1.0, 2.0, 5.0], &[0.01, 0.02, 0.035]).unwrap()
    }

    #[test]
    fn test_pillars_are_exact() {
        let c = curve();
        assert_relative_eq!(c.zero_rate(2.0).unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(c.zero_rate(5.0).unwrap(), 0.035, epsilon = 1e-12);
    }

    #[test]
    fn test_short_end_is_flat() {
        assert_relative_eq!(curve().zero_rate(0.25).unwrap(), 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_factors_decrease() {
        let c = curve();
        let mut prev = 1.0;
        for t in [0.5, 1.0, 2.0, 3.0, 5.0, 10.0] {
            let df = c.discount_factor(t).unwrap();
            assert!(df < prev);
            prev = df;
        }
    }

    #[test]
    fn test_rejects_bad_pillars() {
        assert!(InterpolatedCurve::new(&[1.0], &[0.01]).is_err());
        assert!(InterpolatedCurve::new(&[-1.0, 1.0], &[0.01, 0.02]).is_err());
        assert!(InterpolatedCurve::new(&[1.0, 2.0], &[0.01, f64::NAN]).is_err());
    }
}
