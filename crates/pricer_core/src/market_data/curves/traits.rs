//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Term structure of continuously compounded zero rates.
///
/// Implementors supply [`YieldCurve::zero_rate`]; discount factors and
/// forward rates follow from it.
///
/// # Contract
///
/// - `zero_rate(t)` is defined for `t >= 0`
/// - `discount_factor(t) = exp(-r(t) * t)`, so `D(0) = 1`
/// - `forward_rate(t1, t2) = -ln(D(t2) / D(t1)) / (t2 - t1)`
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// assert!((curve.forward_rate(1.0, 2.0).unwrap() - 0.05).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Zero rate r(t) for maturity `t` in years.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t < 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError>;

    /// Discount factor D(t) = exp(-r(t) t).
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        let r = self.zero_rate(t)?;
        Ok((-r * t).exp())
    }

    /// Forward rate between `t1` and `t2`.
    ///
    /// Collapses to the zero rate at `t1` when `t2 <= t1`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 <= t1 {
            return self.zero_rate(t1);
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / (t2 - t1))
    }
}

/// Shared maturity guard for curve implementations.
#[inline]
pub(crate) fn check_maturity<T: Float>(t: T) -> Result<(), MarketDataError> {
    if t < T::zero() || t.is_nan() {
        return Err(MarketDataError::InvalidMaturity {
            t: t.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Upward sloping curve: r(t) = 0.01 + 0.01 t
    struct LinearRateCurve;

    impl YieldCurve<f64> for LinearRateCurve {
        fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
            check_maturity(t)?;
            Ok(0.01 + 0.01 * t)
        }
    }

    #[test]
    fn test_default_discount_factor() {
        let df = LinearRateCurve.discount_factor(2.0).unwrap();
        assert!((df - (-0.06_f64).exp()).abs() < 1e-15);
        assert_eq!(LinearRateCurve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_default_forward_rate_exceeds_zero_rate_on_rising_curve() {
        let fwd = LinearRateCurve.forward_rate(1.0, 2.0).unwrap();
        // -ln(exp(-0.06)/exp(-0.02)) / 1 = 0.04
        assert!((fwd - 0.04).abs() < 1e-12);
        assert!(fwd > LinearRateCurve.zero_rate(2.0).unwrap());
    }

    #[test]
    fn test_forward_rate_inverted_interval() {
        let fwd = LinearRateCurve.forward_rate(2.0, 1.0).unwrap();
        assert!((fwd - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_negative_maturity_rejected() {
        assert!(matches!(
            LinearRateCurve.discount_factor(-1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }
}
