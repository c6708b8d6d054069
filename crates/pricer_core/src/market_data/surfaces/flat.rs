//! Flat volatility surface implementation.

use super::traits::check_quote;
use super::VolatilitySurface;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Constant volatility across strikes and expiries.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatVol<T: Float> {
    sigma: T,
}

impl<T: Float> FlatVol<T> {
    /// Construct a flat surface.
    #[inline]
    pub fn new(sigma: T) -> Self {
        Self { sigma }
    }

    /// The constant volatility.
    #[inline]
    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: Float> VolatilitySurface<T> for FlatVol<T> {
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        check_quote(strike, expiry)?;
        if !(self.sigma > T::zero() && self.sigma.is_finite()) {
            return Err(MarketDataError::InvalidVolatility {
                volatility: self.sigma.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_variance() {
        let v = FlatVol::new(0.2_f64);
        assert!((v.total_variance(100.0, 2.0).unwrap() - 0.08).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_bad_quotes() {
        let v = FlatVol::new(0.2_f64);
        assert!(matches!(
            v.volatility(-1.0, 1.0),
            Err(MarketDataError::InvalidStrike { .. })
        ));
        assert!(matches!(
            v.volatility(100.0, 0.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_non_positive_sigma_surfaces_as_error() {
        assert!(FlatVol::new(0.0_f64).volatility(100.0, 1.0).is_err());
    }
}
