//! Volatility surface trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Black volatility quoted by strike and expiry.
///
/// # Contract
///
/// - `strike > 0` and `expiry > 0`, otherwise an error is returned
/// - the returned volatility is positive
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolatilitySurface, FlatVol};
///
/// let vol = FlatVol::new(0.2_f64);
/// assert_eq!(vol.volatility(100.0, 1.0).unwrap(), 0.2);
/// assert!(vol.volatility(0.0, 1.0).is_err());
/// ```
pub trait VolatilitySurface<T: Float> {
    /// Volatility σ(K, T).
    ///
    /// # Errors
    ///
    /// * `InvalidStrike` - `strike <= 0`
    /// * `InvalidMaturity` - `expiry <= 0`
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError>;

    /// Total implied variance σ²(K, T) · T.
    fn total_variance(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        let sigma = self.volatility(strike, expiry)?;
        Ok(sigma * sigma * expiry)
    }
}

/// Shared strike/expiry guard for surface implementations.
#[inline]
pub(crate) fn check_quote<T: Float>(strike: T, expiry: T) -> Result<(), MarketDataError> {
    if !(strike > T::zero()) {
        return Err(MarketDataError::InvalidStrike {
            strike: strike.to_f64().unwrap_or(f64::NAN),
        });
    }
    if !(expiry > T::zero()) {
        return Err(MarketDataError::InvalidMaturity {
            t: expiry.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}
