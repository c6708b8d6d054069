//! Grid volatility surface with bilinear interpolation.

use super::traits::check_quote;
use super::VolatilitySurface;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::BilinearInterpolator;
use num_traits::Float;

/// Volatility grid over strikes and expiries.
///
/// `vols[i][j]` is the volatility at `expiries[i]` and `strikes[j]`. Lookups
/// interpolate bilinearly and clamp to the grid boundary outside it.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{InterpolatedVolSurface, VolatilitySurface};
///
/// let strikes = [90.0, 100.0, 110.0];
/// let expiries = [0.25, 1.0];
/// let vols = [&[0.24, 0.20, 0.22][..], &[0.26, 0.22, 0.23][..]];
/// let surface = InterpolatedVolSurface::<f64>::new(&strikes, &expiries, &vols).unwrap();
///
/// assert!((surface.volatility(100.0, 0.25).unwrap() - 0.20).abs() < 1e-12);
/// // Beyond the last expiry the surface is flat
/// assert!((surface.volatility(100.0, 5.0).unwrap() - 0.22).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedVolSurface<T: Float> {
    grid: BilinearInterpolator<T>,
}

impl<T: Float> InterpolatedVolSurface<T> {
    /// Construct from strike and expiry axes and the `[expiry][strike]` grid.
    ///
    /// # Errors
    ///
    /// * `InvalidVolatility` - A grid entry is non-positive or non-finite
    /// * `Interpolation` - Axes too short, unsorted, or grid shape mismatch
    pub fn new(strikes: &[T], expiries: &[T], vols: &[&[T]]) -> Result<Self, MarketDataError> {
        if let Some(&v) = vols
            .iter()
            .flat_map(|row| row.iter())
            .find(|v| !(v.is_finite() && **v > T::zero()))
        {
            return Err(MarketDataError::InvalidVolatility {
                volatility: v.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            grid: BilinearInterpolator::new(expiries, strikes, vols)?,
        })
    }

    /// Strike range covered by the grid.
    pub fn strike_range(&self) -> (T, T) {
        self.grid.domain_y()
    }

    /// Expiry range covered by the grid.
    pub fn expiry_range(&self) -> (T, T) {
        self.grid.domain_x()
    }
}

impl<T: Float> VolatilitySurface<T> for InterpolatedVolSurface<T> {
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        check_quote(strike, expiry)?;
        Ok(self.grid.interpolate_clamped(expiry, strike))
    }
}
