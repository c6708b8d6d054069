//! Scalar market snapshot consumed by every pricing engine.

use super::curves::YieldCurve;
use super::error::MarketDataError;
use super::surfaces::VolatilitySurface;
use crate::types::PricingError;

/// Immutable market snapshot: spot, continuously compounded risk-free rate,
/// Black volatility and continuous dividend yield.
///
/// Construction validates every field; a value that exists is always usable.
/// Sensitivity calculations never mutate a snapshot, they build bumped copies
/// through [`MarketData::with_spot`], [`MarketData::with_volatility`] and
/// [`MarketData::with_rate`].
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketData;
///
/// let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
/// assert_eq!(market.spot(), 100.0);
///
/// let bumped = market.with_spot(101.0).unwrap();
/// assert_eq!(bumped.spot(), 101.0);
/// assert_eq!(market.spot(), 100.0);
///
/// assert!(MarketData::new(0.0, 0.05, 0.2, 0.0).is_err());
/// assert!(MarketData::new(100.0, f64::NAN, 0.2, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketData {
    spot: f64,
    rate: f64,
    volatility: f64,
    dividend: f64,
}

impl MarketData {
    /// Creates a validated snapshot.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidInput` unless spot and volatility are finite and
    /// positive and rate and dividend are finite.
    pub fn new(spot: f64, rate: f64, volatility: f64, dividend: f64) -> Result<Self, PricingError> {
        Self::validated(spot, rate, volatility, dividend).map_err(PricingError::from)
    }

    fn validated(
        spot: f64,
        rate: f64,
        volatility: f64,
        dividend: f64,
    ) -> Result<Self, MarketDataError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(MarketDataError::InvalidSpot { spot });
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(MarketDataError::InvalidVolatility { volatility });
        }
        if !rate.is_finite() {
            return Err(MarketDataError::NonFiniteRate {
                name: "rate",
                value: rate,
            });
        }
        if !dividend.is_finite() {
            return Err(MarketDataError::NonFiniteRate {
                name: "dividend",
                value: dividend,
            });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
            dividend,
        })
    }

    /// Builds a snapshot from curve and surface providers.
    ///
    /// The rate is the curve's zero rate at `expiry` and the volatility is the
    /// surface's quote at (`strike`, `expiry`).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::market_data::{FlatCurve, FlatVol, MarketData};
    ///
    /// let market = MarketData::from_providers(
    ///     100.0,
    ///     &FlatCurve::new(0.03),
    ///     &FlatVol::new(0.25),
    ///     105.0,
    ///     0.5,
    ///     0.01,
    /// )
    /// .unwrap();
    /// assert!((market.rate() - 0.03).abs() < 1e-12);
    /// assert_eq!(market.volatility(), 0.25);
    /// ```
    pub fn from_providers<C, S>(
        spot: f64,
        curve: &C,
        surface: &S,
        strike: f64,
        expiry: f64,
        dividend: f64,
    ) -> Result<Self, PricingError>
    where
        C: YieldCurve<f64> + ?Sized,
        S: VolatilitySurface<f64> + ?Sized,
    {
        let rate = curve.zero_rate(expiry)?;
        let volatility = surface.volatility(strike, expiry)?;
        Self::new(spot, rate, volatility, dividend)
    }

    /// Spot price S.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Continuously compounded risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Black volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Continuous dividend yield q.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// Risk-neutral drift r − q.
    #[inline]
    pub fn carry(&self) -> f64 {
        self.rate - self.dividend
    }

    /// Discount factor e^{−rT}.
    #[inline]
    pub fn discount_factor(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }

    /// Copy with a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, PricingError> {
        Self::new(spot, self.rate, self.volatility, self.dividend)
    }

    /// Copy with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, PricingError> {
        Self::new(self.spot, self.rate, volatility, self.dividend)
    }

    /// Copy with a different risk-free rate.
    pub fn with_rate(&self, rate: f64) -> Result<Self, PricingError> {
        Self::new(self.spot, rate, self.volatility, self.dividend)
    }
}
