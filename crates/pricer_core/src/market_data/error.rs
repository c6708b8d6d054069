//! Market data error types.

use crate::types::{InterpolationError, PricingError};
use thiserror::Error;

/// Market data construction and lookup errors.
///
/// All variants surface to callers as [`PricingError::InvalidInput`].
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidSpot { spot: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Spot is non-positive or non-finite.
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The rejected spot
        spot: f64,
    },

    /// Volatility is non-positive or non-finite.
    #[error("Invalid volatility: sigma = {volatility}")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// A rate-like field (risk-free rate, dividend yield, curve pillar) is non-finite.
    #[error("Invalid {name}: {value}")]
    NonFiniteRate {
        /// Field name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Negative time to maturity.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Non-positive strike passed to a surface lookup.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
