//! Instrument error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// Raised when a contract or one of its product terms fails validation.
/// Every variant surfaces as [`PricingError::InvalidInput`].
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Strike is non-positive or non-finite.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Expiry is non-positive or non-finite.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Barrier level is non-positive or non-finite.
    #[error("Invalid barrier level: H = {level}")]
    InvalidBarrier {
        /// The invalid barrier level
        level: f64,
    },

    /// Product term outside its admissible range.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
