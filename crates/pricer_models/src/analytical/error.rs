//! Error types for analytical pricing operations.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Exercise style the closed form cannot price.
    #[error("Unsupported exercise style: {style}")]
    UnsupportedExerciseStyle {
        /// Description of the unsupported exercise style
        style: String,
    },

    /// Product kind the closed form cannot price.
    #[error("Unsupported product: {product}")]
    UnsupportedProduct {
        /// Name of the product kind
        product: String,
    },

    /// Target price outside the range attainable by the model.
    #[error("Invalid target price: {price}")]
    InvalidTargetPrice {
        /// The rejected target
        price: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::UnsupportedExerciseStyle { .. }
            | AnalyticalError::UnsupportedProduct { .. } => {
                PricingError::UnsupportedStyle(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}
