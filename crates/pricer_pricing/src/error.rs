//! Engine configuration errors.
//!
//! Raised by the `build()` step of every engine config builder. Converts
//! into [`PricingError::InvalidInput`] so engine entry points can use `?`.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error for the pricing engines.
///
/// # Examples
///
/// ```
/// use pricer_pricing::ConfigError;
///
/// let err = ConfigError::InvalidPathCount(0);
/// assert!(err.to_string().contains("Invalid path count 0"));
/// ```
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Step count outside valid range [1, 10_000].
    #[error("Invalid step count {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidStepCount(20_000);
        assert_eq!(
            err.to_string(),
            "Invalid step count 20000: must be in range [1, 10_000]"
        );

        let err = ConfigError::InvalidParameter {
            name: "degree",
            value: "9 is outside [1, 8]".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter 'degree': 9 is outside [1, 8]");
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = ConfigError::InvalidPathCount(0).into();
        assert!(err.is_invalid_input());
    }
}
