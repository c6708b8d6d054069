//! Common contract parameters.

use super::error::InstrumentError;

/// Strike and expiry shared by every contract.
///
/// # Examples
/// ```
/// use pricer_models::instruments::ContractParams;
///
/// let params = ContractParams::new(100.0, 1.0).unwrap();
/// assert_eq!(params.strike(), 100.0);
/// assert_eq!(params.expiry(), 1.0);
///
/// assert!(ContractParams::new(-100.0, 1.0).is_err());
/// assert!(ContractParams::new(100.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractParams {
    strike: f64,
    expiry: f64,
}

impl ContractParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    /// `InvalidStrike` or `InvalidExpiry` unless both are finite and positive.
    pub fn new(strike: f64, expiry: f64) -> Result<Self, InstrumentError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if !(expiry.is_finite() && expiry > 0.0) {
            return Err(InstrumentError::InvalidExpiry { expiry });
        }
        Ok(Self { strike, expiry })
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Copy with a different expiry.
    pub fn with_expiry(&self, expiry: f64) -> Result<Self, InstrumentError> {
        Self::new(self.strike, expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            ContractParams::new(f64::NAN, 1.0),
            Err(InstrumentError::InvalidStrike { .. })
        ));
        assert!(matches!(
            ContractParams::new(100.0, f64::INFINITY),
            Err(InstrumentError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_with_expiry_revalidates() {
        let p = ContractParams::new(100.0, 1.0).unwrap();
        assert_eq!(p.with_expiry(0.5).unwrap().expiry(), 0.5);
        assert!(p.with_expiry(-0.5).is_err());
    }
}
