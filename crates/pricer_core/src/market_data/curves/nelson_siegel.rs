//! Nelson-Siegel parametric yield curve.

use super::traits::check_maturity;
use super::YieldCurve;
use crate::market_data::error::MarketDataError;

/// Nelson-Siegel curve:
///
/// ```text
/// r(t) = β0 + β1 f(t) + β2 (f(t) − e^{−λt}),   f(t) = (1 − e^{−λt}) / (λt)
/// ```
///
/// with `r(0) = β0 + β1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NelsonSiegelCurve {
    beta0: f64,
    beta1: f64,
    beta2: f64,
    lambda: f64,
}

impl NelsonSiegelCurve {
    /// Creates a curve; `lambda` must be positive and all betas finite.
    pub fn new(beta0: f64, beta1: f64, beta2: f64, lambda: f64) -> Result<Self, MarketDataError> {
        for (name, value) in [("beta0", beta0), ("beta1", beta1), ("beta2", beta2)] {
            if !value.is_finite() {
                return Err(MarketDataError::NonFiniteRate { name, value });
            }
        }
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(MarketDataError::NonFiniteRate {
                name: "lambda",
                value: lambda,
            });
        }
        Ok(Self {
            beta0,
            beta1,
            beta2,
            lambda,
        })
    }
}

impl YieldCurve<f64> for NelsonSiegelCurve {
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        check_maturity(t)?;
        if t == 0.0 {
            return Ok(self.beta0 + self.beta1);
        }
        let decay = (-self.lambda * t).exp();
        let factor = (1.0 - decay) / (self.lambda * t);
        Ok(self.beta0 + self.beta1 * factor + self.beta2 * (factor - decay))
    }
}
