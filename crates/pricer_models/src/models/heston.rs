//! Heston stochastic volatility model parameters.
//!
//! ```text
//! dS = (r - q) * S * dt + sqrt(v) * S * dW_S
//! dv = kappa * (theta - v) * dt + sigma * sqrt(v) * dW_v
//! E[dW_S * dW_v] = rho * dt
//! ```
//! where:
//! - v = instantaneous variance, starting at v0
//! - kappa = mean reversion speed
//! - theta = long-run variance
//! - sigma = volatility of variance (vol-of-vol)
//! - rho = correlation between the asset and variance drivers
//!
//! ## Feller condition
//!
//! The variance process stays strictly positive when
//! ```text
//! 2 * kappa * theta > sigma^2
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::heston::{HestonError, HestonParams};
//!
//! let params = HestonParams::new(1.5, 0.04, 0.3, -0.7, 0.04).unwrap();
//! assert!(params.satisfies_feller());
//!
//! assert_eq!(
//!     HestonParams::new(1.5, 0.04, 0.3, -1.2, 0.04),
//!     Err(HestonError::InvalidRho(-1.2))
//! );
//! ```

use pricer_core::types::PricingError;
use thiserror::Error;

/// Heston parameter validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HestonError {
    /// Mean reversion speed must be positive.
    #[error("Invalid mean reversion speed: kappa = {0} (must be positive)")]
    InvalidKappa(f64),

    /// Long-run variance must be non-negative.
    #[error("Invalid long-run variance: theta = {0} (must be non-negative)")]
    InvalidTheta(f64),

    /// Vol-of-vol must be non-negative.
    #[error("Invalid vol-of-vol: sigma = {0} (must be non-negative)")]
    InvalidSigma(f64),

    /// Correlation must lie in [-1, 1].
    #[error("Invalid correlation: rho = {0} (must lie in [-1, 1])")]
    InvalidRho(f64),

    /// Initial variance must be non-negative.
    #[error("Invalid initial variance: v0 = {0} (must be non-negative)")]
    InvalidV0(f64),
}

impl From<HestonError> for PricingError {
    fn from(err: HestonError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Heston model parameters.
///
/// Market inputs (spot, rate, dividend) come from the pricing snapshot,
/// so only the variance dynamics live here.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParams {
    /// Mean reversion speed (kappa)
    pub kappa: f64,
    /// Long-run variance (theta)
    pub theta: f64,
    /// Volatility of variance (sigma)
    pub sigma: f64,
    /// Asset/variance correlation (rho)
    pub rho: f64,
    /// Initial variance (v0)
    pub v0: f64,
}

impl HestonParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    /// The first failing constraint among kappa > 0, theta >= 0, sigma >= 0,
    /// rho in [-1, 1] and v0 >= 0 (all finite).
    pub fn new(kappa: f64, theta: f64, sigma: f64, rho: f64, v0: f64) -> Result<Self, HestonError> {
        let params = Self {
            kappa,
            theta,
            sigma,
            rho,
            v0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Re-checks the constraints, for values assembled field by field.
    pub fn validate(&self) -> Result<(), HestonError> {
        if !(self.kappa.is_finite() && self.kappa > 0.0) {
            return Err(HestonError::InvalidKappa(self.kappa));
        }
        if !(self.theta.is_finite() && self.theta >= 0.0) {
            return Err(HestonError::InvalidTheta(self.theta));
        }
        if !(self.sigma.is_finite() && self.sigma >= 0.0) {
            return Err(HestonError::InvalidSigma(self.sigma));
        }
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(HestonError::InvalidRho(self.rho));
        }
        if !(self.v0.is_finite() && self.v0 >= 0.0) {
            return Err(HestonError::InvalidV0(self.v0));
        }
        Ok(())
    }

    /// Feller condition 2κθ > σ².
    ///
    /// ```
    /// use pricer_models::models::heston::HestonParams;
    ///
    /// // 2 * 0.5 * 0.04 = 0.04 < 0.5^2 = 0.25
    /// let params = HestonParams::new(0.5, 0.04, 0.5, -0.7, 0.04).unwrap();
    /// assert!(!params.satisfies_feller());
    /// ```
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta > self.sigma * self.sigma
    }

    /// Feller ratio 2κθ / σ², infinite when σ = 0.
    pub fn feller_ratio(&self) -> f64 {
        let denominator = self.sigma * self.sigma;
        if denominator > 0.0 {
            2.0 * self.kappa * self.theta / denominator
        } else {
            f64::INFINITY
        }
    }

    /// Time-averaged expected variance over [0, T]:
    ///
    /// ```text
    /// v̄ = θ + (v0 − θ)(1 − e^{−κT}) / (κT)
    /// ```
    ///
    /// This is the exact Black-Scholes variance when σ = 0.
    pub fn average_variance(&self, expiry: f64) -> f64 {
        let kt = self.kappa * expiry;
        if kt < 1e-12 {
            return self.v0;
        }
        self.theta + (self.v0 - self.theta) * (1.0 - (-kt).exp()) / kt
    }
}

impl Default for HestonParams {
    /// κ = 2, θ = 0.04, σ = 0.3, ρ = −0.7, v0 = 0.04.
    fn default() -> Self {
        Self {
            kappa: 2.0,
            theta: 0.04,
            sigma: 0.3,
            rho: -0.7,
            v0: 0.04,
        }
    }
}
