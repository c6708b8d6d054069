//! Cox-Ross-Rubinstein binomial tree.

use pricer_core::market_data::MarketData;
use pricer_core::types::PricingError;
use pricer_models::instruments::OptionContract;
use pricer_models::pricing::PricingModel;

use super::{check_probability, check_vanilla, LatticeConfig};
use crate::error::ConfigError;

/// CRR binomial tree.
///
/// dt = T/N, u = e^{σ√dt}, d = 1/u and p = (e^{(r−q)dt} − d)/(u − d).
/// Node (i, j) sits at S·e^{σ√dt(2j−i)}, computed directly rather than by
/// repeated multiplication so deep trees do not accumulate rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BinomialTree {
    config: LatticeConfig,
}

impl BinomialTree {
    /// Creates a tree with the given configuration.
    #[inline]
    pub fn new(config: LatticeConfig) -> Self {
        Self { config }
    }

    /// Tree with `n_steps` steps.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidStepCount` outside [1, 10_000].
    pub fn with_steps(n_steps: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(LatticeConfig::builder().n_steps(n_steps).build()?))
    }

    /// The tree configuration.
    #[inline]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Prices a European or American vanilla option.
    ///
    /// # Errors
    ///
    /// - `UnsupportedStyle` for any product other than Vanilla
    /// - `NumericalInfeasibility` if p falls outside [0, 1]
    pub fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        check_vanilla("binomial", contract)?;

        let n = self.config.n_steps();
        let expiry = contract.expiry();
        let spot = market.spot();
        let dt = expiry / n as f64;
        let sigma_sqrt_dt = market.volatility() * dt.sqrt();
        let u = sigma_sqrt_dt.exp();
        let d = 1.0 / u;
        let p = ((market.carry() * dt).exp() - d) / (u - d);
        check_probability("p", p)?;

        let disc = market.discount_factor(dt);
        let early = contract.style().allows_early_exercise();
        tracing::debug!(
            steps = n,
            p,
            american = early,
            "binomial tree pricing"
        );

        let node = |i: usize, j: usize| spot * (sigma_sqrt_dt * (2.0 * j as f64 - i as f64)).exp();

        let mut values: Vec<f64> = (0..=n).map(|j| contract.intrinsic(node(n, j))).collect();

        for i in (0..n).rev() {
            for j in 0..=i {
                let continuation = disc * (p * values[j + 1] + (1.0 - p) * values[j]);
                values[j] = if early {
                    continuation.max(contract.intrinsic(node(i, j)))
                } else {
                    continuation
                };
            }
            tracing::trace!(step = i, root = values[0], "binomial backward step");
        }

        Ok(values[0])
    }
}

impl PricingModel for BinomialTree {
    fn name(&self) -> &'static str {
        "binomial-crr"
    }

    fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        BinomialTree::price(self, contract, market)
    }
}
