//! Log-space trinomial tree.

use pricer_core::market_data::MarketData;
use pricer_core::types::PricingError;
use pricer_models::instruments::OptionContract;
use pricer_models::pricing::PricingModel;

use super::{check_probability, check_vanilla, LatticeConfig};
use crate::error::ConfigError;

/// Recombining trinomial tree in log price.
///
/// With dx = σ√(3dt), ν = r − q − σ²/2, a = (σ²dt + ν²dt²)/dx² and
/// b = νdt/dx the branch probabilities are pu = ½(a + b), pm = 1 − a and
/// pd = ½(a − b). Layer i holds 2i + 1 nodes at S·e^{j·dx}, j = −i..=i.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrinomialTree {
    config: LatticeConfig,
}

impl TrinomialTree {
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

    /// Branch probabilities (pu, pm, pd) and log step dx for step `dt`.
    fn probabilities(market: &MarketData, dt: f64) -> Result<(f64, f64, f64, f64), PricingError> {
        let sigma = market.volatility();
        let dx = sigma * (3.0 * dt).sqrt();
        let nu = market.carry() - 0.5 * sigma * sigma;
        let a = (sigma * sigma * dt + nu * nu * dt * dt) / (dx * dx);
        let b = nu * dt / dx;

        let pu = 0.5 * (a + b);
        let pm = 1.0 - a;
        let pd = 0.5 * (a - b);
        check_probability("pu", pu)?;
        check_probability("pm", pm)?;
        check_probability("pd", pd)?;
        Ok((pu, pm, pd, dx))
    }

    /// Prices a European or American vanilla option.
    ///
    /// # Errors
    ///
    /// - `UnsupportedStyle` for any product other than Vanilla
    /// - `NumericalInfeasibility` if any branch probability leaves [0, 1]
    pub fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        check_vanilla("trinomial", contract)?;

        let n = self.config.n_steps();
        let spot = market.spot();
        let dt = contract.expiry() / n as f64;
        let (pu, pm, pd, dx) = Self::probabilities(market, dt)?;
        let disc = market.discount_factor(dt);
        let early = contract.style().allows_early_exercise();
        tracing::debug!(steps = n, pu, pm, pd, american = early, "trinomial tree pricing");

        // Index k on layer i is node j = k − i.
        let node = |i: usize, k: usize| spot * ((k as f64 - i as f64) * dx).exp();

        let mut values: Vec<f64> = (0..=2 * n).map(|k| contract.intrinsic(node(n, k))).collect();

        for i in (0..n).rev() {
            for k in 0..=2 * i {
                let continuation = disc * (pu * values[k + 2] + pm * values[k + 1] + pd * values[k]);
                values[k] = if early {
                    continuation.max(contract.intrinsic(node(i, k)))
                } else {
                    continuation
                };
            }
            tracing::trace!(step = i, "trinomial backward step");
        }

        Ok(values[0])
    }
}

impl PricingModel for TrinomialTree {
    fn name(&self) -> &'static str {
        "trinomial"
    }

    fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        TrinomialTree::price(self, contract, market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::BinomialTree;
    use approx::assert_abs_diff_eq;
    use pricer_models::analytical::BlackScholes;
    use pricer_models::instruments::{OptionType, ProductKind};

    fn market() -> MarketData {
        MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap()
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (pu, pm, pd, _) = TrinomialTree::probabilities(&market(), 0.01).unwrap();
        assert_abs_diff_eq!(pu + pm + pd, 1.0, epsilon = 1e-14);
        assert!(pu > pd, "positive drift tilts the tree upwards");
    }

    #[test]
    fn test_european_converges_to_black_scholes() {
        let tree = TrinomialTree::with_steps(500).unwrap();
        let bs = BlackScholes::from_market(&market());
        for option_type in [OptionType::Call, OptionType::Put] {
            let contract = OptionContract::european(option_type, 100.0, 1.0).unwrap();
            assert_abs_diff_eq!(
                tree.price(&contract, &market()).unwrap(),
                bs.price(option_type, 100.0, 1.0),
                epsilon = 0.1
            );
        }
    }

    #[test]
    fn test_with_dividend_matches_black_scholes() {
        let m = MarketData::new(100.0, 0.05, 0.25, 0.03).unwrap();
        let tree = TrinomialTree::with_steps(400).unwrap();
        let call = OptionContract::european(OptionType::Call, 110.0, 0.5).unwrap();
        let bs = BlackScholes::from_market(&m).price(OptionType::Call, 110.0, 0.5);
        assert_abs_diff_eq!(tree.price(&call, &m).unwrap(), bs, epsilon = 0.1);
    }

    #[test]
    fn test_american_put_agrees_with_binomial() {
        let contract = OptionContract::american(OptionType::Put, 100.0, 1.0).unwrap();
        let tri = TrinomialTree::with_steps(500).unwrap().price(&contract, &market()).unwrap();
        let bin = BinomialTree::with_steps(500).unwrap().price(&contract, &market()).unwrap();
        assert_abs_diff_eq!(tri, bin, epsilon = 0.05);
    }

    #[test]
    fn test_american_dominates_european() {
        let tree = TrinomialTree::with_steps(200).unwrap();
        let european = OptionContract::european(OptionType::Put, 110.0, 1.0).unwrap();
        let american = OptionContract::american(OptionType::Put, 110.0, 1.0).unwrap();
        let e = tree.price(&european, &market()).unwrap();
        let a = tree.price(&american, &market()).unwrap();
        assert!(a >= e);
        assert!(e >= 0.0);
        assert!(a >= american.intrinsic(100.0));
    }

    #[test]
    fn test_extreme_drift_is_infeasible() {
        let tree = TrinomialTree::with_steps(1).unwrap();
        let call = OptionContract::european(OptionType::Call, 100.0, 1.0).unwrap();
        let m = MarketData::new(100.0, 0.5, 0.01, 0.0).unwrap();
        assert!(matches!(
            tree.price(&call, &m),
            Err(PricingError::NumericalInfeasibility(_))
        ));
    }

    #[test]
    fn test_digital_unsupported() {
        let contract = OptionContract::european(OptionType::Put, 100.0, 1.0)
            .unwrap()
            .with_kind(ProductKind::digital(5.0).unwrap());
        let err = TrinomialTree::default().price(&contract, &market()).unwrap_err();
        assert!(err.is_unsupported());
    }
}
