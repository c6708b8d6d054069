//! Longstaff-Schwartz least-squares Monte Carlo for American options.

use pricer_core::market_data::MarketData;
use pricer_core::math::linalg::{least_squares, LinalgError, Matrix};
use pricer_core::math::statistics::RunningStats;
use pricer_core::types::PricingError;
use pricer_models::instruments::{OptionContract, ProductKind};
use pricer_models::pricing::PricingModel;

use super::{laguerre_basis, LsmcConfig};
use crate::mc::{simulate_antithetic_pair, simulate_path, GbmParams, PricingResult};
use crate::rng::PricerRng;

/// Path matrix stored row-major: `paths[path * (n_steps + 1) + step]`.
struct PathMatrix {
    data: Vec<f64>,
    width: usize,
}

impl PathMatrix {
    #[inline]
    fn at(&self, path: usize, step: usize) -> f64 {
        self.data[path * self.width + step]
    }
}

/// Longstaff-Schwartz engine.
///
/// Each path carries a single cash flow and the step it is paid at. Going
/// backwards from expiry, the discounted cash flows of in-the-money paths
/// are regressed on the Laguerre basis of S/K; wherever immediate exercise
/// beats the fitted continuation value the path's cash flow moves to the
/// current step. Time zero compares the estimate against immediate
/// exercise, as the trees do at their root.
///
/// # Examples
///
/// ```rust,no_run
/// use pricer_core::market_data::MarketData;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_pricing::lsmc::{LsmcConfig, LsmcEngine};
///
/// let engine = LsmcEngine::new(LsmcConfig::default());
/// let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
/// let put = OptionContract::american(OptionType::Put, 100.0, 1.0).unwrap();
/// let price = engine.price(&put, &market).unwrap();
/// assert!(price > 5.57);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LsmcEngine {
    config: LsmcConfig,
}

impl LsmcEngine {
    /// Creates an engine with the given configuration.
    #[inline]
    pub fn new(config: LsmcConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    #[inline]
    pub fn config(&self) -> &LsmcConfig {
        &self.config
    }

    fn check_contract(contract: &OptionContract) -> Result<(), PricingError> {
        if !contract.style().allows_early_exercise() {
            return Err(PricingError::UnsupportedStyle(format!(
                "LSMC prices American exercise only, got {}",
                contract.style()
            )));
        }
        if !matches!(contract.kind(), ProductKind::Vanilla) {
            return Err(PricingError::UnsupportedStyle(format!(
                "LSMC does not price {} options",
                contract.kind()
            )));
        }
        Ok(())
    }

    fn simulate(&self, params: &GbmParams) -> PathMatrix {
        let steps = self.config.n_steps();
        let n_paths = self.config.effective_paths();
        let width = steps + 1;
        let mut data = Vec::with_capacity(n_paths * width);
        let mut rng = PricerRng::from_seed(self.config.seed());
        let mut path = Vec::with_capacity(width);

        if self.config.antithetic() {
            // Mirror of path i is stored at i + n_paths / 2.
            let half = n_paths / 2;
            let mut mirrors = Vec::with_capacity(half * width);
            let mut mirror = Vec::with_capacity(width);
            for _ in 0..half {
                simulate_antithetic_pair(&mut rng, params, steps, &mut path, &mut mirror);
                data.extend_from_slice(&path);
                mirrors.extend_from_slice(&mirror);
            }
            data.extend_from_slice(&mirrors);
        } else {
            for _ in 0..n_paths {
                simulate_path(&mut rng, params, steps, &mut path);
                data.extend_from_slice(&path);
            }
        }
        PathMatrix { data, width }
    }

    /// Fitted continuation coefficients, or `None` when the step is skipped.
    fn regress(
        &self,
        x: &[f64],
        y: &[f64],
        step: usize,
        basis: &mut Vec<f64>,
    ) -> Option<Vec<f64>> {
        let degree = self.config.degree();
        let k = degree + 1;
        if x.len() < k {
            tracing::debug!(step, itm = x.len(), "too few in-the-money paths; regression skipped");
            return None;
        }

        let mut design = Matrix::zeros(x.len(), k);
        for (row, &xi) in x.iter().enumerate() {
            laguerre_basis(xi, degree, basis);
            for (col, &b) in basis.iter().enumerate() {
                design[(row, col)] = b;
            }
        }
        match least_squares(&design, y) {
            Ok(beta) => {
                tracing::trace!(step, itm = x.len(), ?beta, "continuation regression");
                Some(beta)
            }
            Err(err @ LinalgError::Singular { .. }) => {
                tracing::warn!(step, itm = x.len(), %err, "singular regression; step skipped");
                None
            }
            Err(err) => {
                tracing::warn!(step, %err, "regression failed; step skipped");
                None
            }
        }
    }

    /// Price, standard error and path count.
    ///
    /// # Errors
    ///
    /// `UnsupportedStyle` for European exercise or a non-vanilla product.
    pub fn price_detailed(
        &self,
        contract: &OptionContract,
        market: &MarketData,
    ) -> Result<PricingResult, PricingError> {
        Self::check_contract(contract)?;

        let steps = self.config.n_steps();
        let n_paths = self.config.effective_paths();
        let strike = contract.strike();
        let params = GbmParams::from_market(market, contract.expiry());
        let dt = contract.expiry() / steps as f64;
        let step_discount = (-market.rate() * dt).exp();
        tracing::debug!(
            n_paths,
            n_steps = steps,
            degree = self.config.degree(),
            seed = self.config.seed(),
            "lsmc pricing"
        );

        let paths = self.simulate(&params);

        // One cash flow per path and the step it is paid at.
        let mut cash: Vec<f64> = (0..n_paths)
            .map(|p| contract.intrinsic(paths.at(p, steps)))
            .collect();
        let mut paid_at = vec![steps; n_paths];

        let mut itm = Vec::with_capacity(n_paths);
        let mut x = Vec::with_capacity(n_paths);
        let mut y = Vec::with_capacity(n_paths);
        let mut basis = Vec::with_capacity(self.config.degree() + 1);

        for t in (1..steps).rev() {
            itm.clear();
            x.clear();
            y.clear();
            for p in 0..n_paths {
                let spot = paths.at(p, t);
                if contract.intrinsic(spot) > 0.0 {
                    itm.push(p);
                    x.push(spot / strike);
                    y.push(cash[p] * step_discount.powi((paid_at[p] - t) as i32));
                }
            }

            let Some(beta) = self.regress(&x, &y, t, &mut basis) else {
                continue;
            };

            for (&p, &xi) in itm.iter().zip(x.iter()) {
                laguerre_basis(xi, self.config.degree(), &mut basis);
                let continuation: f64 = basis.iter().zip(&beta).map(|(b, c)| b * c).sum();
                let exercise = contract.intrinsic(paths.at(p, t));
                if exercise > continuation {
                    cash[p] = exercise;
                    paid_at[p] = t;
                }
            }
        }

        let discounted: Vec<f64> = cash
            .iter()
            .zip(&paid_at)
            .map(|(c, &t)| c * step_discount.powi(t as i32))
            .collect();
        let stats: RunningStats = if self.config.antithetic() {
            let half = n_paths / 2;
            (0..half)
                .map(|i| 0.5 * (discounted[i] + discounted[i + half]))
                .collect()
        } else {
            discounted.iter().copied().collect()
        };

        let mut result = PricingResult::from_stats(&stats, 1.0, n_paths);
        let immediate = contract.intrinsic(market.spot());
        if immediate > result.price {
            result.price = immediate;
            result.std_error = 0.0;
        }
        Ok(result)
    }

    /// Price of an American vanilla option.
    ///
    /// # Errors
    ///
    /// `UnsupportedStyle` for European exercise or a non-vanilla product.
    pub fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        Ok(self.price_detailed(contract, market)?.price)
    }
}

impl PricingModel for LsmcEngine {
    fn name(&self) -> &'static str {
        "lsmc"
    }

    fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        LsmcEngine::price(self, contract, market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::BinomialTree;
    use pricer_models::analytical::BlackScholes;
    use pricer_models::instruments::{AveragingType, OptionType};

    fn market() -> MarketData {
        MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap()
    }

    fn engine(n_paths: usize, n_steps: usize) -> LsmcEngine {
        LsmcEngine::new(
            LsmcConfig::builder()
                .n_paths(n_paths)
                .n_steps(n_steps)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_american_put_close_to_binomial() {
        let put = OptionContract::american(OptionType::Put, 100.0, 1.0).unwrap();
        let lsmc = engine(20_000, 50).price_detailed(&put, &market()).unwrap();
        let tree = BinomialTree::with_steps(500).unwrap().price(&put, &market()).unwrap();
        assert!(
            (lsmc.price - tree).abs() < (4.0 * lsmc.std_error).max(0.15),
            "LSMC {} vs tree {}",
            lsmc.price,
            tree
        );
    }

    #[test]
    fn test_american_put_above_european() {
        let put = OptionContract::american(OptionType::Put, 100.0, 1.0).unwrap();
        let lsmc = engine(20_000, 50).price(&put, &market()).unwrap();
        let european = BlackScholes::from_market(&market()).price_put(100.0, 1.0);
        assert!(lsmc >= european, "LSMC {} < European {}", lsmc, european);
    }

    #[test]
    fn test_deep_itm_never_below_intrinsic() {
        let put = OptionContract::american(OptionType::Put, 100.0, 1.0).unwrap();
        let m = MarketData::new(40.0, 0.05, 0.2, 0.0).unwrap();
        let price = engine(2_000, 20).price(&put, &m).unwrap();
        assert!(price >= 60.0);
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let put = OptionContract::american(OptionType::Put, 110.0, 0.5).unwrap();
        let lsmc = engine(3_000, 25);
        assert_eq!(
            lsmc.price(&put, &market()).unwrap().to_bits(),
            lsmc.price(&put, &market()).unwrap().to_bits()
        );
    }

    #[test]
    fn test_antithetic_runs_on_mirrored_pairs() {
        let put = OptionContract::american(OptionType::Put, 100.0, 1.0).unwrap();
        let config = LsmcConfig::builder()
            .n_paths(9_999)
            .n_steps(25)
            .antithetic(true)
            .build()
            .unwrap();
        let result = LsmcEngine::new(config).price_detailed(&put, &market()).unwrap();
        assert_eq!(result.n_paths, 10_000);
        assert!(result.price > 5.5 && result.price < 6.5, "price = {}", result.price);
    }

    #[test]
    fn test_default_sampling_is_antithetic() {
        let put = OptionContract::american(OptionType::Put, 100.0, 0.5).unwrap();
        let result = engine(1_001, 10).price_detailed(&put, &market()).unwrap();
        assert_eq!(result.n_paths, 1_002);
    }

    #[test]
    fn test_thin_regressions_are_skipped_not_errors() {
        // Far out of the money: almost no path is ever in the money.
        let put = OptionContract::american(OptionType::Put, 20.0, 0.25).unwrap();
        let price = engine(500, 10).price(&put, &market()).unwrap();
        assert!(price >= 0.0);
        assert!(price < 1e-3);
    }

    #[test]
    fn test_unsupported_contracts() {
        let european = OptionContract::european(OptionType::Put, 100.0, 1.0).unwrap();
        assert!(engine(100, 5).price(&european, &market()).unwrap_err().is_unsupported());

        let asian = OptionContract::american(OptionType::Put, 100.0, 1.0)
            .unwrap()
            .with_kind(ProductKind::asian(AveragingType::Arithmetic, 4).unwrap());
        assert!(engine(100, 5).price(&asian, &market()).unwrap_err().is_unsupported());
    }
}
