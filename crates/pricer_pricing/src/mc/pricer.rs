//! Monte Carlo pricing engine for European-exercise products.

use pricer_core::market_data::MarketData;
use pricer_core::math::statistics::RunningStats;
use pricer_core::types::PricingError;
use pricer_models::instruments::{OptionContract, ProductKind};
use pricer_models::pricing::PricingModel;

use super::paths::{simulate_antithetic_pair, simulate_path, GbmParams};
use super::MonteCarloConfig;
use crate::path_dependent::{path_payoff, PathObserver};
use crate::rng::PricerRng;

/// Result of a Monte Carlo pricing run.
///
/// `std_error` is the standard error of the discounted estimator. With
/// antithetic sampling it is computed from the pair averages, and
/// `n_paths` still counts every payoff that entered the mean.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult { price: 10.45, std_error: 0.05, n_paths: 100_000 };
/// assert!((result.confidence_95() - 0.098).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Present value of the instrument.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Number of simulated payoffs averaged.
    pub n_paths: usize,
}

impl PricingResult {
    /// Discounted result from undiscounted payoff statistics.
    pub(crate) fn from_stats(stats: &RunningStats, discount: f64, n_paths: usize) -> Self {
        Self {
            price: discount * stats.mean(),
            std_error: discount * stats.std_error(),
            n_paths,
        }
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Simulates `n_paths` payoffs of `contract` and accumulates them.
///
/// With `antithetic` the paths come in (Z, −Z) pairs and each pair
/// contributes its average as one sample, so `n_paths` must be even.
pub(crate) fn accumulate_payoffs(
    rng: &mut PricerRng,
    params: &GbmParams,
    steps: usize,
    n_paths: usize,
    antithetic: bool,
    contract: &OptionContract,
) -> RunningStats {
    let mut stats = RunningStats::new();
    let mut observer = PathObserver::new();
    let mut path = Vec::with_capacity(steps + 1);

    let settle = |observer: &mut PathObserver, path: &[f64]| {
        observer.reset();
        observer.observe_path(path);
        path_payoff(contract, observer)
    };

    if antithetic {
        let mut mirror = Vec::with_capacity(steps + 1);
        for _ in 0..n_paths / 2 {
            simulate_antithetic_pair(rng, params, steps, &mut path, &mut mirror);
            let a = settle(&mut observer, &path);
            let b = settle(&mut observer, &mirror);
            stats.push(0.5 * (a + b));
        }
    } else {
        for _ in 0..n_paths {
            simulate_path(rng, params, steps, &mut path);
            stats.push(settle(&mut observer, &path));
        }
    }
    stats
}

/// Monte Carlo engine for GBM dynamics.
///
/// Every call reseeds a fresh stream from the configured seed, so repeated
/// calls return bit-identical prices and bumped revaluations share random
/// numbers. The engine holds no mutable state and is `Send + Sync`.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketData;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .n_steps(10)
///     .build()
///     .unwrap();
/// let engine = MonteCarloEngine::new(config);
///
/// let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
/// let call = OptionContract::european(OptionType::Call, 100.0, 1.0).unwrap();
/// let result = engine.price_detailed(&call, &market).unwrap();
/// assert!((result.price - 10.4506).abs() < 4.0 * result.std_error + 0.05);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MonteCarloEngine {
    config: MonteCarloConfig,
}

impl MonteCarloEngine {
    /// Creates an engine with the given configuration.
    #[inline]
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// The simulation configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    pub(crate) fn check_european(contract: &OptionContract) -> Result<(), PricingError> {
        if contract.style().allows_early_exercise() {
            return Err(PricingError::UnsupportedStyle(format!(
                "Monte Carlo engine prices European exercise only, got {}",
                contract.style()
            )));
        }
        Ok(())
    }

    /// Steps simulated for `contract`: the Asian observation count, else the configured grid.
    pub(crate) fn steps_for(&self, contract: &OptionContract) -> usize {
        match contract.kind() {
            ProductKind::Asian { observations, .. } => *observations,
            _ => self.config.n_steps(),
        }
    }

    fn run(&self, contract: &OptionContract, market: &MarketData) -> Result<PricingResult, PricingError> {
        Self::check_european(contract)?;

        let params = GbmParams::from_market(market, contract.expiry());
        let steps = self.steps_for(contract);
        let n_paths = self.config.effective_paths();
        tracing::debug!(
            product = contract.kind().name(),
            n_paths,
            n_steps = steps,
            antithetic = self.config.antithetic(),
            seed = self.config.seed(),
            "monte carlo pricing"
        );

        let mut rng = PricerRng::from_seed(self.config.seed());
        let stats = accumulate_payoffs(
            &mut rng,
            &params,
            steps,
            n_paths,
            self.config.antithetic(),
            contract,
        );
        Ok(PricingResult::from_stats(&stats, params.discount_factor(), n_paths))
    }

    /// Price of a European contract of any product kind.
    ///
    /// # Errors
    ///
    /// `UnsupportedStyle` for American exercise.
    pub fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        Ok(self.price_detailed(contract, market)?.price)
    }

    /// Price, standard error and path count, dispatching on the product kind.
    ///
    /// # Errors
    ///
    /// `UnsupportedStyle` for American exercise.
    pub fn price_detailed(
        &self,
        contract: &OptionContract,
        market: &MarketData,
    ) -> Result<PricingResult, PricingError> {
        self.run(contract, market)
    }

    /// Price of an Asian contract.
    ///
    /// Simulates `observations` steps and averages all `observations + 1`
    /// points, spot included.
    ///
    /// # Errors
    ///
    /// `UnsupportedStyle` unless the contract is a European Asian.
    pub fn price_asian(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        Ok(self.price_asian_detailed(contract, market)?.price)
    }

    /// Detailed variant of [`MonteCarloEngine::price_asian`].
    ///
    /// # Errors
    ///
    /// `UnsupportedStyle` unless the contract is a European Asian.
    pub fn price_asian_detailed(
        &self,
        contract: &OptionContract,
        market: &MarketData,
    ) -> Result<PricingResult, PricingError> {
        match contract.kind() {
            ProductKind::Asian { .. } => self.run(contract, market),
            other => Err(wrong_kind("price_asian", other)),
        }
    }

    /// Price of a barrier contract, monitored at every simulated point.
    ///
    /// # Errors
    ///
    /// `UnsupportedStyle` unless the contract is a European barrier.
    pub fn price_barrier(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        Ok(self.price_barrier_detailed(contract, market)?.price)
    }

    /// Detailed variant of [`MonteCarloEngine::price_barrier`].
    ///
    /// # Errors
    ///
    /// `UnsupportedStyle` unless the contract is a European barrier.
    pub fn price_barrier_detailed(
        &self,
        contract: &OptionContract,
        market: &MarketData,
    ) -> Result<PricingResult, PricingError> {
        match contract.kind() {
            ProductKind::Barrier { .. } => self.run(contract, market),
            other => Err(wrong_kind("price_barrier", other)),
        }
    }
}

fn wrong_kind(entry: &str, kind: &ProductKind) -> PricingError {
    PricingError::UnsupportedStyle(format!("{} cannot price {} options", entry, kind))
}

impl PricingModel for MonteCarloEngine {
    fn name(&self) -> &'static str {
        "monte-carlo"
    }

    fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        MonteCarloEngine::price(self, contract, market)
    }
}
