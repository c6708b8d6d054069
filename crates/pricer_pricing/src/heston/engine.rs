//! Heston pricing engine.

use pricer_core::market_data::MarketData;
use pricer_core::types::PricingError;
use pricer_models::instruments::{OptionContract, ProductKind};
use pricer_models::models::{HestonError, HestonParams};
use pricer_models::pricing::PricingModel;

use super::config::{FourierConfig, HestonMcConfig};
use super::semi_analytical;
use super::simulation::{accumulate_terminal_payoffs, simulate_into, HestonPathSpec};
use crate::mc::{validate_counts, PricingResult};
use crate::rng::PricerRng;

/// Heston stochastic volatility engine.
///
/// Prices European vanillas semi-analytically by Fourier inversion and
/// European vanillas or digitals by full-truncation Euler simulation.
/// Market spot, rate and dividend come from the [`MarketData`] snapshot;
/// its Black volatility is ignored.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketData;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_models::models::HestonParams;
/// use pricer_pricing::heston::HestonEngine;
///
/// // No vol-of-vol and v0 = theta reduces to Black-Scholes at 20%.
/// let params = HestonParams::new(2.0, 0.04, 0.0, -0.7, 0.04).unwrap();
/// let engine = HestonEngine::new(params).unwrap();
///
/// let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
/// let call = OptionContract::european(OptionType::Call, 100.0, 1.0).unwrap();
/// let price = engine.price_semi_analytical(&call, &market).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HestonEngine {
    params: HestonParams,
    integration: FourierConfig,
    simulation: HestonMcConfig,
}

fn warn_if_feller_violated(params: &HestonParams) {
    if !params.satisfies_feller() {
        tracing::warn!(
            feller_ratio = params.feller_ratio(),
            "Feller condition violated; variance can reach zero"
        );
    }
}

impl HestonEngine {
    /// Engine with default quadrature and simulation settings.
    ///
    /// # Errors
    ///
    /// `HestonError` if the parameters fail validation.
    pub fn new(params: HestonParams) -> Result<Self, HestonError> {
        params.validate()?;
        warn_if_feller_violated(&params);
        Ok(Self {
            params,
            integration: FourierConfig::default(),
            simulation: HestonMcConfig::default(),
        })
    }

    /// Replaces the Fourier quadrature settings.
    pub fn with_integration(mut self, integration: FourierConfig) -> Self {
        self.integration = integration;
        self
    }

    /// Replaces the simulation settings.
    pub fn with_simulation(mut self, simulation: HestonMcConfig) -> Self {
        self.simulation = simulation;
        self
    }

    /// Current model parameters.
    #[inline]
    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// Fourier quadrature settings.
    #[inline]
    pub fn integration(&self) -> &FourierConfig {
        &self.integration
    }

    /// Simulation settings.
    #[inline]
    pub fn simulation(&self) -> &HestonMcConfig {
        &self.simulation
    }

    /// Replaces the parameter set as a whole.
    ///
    /// # Errors
    ///
    /// `HestonError` if `params` fail validation; the engine is unchanged.
    pub fn set_params(&mut self, params: HestonParams) -> Result<(), HestonError> {
        params.validate()?;
        warn_if_feller_violated(&params);
        self.params = params;
        Ok(())
    }

    /// Semi-analytical price of a European vanilla.
    ///
    /// # Errors
    ///
    /// - `UnsupportedStyle` for American exercise or a non-vanilla product
    /// - `NumericalInfeasibility` if the Fourier integral is not finite
    pub fn price_semi_analytical(
        &self,
        contract: &OptionContract,
        market: &MarketData,
    ) -> Result<f64, PricingError> {
        check_european(contract)?;
        if !matches!(contract.kind(), ProductKind::Vanilla) {
            return Err(PricingError::UnsupportedStyle(format!(
                "Heston Fourier pricer handles vanilla payoffs only, got {}",
                contract.kind()
            )));
        }
        tracing::debug!(
            strike = contract.strike(),
            expiry = contract.expiry(),
            n_points = self.integration.n_points(),
            "heston semi-analytical pricing"
        );
        semi_analytical::price(&self.params, &self.integration, contract, market)
    }

    /// Monte Carlo price with an explicit grid, seeded from the simulation config.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for path or step counts outside their ranges
    /// - `UnsupportedStyle` for American exercise or a path-dependent product
    pub fn price_monte_carlo(
        &self,
        contract: &OptionContract,
        market: &MarketData,
        n_paths: usize,
        n_steps: usize,
    ) -> Result<f64, PricingError> {
        Ok(self
            .price_monte_carlo_detailed(contract, market, n_paths, n_steps)?
            .price)
    }

    /// Monte Carlo price, standard error and path count.
    ///
    /// # Errors
    ///
    /// See [`HestonEngine::price_monte_carlo`].
    pub fn price_monte_carlo_detailed(
        &self,
        contract: &OptionContract,
        market: &MarketData,
        n_paths: usize,
        n_steps: usize,
    ) -> Result<PricingResult, PricingError> {
        validate_counts(n_paths, n_steps)?;
        check_european(contract)?;
        if !contract.kind().is_terminal() {
            return Err(PricingError::UnsupportedStyle(format!(
                "Heston Monte Carlo prices terminal payoffs only, got {}",
                contract.kind()
            )));
        }

        tracing::debug!(
            product = contract.kind().name(),
            n_paths,
            n_steps,
            seed = self.simulation.seed(),
            "heston monte carlo pricing"
        );
        let spec = HestonPathSpec {
            spot: market.spot(),
            carry: market.carry(),
            expiry: contract.expiry(),
            steps: n_steps,
        };
        let mut rng = PricerRng::from_seed(self.simulation.seed());
        let stats = accumulate_terminal_payoffs(&mut rng, &self.params, &spec, n_paths, contract);
        Ok(PricingResult::from_stats(
            &stats,
            market.discount_factor(contract.expiry()),
            n_paths,
        ))
    }

    /// Monte Carlo price on the configured grid.
    ///
    /// # Errors
    ///
    /// See [`HestonEngine::price_monte_carlo`].
    pub fn price_monte_carlo_configured(
        &self,
        contract: &OptionContract,
        market: &MarketData,
    ) -> Result<PricingResult, PricingError> {
        self.price_monte_carlo_detailed(
            contract,
            market,
            self.simulation.n_paths(),
            self.simulation.n_steps(),
        )
    }

    /// One asset and variance path pair of `steps + 1` points each.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a step count outside [1, 10,000] or a
    /// non-positive or non-finite horizon.
    pub fn simulate_path(
        &self,
        rng: &mut PricerRng,
        market: &MarketData,
        expiry: f64,
        steps: usize,
    ) -> Result<(Vec<f64>, Vec<f64>), PricingError> {
        validate_counts(1, steps)?;
        if !(expiry.is_finite() && expiry > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "simulation horizon must be positive, got {}",
                expiry
            )));
        }
        let spec = HestonPathSpec {
            spot: market.spot(),
            carry: market.carry(),
            expiry,
            steps,
        };
        let mut spots = Vec::with_capacity(steps + 1);
        let mut variances = Vec::with_capacity(steps + 1);
        simulate_into(rng, &self.params, &spec, &mut spots, &mut variances);
        Ok((spots, variances))
    }
}

fn check_european(contract: &OptionContract) -> Result<(), PricingError> {
    if contract.style().allows_early_exercise() {
        return Err(PricingError::UnsupportedStyle(format!(
            "Heston engine prices European exercise only, got {}",
            contract.style()
        )));
    }
    Ok(())
}

impl PricingModel for HestonEngine {
    fn name(&self) -> &'static str {
        "heston"
    }

    fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        self.price_semi_analytical(contract, market)
    }
}
