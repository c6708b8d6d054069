//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::market_data::MarketData;
use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use pricer_core::types::PricingError;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::{ExerciseStyle, OptionContract, OptionType, ProductKind};
use crate::pricing::{numerical_greeks, BumpSizes, Greeks, PricingModel};

/// Below this expiry the closed form collapses to intrinsic value.
const EXPIRY_EPSILON: f64 = 1e-10;

/// Initial guess for the implied volatility search.
const IMPLIED_VOL_GUESS: f64 = 0.3;
/// Price tolerance for the implied volatility search.
const IMPLIED_VOL_TOLERANCE: f64 = 1e-6;
/// Iteration budget for the implied volatility search.
const IMPLIED_VOL_MAX_ITERATIONS: usize = 100;
/// Vega floor below which the Newton step is abandoned.
const MIN_VEGA: f64 = 1e-10;

/// Black-Scholes closed form for a fixed market state.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2, 0.0).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// assert!((call_price - 10.4506).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
    dividend: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: f64, rate: f64, volatility: f64, dividend: f64) -> Result<Self, AnalyticalError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
            dividend,
        })
    }

    /// Closed form for a validated market snapshot.
    pub fn from_market(market: &MarketData) -> Self {
        Self {
            spot: market.spot(),
            rate: market.rate(),
            volatility: market.volatility(),
            dividend: market.dividend(),
        }
    }

    /// Same market at a different volatility; callers keep `volatility > 0`.
    fn at_volatility(&self, volatility: f64) -> Self {
        Self { volatility, ..*self }
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// At expiry this saturates to ±100, or 0 at the money.
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return if self.spot > strike {
                100.0
            } else if self.spot < strike {
                -100.0
            } else {
                0.0
            };
        }
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift = (self.rate - self.dividend + 0.5 * self.volatility * self.volatility) * expiry;
        ((self.spot / strike).ln() + drift) / vol_sqrt_t
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes European call option price.
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return (self.spot - strike).max(0.0);
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        self.spot * (-self.dividend * expiry).exp() * norm_cdf(d1)
            - strike * (-self.rate * expiry).exp() * norm_cdf(d2)
    }

    /// Computes European put option price.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return (strike - self.spot).max(0.0);
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        strike * (-self.rate * expiry).exp() * norm_cdf(-d2)
            - self.spot * (-self.dividend * expiry).exp() * norm_cdf(-d1)
    }

    /// European price for the given direction.
    #[inline]
    pub fn price(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Cash-or-nothing digital: payout·e^(-rT)·N(±d₂).
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2, 0.0).unwrap();
    /// let call = bs.price_digital(OptionType::Call, 100.0, 1.0, 1.0);
    /// let put = bs.price_digital(OptionType::Put, 100.0, 1.0, 1.0);
    /// // A digital call plus a digital put is a zero-coupon bond
    /// assert!((call + put - (-0.05_f64).exp()).abs() < 1e-6);
    /// ```
    pub fn price_digital(&self, option_type: OptionType, strike: f64, expiry: f64, payout: f64) -> f64 {
        let d2 = self.d2(strike, expiry);
        let probability = match option_type {
            OptionType::Call => norm_cdf(d2),
            OptionType::Put => norm_cdf(-d2),
        };
        payout * (-self.rate * expiry).exp() * probability
    }

    /// Analytic Greeks in per-unit terms.
    ///
    /// - Delta = e^(-qT)·N(d₁), or e^(-qT)·(N(d₁) - 1) for puts
    /// - Gamma = e^(-qT)·φ(d₁) / (S·σ·√T)
    /// - Vega = S·e^(-qT)·√T·φ(d₁)
    /// - Theta = -S·e^(-qT)·φ(d₁)·σ/(2√T) ∓ r·K·e^(-rT)·N(±d₂) ± q·S·e^(-qT)·N(±d₁)
    /// - Rho = ±K·T·e^(-rT)·N(±d₂)
    pub fn greeks(&self, option_type: OptionType, strike: f64, expiry: f64) -> Greeks {
        if expiry <= EXPIRY_EPSILON {
            let itm = option_type.is_in_the_money(self.spot, strike);
            return Greeks {
                delta: if itm { option_type.sign() } else { 0.0 },
                ..Greeks::default()
            };
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let sqrt_t = expiry.sqrt();
        let div_discount = (-self.dividend * expiry).exp();
        let discount = (-self.rate * expiry).exp();
        let pdf_d1 = norm_pdf(d1);

        let gamma = div_discount * pdf_d1 / (self.spot * self.volatility * sqrt_t);
        let vega = self.spot * div_discount * sqrt_t * pdf_d1;
        let decay = -self.spot * div_discount * pdf_d1 * self.volatility / (2.0 * sqrt_t);

        match option_type {
            OptionType::Call => Greeks {
                delta: div_discount * norm_cdf(d1),
                gamma,
                vega,
                theta: decay - self.rate * strike * discount * norm_cdf(d2)
                    + self.dividend * self.spot * div_discount * norm_cdf(d1),
                rho: strike * expiry * discount * norm_cdf(d2),
            },
            OptionType::Put => Greeks {
                delta: div_discount * (norm_cdf(d1) - 1.0),
                gamma,
                vega,
                theta: decay + self.rate * strike * discount * norm_cdf(-d2)
                    - self.dividend * self.spot * div_discount * norm_cdf(-d1),
                rho: -strike * expiry * discount * norm_cdf(-d2),
            },
        }
    }
}

/// Black-Scholes as a [`PricingModel`].
///
/// Prices European vanilla and digital contracts. Vanilla Greeks are
/// analytic; digital Greeks fall back to bump and reprice.
///
/// # Examples
/// ```
/// use pricer_core::market_data::MarketData;
/// use pricer_models::analytical::BlackScholesModel;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_models::pricing::PricingModel;
///
/// let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
/// let call = OptionContract::european(OptionType::Call, 100.0, 1.0).unwrap();
/// let price = BlackScholesModel.price(&call, &market).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
///
/// let american = OptionContract::american(OptionType::Put, 100.0, 1.0).unwrap();
/// assert!(BlackScholesModel.price(&american, &market).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholesModel;

impl BlackScholesModel {
    fn check_european(contract: &OptionContract) -> Result<(), AnalyticalError> {
        match contract.style() {
            ExerciseStyle::European => Ok(()),
            style => Err(AnalyticalError::UnsupportedExerciseStyle {
                style: style.to_string(),
            }),
        }
    }

    /// Volatility that reproduces `target_price` for a European vanilla.
    ///
    /// Newton-Raphson from σ = 0.3 with tolerance 1e-6 on price and at most
    /// 100 iterations. A step to σ <= 0 restarts from 0.15.
    ///
    /// # Errors
    /// - `InvalidInput` for a non-finite or non-positive target
    /// - `UnsupportedStyle` for American or non-vanilla contracts
    /// - `NumericalInfeasibility` when vega falls below 1e-10
    /// - `ConvergenceFailure` after 100 iterations
    ///
    /// # Examples
    /// ```
    /// use pricer_core::market_data::MarketData;
    /// use pricer_models::analytical::BlackScholesModel;
    /// use pricer_models::instruments::{OptionContract, OptionType};
    /// use pricer_models::pricing::PricingModel;
    ///
    /// let market = MarketData::new(100.0, 0.05, 0.25, 0.0).unwrap();
    /// let put = OptionContract::european(OptionType::Put, 95.0, 0.5).unwrap();
    /// let target = BlackScholesModel.price(&put, &market).unwrap();
    ///
    /// let iv = BlackScholesModel.implied_volatility(&put, &market, target).unwrap();
    /// assert!((iv - 0.25).abs() < 1e-4);
    /// ```
    pub fn implied_volatility(
        &self,
        contract: &OptionContract,
        market: &MarketData,
        target_price: f64,
    ) -> Result<f64, PricingError> {
        if !(target_price.is_finite() && target_price > 0.0) {
            return Err(AnalyticalError::InvalidTargetPrice {
                price: target_price,
            }
            .into());
        }
        Self::check_european(contract)?;
        if !matches!(contract.kind(), ProductKind::Vanilla) {
            return Err(AnalyticalError::UnsupportedProduct {
                product: contract.kind().name().to_string(),
            }
            .into());
        }

        let bs = BlackScholes::from_market(market);
        let (option_type, strike, expiry) = (contract.option_type(), contract.strike(), contract.expiry());

        let config = SolverConfig::new(IMPLIED_VOL_TOLERANCE, IMPLIED_VOL_MAX_ITERATIONS)
            .with_min_derivative(MIN_VEGA);
        let sigma = NewtonRaphsonSolver::new(config).find_root_in_domain(
            |sigma| bs.at_volatility(sigma).price(option_type, strike, expiry) - target_price,
            |sigma| bs.at_volatility(sigma).greeks(option_type, strike, expiry).vega,
            IMPLIED_VOL_GUESS,
            |sigma| sigma > 0.0,
            IMPLIED_VOL_GUESS * 0.5,
        )?;

        tracing::debug!(target_price, sigma, "implied volatility converged");
        Ok(sigma)
    }
}

impl PricingModel for BlackScholesModel {
    fn name(&self) -> &'static str {
        "black-scholes"
    }

    fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError> {
        Self::check_european(contract)?;
        let bs = BlackScholes::from_market(market);
        match *contract.kind() {
            ProductKind::Vanilla => Ok(bs.price(contract.option_type(), contract.strike(), contract.expiry())),
            ProductKind::Digital { payout } => Ok(bs.price_digital(
                contract.option_type(),
                contract.strike(),
                contract.expiry(),
                payout,
            )),
            ref other => Err(AnalyticalError::UnsupportedProduct {
                product: other.name().to_string(),
            }
            .into()),
        }
    }

    fn greeks(&self, contract: &OptionContract, market: &MarketData) -> Result<Greeks, PricingError> {
        Self::check_european(contract)?;
        match contract.kind() {
            ProductKind::Vanilla => Ok(BlackScholes::from_market(market).greeks(
                contract.option_type(),
                contract.strike(),
                contract.expiry(),
            )),
            _ => numerical_greeks(self, contract, market, &BumpSizes::default()),
        }
    }
}
