//! Pricing model facade.
//!
//! Every engine implements [`PricingModel`]. Sensitivities default to bump
//! and reprice through [`numerical_greeks`]; a model with closed-form Greeks
//! overrides [`PricingModel::greeks`].

use pricer_core::market_data::MarketData;
use pricer_core::types::PricingError;

use crate::instruments::OptionContract;

/// First and second order sensitivities.
///
/// All values are per unit change: vega per 1.00 of volatility, rho per
/// 1.00 of rate, theta per year. [`Greeks::to_market_units`] converts to
/// desk conventions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// −∂V/∂T, decay per year of calendar time
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    /// Vega and rho per 1% move, theta per calendar day.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::pricing::Greeks;
    ///
    /// let g = Greeks { delta: 0.5, gamma: 0.02, vega: 40.0, theta: -36.5, rho: 50.0 };
    /// let quoted = g.to_market_units();
    /// assert_eq!(quoted.vega, 0.4);
    /// assert_eq!(quoted.theta, -0.1);
    /// assert_eq!(quoted.rho, 0.5);
    /// assert_eq!(quoted.delta, 0.5);
    /// ```
    pub fn to_market_units(&self) -> Self {
        Self {
            vega: self.vega / 100.0,
            theta: self.theta / 365.0,
            rho: self.rho / 100.0,
            ..*self
        }
    }
}

/// Bump sizes for finite-difference Greeks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumpSizes {
    /// Relative spot bump h/S for the central delta and gamma.
    pub spot_relative: f64,
    /// Absolute volatility bump.
    pub volatility: f64,
    /// Absolute rate bump.
    pub rate: f64,
    /// Calendar time step in years, capped at half the expiry.
    pub time: f64,
}

impl Default for BumpSizes {
    fn default() -> Self {
        Self {
            spot_relative: 0.01,
            volatility: 0.001,
            rate: 0.0001,
            time: 1.0 / 365.0,
        }
    }
}

/// Finite-difference Greeks by repricing bumped copies.
///
/// - delta, gamma: central differences with h = S · `spot_relative`
/// - vega, rho: forward differences
/// - theta: (P(T − dt) − P(T)) / dt with dt = min(`time`, T/2)
///
/// Inputs are never mutated; every bump builds a new snapshot or contract.
///
/// # Errors
/// Any error from the model's `price`, or `InvalidInput` if a bump produces
/// an invalid snapshot.
pub fn numerical_greeks<M>(
    model: &M,
    contract: &OptionContract,
    market: &MarketData,
    bumps: &BumpSizes,
) -> Result<Greeks, PricingError>
where
    M: PricingModel + ?Sized,
{
    let base = model.price(contract, market)?;

    let spot = market.spot();
    let h = spot * bumps.spot_relative;
    let up = model.price(contract, &market.with_spot(spot + h)?)?;
    let down = model.price(contract, &market.with_spot(spot - h)?)?;

    let vol_up = model.price(
        contract,
        &market.with_volatility(market.volatility() + bumps.volatility)?,
    )?;
    let rate_up = model.price(contract, &market.with_rate(market.rate() + bumps.rate)?)?;

    let dt = bumps.time.min(contract.expiry() / 2.0);
    let aged = model.price(&contract.with_expiry(contract.expiry() - dt)?, market)?;

    let greeks = Greeks {
        delta: (up - down) / (2.0 * h),
        gamma: (up - 2.0 * base + down) / (h * h),
        vega: (vol_up - base) / bumps.volatility,
        theta: (aged - base) / dt,
        rho: (rate_up - base) / bumps.rate,
    };
    tracing::trace!(model = model.name(), ?greeks, "numerical greeks");
    Ok(greeks)
}

/// Common interface of every pricing engine.
///
/// # Examples
/// ```
/// use pricer_core::market_data::MarketData;
/// use pricer_core::types::PricingError;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_models::pricing::PricingModel;
///
/// /// Discounted intrinsic value on the forward.
/// struct ForwardIntrinsic;
///
/// impl PricingModel for ForwardIntrinsic {
///     fn name(&self) -> &'static str {
///         "forward-intrinsic"
///     }
///
///     fn price(&self, c: &OptionContract, m: &MarketData) -> Result<f64, PricingError> {
///         let forward = m.spot() * (m.carry() * c.expiry()).exp();
///         Ok(m.discount_factor(c.expiry()) * c.intrinsic(forward))
///     }
/// }
///
/// let market = MarketData::new(120.0, 0.0, 0.2, 0.0).unwrap();
/// let call = OptionContract::european(OptionType::Call, 100.0, 1.0).unwrap();
/// let greeks = ForwardIntrinsic.greeks(&call, &market).unwrap();
/// assert!((greeks.delta - 1.0).abs() < 1e-9);
/// ```
pub trait PricingModel {
    /// Short model name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Fair value of `contract` under `market`.
    fn price(&self, contract: &OptionContract, market: &MarketData) -> Result<f64, PricingError>;

    /// Sensitivities, by default from [`numerical_greeks`] with default bumps.
    fn greeks(&self, contract: &OptionContract, market: &MarketData) -> Result<Greeks, PricingError> {
        numerical_greeks(self, contract, market, &BumpSizes::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::OptionType;
    use approx::assert_relative_eq;

    /// V = a·S² + b·σ + c·r + d·T, so every Greek is known exactly.
    struct Polynomial;

    impl PricingModel for Polynomial {
        fn name(&self) -> &'static str {
            "polynomial"
        }

        fn price(&self, c: &OptionContract, m: &MarketData) -> Result<f64, PricingError> {
            Ok(0.5 * m.spot() * m.spot() + 3.0 * m.volatility() + 7.0 * m.rate() + 2.0 * c.expiry())
        }
    }

    fn setup() -> (OptionContract, MarketData) {
        (
            OptionContract::european(OptionType::Call, 100.0, 1.0).unwrap(),
            MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap(),
        )
    }

    #[test]
    fn test_numerical_greeks_on_polynomial() {
        let (contract, market) = setup();
        let g = Polynomial.greeks(&contract, &market).unwrap();
        assert_relative_eq!(g.delta, 100.0, epsilon = 1e-8);
        assert_relative_eq!(g.gamma, 1.0, epsilon = 1e-6);
        assert_relative_eq!(g.vega, 3.0, epsilon = 1e-8);
        assert_relative_eq!(g.rho, 7.0, epsilon = 1e-6);
        // Shortening expiry lowers the value by 2 per year
        assert_relative_eq!(g.theta, -2.0, epsilon = 1e-8);
    }

    #[test]
    fn test_theta_step_capped_for_short_expiry() {
        let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
        let contract = OptionContract::european(OptionType::Call, 100.0, 0.001).unwrap();
        let g = Polynomial.greeks(&contract, &market).unwrap();
        assert_relative_eq!(g.theta, -2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_bump_surfaces_as_error() {
        let (contract, market) = setup();
        let bumps = BumpSizes {
            spot_relative: 1.5,
            ..BumpSizes::default()
        };
        let err = numerical_greeks(&Polynomial, &contract, &market, &bumps).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_to_market_units_roundtrip_scale() {
        let g = Greeks {
            delta: 0.6,
            gamma: 0.01,
            vega: 37.0,
            theta: -6.5,
            rho: 53.0,
        };
        let m = g.to_market_units();
        assert_relative_eq!(m.vega * 100.0, g.vega);
        assert_relative_eq!(m.theta * 365.0, g.theta);
        assert_relative_eq!(m.rho * 100.0, g.rho);
        assert_eq!(m.gamma, g.gamma);
    }
}
