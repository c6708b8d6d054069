//! Fourier inversion pricing for European Heston options.

use std::f64::consts::PI;

use num_complex::Complex64;
use pricer_core::market_data::MarketData;
use pricer_core::types::PricingError;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{OptionContract, OptionType};
use pricer_models::models::HestonParams;

use super::char_fn::log_spot_cf;
use super::FourierConfig;

/// Vol-of-vol below which variance is treated as deterministic.
pub const DETERMINISTIC_SIGMA: f64 = 1e-8;

/// Offset replacing φ = 0, where the integrand has a removable singularity.
const ORIGIN_OFFSET: f64 = 1e-9;

/// Trapezoid rule for ∫₀^upper f(φ) dφ with `n_points` equal panels.
fn trapezoid<F: Fn(f64) -> f64>(f: F, config: &FourierConfig) -> f64 {
    let n = config.n_points();
    let h = config.upper_limit() / n as f64;
    let interior: f64 = (1..n).map(|k| f(k as f64 * h)).sum();
    h * (interior + 0.5 * (f(ORIGIN_OFFSET) + f(config.upper_limit())))
}

/// In-the-money probabilities (P1, P2).
///
/// P1 uses the share measure, whose characteristic function is
/// φ(u − i)/φ(−i) with φ(−i) the forward; P2 uses φ itself.
fn probabilities(
    params: &HestonParams,
    config: &FourierConfig,
    spot: f64,
    strike: f64,
    carry: f64,
    expiry: f64,
) -> (f64, f64) {
    let i = Complex64::i();
    let ln_k = strike.ln();
    let forward = spot * (carry * expiry).exp();

    let integrand = |phi: f64, shift: Complex64, norm: f64| {
        let cf = log_spot_cf(params, Complex64::new(phi, 0.0) - shift, spot, carry, expiry);
        ((-i * phi * ln_k).exp() * cf / (i * phi * norm)).re
    };

    let p1 = 0.5 + trapezoid(|phi| integrand(phi, i, forward), config) / PI;
    let p2 = 0.5 + trapezoid(|phi| integrand(phi, Complex64::new(0.0, 0.0), 1.0), config) / PI;
    (p1, p2)
}

/// Black-Scholes at the time-averaged variance, the σ → 0 limit.
fn deterministic_variance_price(
    params: &HestonParams,
    contract: &OptionContract,
    market: &MarketData,
) -> Result<f64, PricingError> {
    let expiry = contract.expiry();
    let variance = params.average_variance(expiry);
    if variance <= 0.0 {
        // No diffusion left: discounted intrinsic on the forward.
        let forward = market.spot() * (market.carry() * expiry).exp();
        return Ok(market.discount_factor(expiry) * contract.intrinsic(forward));
    }
    let bs = BlackScholes::from_market(&market.with_volatility(variance.sqrt())?);
    Ok(bs.price(contract.option_type(), contract.strike(), expiry))
}

/// Semi-analytical European call or put.
///
/// Call = S e^{−qT} P1 − K e^{−rT} P2, put by parity. Results are returned
/// as integrated, without clamping to no-arbitrage bounds; far out of the
/// money at short expiry that leaves values of order ±1e-4.
pub(crate) fn price(
    params: &HestonParams,
    config: &FourierConfig,
    contract: &OptionContract,
    market: &MarketData,
) -> Result<f64, PricingError> {
    if params.sigma < DETERMINISTIC_SIGMA {
        tracing::debug!(sigma = params.sigma, "deterministic variance; Black-Scholes limit");
        return deterministic_variance_price(params, contract, market);
    }

    let spot = market.spot();
    let strike = contract.strike();
    let expiry = contract.expiry();
    let (p1, p2) = probabilities(params, config, spot, strike, market.carry(), expiry);

    let spot_leg = spot * (-market.dividend() * expiry).exp();
    let strike_leg = strike * market.discount_factor(expiry);
    let value = match contract.option_type() {
        OptionType::Call => spot_leg * p1 - strike_leg * p2,
        OptionType::Put => strike_leg * (1.0 - p2) - spot_leg * (1.0 - p1),
    };

    if !value.is_finite() {
        return Err(PricingError::NumericalInfeasibility(format!(
            "Heston Fourier integral is not finite (P1 = {}, P2 = {})",
            p1, p2
        )));
    }
    tracing::trace!(p1, p2, value, "heston fourier inversion");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn market() -> MarketData {
        MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap()
    }

    #[test]
    fn test_trapezoid_integrates_smooth_function() {
        let config = FourierConfig::default();
        let value = trapezoid(|x| (-x).exp(), &config);
        assert_abs_diff_eq!(value, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let (p1, p2) = probabilities(
            &HestonParams::default(),
            &FourierConfig::default(),
            100.0,
            100.0,
            0.05,
            1.0,
        );
        assert!(p1 > 0.0 && p1 < 1.0);
        assert!(p2 > 0.0 && p2 < 1.0);
        assert!(p1 > p2, "share measure favours high terminal prices");
    }

    #[test]
    fn test_small_vol_of_vol_approaches_black_scholes() {
        let params = HestonParams::new(1.5, 0.04, 0.01, 0.0, 0.04).unwrap();
        let call = OptionContract::european(OptionType::Call, 100.0, 1.0).unwrap();
        let heston = price(&params, &FourierConfig::default(), &call, &market()).unwrap();
        let bs = BlackScholes::from_market(&market()).price_call(100.0, 1.0);
        assert_abs_diff_eq!(heston, bs, epsilon = 5e-3);
    }

    #[test]
    fn test_deterministic_limit_uses_average_variance() {
        let params = HestonParams::new(2.0, 0.09, 0.0, -0.5, 0.01).unwrap();
        let put = OptionContract::european(OptionType::Put, 105.0, 0.5).unwrap();
        let heston = price(&params, &FourierConfig::default(), &put, &market()).unwrap();
        let vol = params.average_variance(0.5).sqrt();
        let bs = BlackScholes::from_market(&market().with_volatility(vol).unwrap())
            .price(OptionType::Put, 105.0, 0.5);
        assert_abs_diff_eq!(heston, bs, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_variance_is_discounted_forward_intrinsic() {
        let params = HestonParams::new(2.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let call = OptionContract::european(OptionType::Call, 90.0, 1.0).unwrap();
        let value = price(&params, &FourierConfig::default(), &call, &market()).unwrap();
        let expected = (-0.05_f64).exp() * (100.0 * 0.05_f64.exp() - 90.0);
        assert_abs_diff_eq!(value, expected, epsilon = 1e-10);
    }
}
