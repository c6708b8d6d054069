//! Heston engine consistency: Black-Scholes limit, Fourier against
//! simulation, and reproducibility.

mod common;

use approx::assert_abs_diff_eq;
use common::{assert_within_se, black_scholes, european, init_tracing, standard_market};
use pricer_core::market_data::MarketData;
use pricer_models::instruments::{OptionType, ProductKind};
use pricer_models::models::HestonParams;
use pricer_pricing::heston::{FourierConfig, HestonEngine, HestonMcConfig};
use pricer_pricing::rng::PricerRng;

/// σ = 0 and v0 = θ = 0.04: constant 20% volatility.
fn flat_params() -> HestonParams {
    HestonParams::new(1.5, 0.04, 0.0, -0.6, 0.04).unwrap()
}

#[test]
fn test_zero_vol_of_vol_matches_black_scholes_semi_analytical() {
    init_tracing();
    let market = standard_market();
    let engine = HestonEngine::new(flat_params()).unwrap();
    for option_type in [OptionType::Call, OptionType::Put] {
        for strike in [80.0, 100.0, 120.0] {
            let contract = european(option_type, strike, 1.0);
            let heston = engine.price_semi_analytical(&contract, &market).unwrap();
            let bs = black_scholes(&market, option_type, strike, 1.0);
            assert_abs_diff_eq!(heston, bs, epsilon = 1e-10);
        }
    }
}

#[test]
fn test_zero_vol_of_vol_matches_black_scholes_monte_carlo() {
    let market = standard_market();
    let engine = HestonEngine::new(flat_params()).unwrap();
    let call = european(OptionType::Call, 100.0, 1.0);
    let result = engine
        .price_monte_carlo_detailed(&call, &market, 50_000, 100)
        .unwrap();
    assert_within_se("Heston MC σ=0", result.price, result.std_error, 10.4506, 4.0, 0.1);
}

#[test]
fn test_tiny_vol_of_vol_close_to_black_scholes() {
    // Exercises the Fourier path rather than the deterministic shortcut.
    let market = standard_market();
    let params = HestonParams::new(1.5, 0.04, 1e-4, 0.0, 0.04).unwrap();
    let engine = HestonEngine::new(params).unwrap();
    let call = european(OptionType::Call, 110.0, 1.0);
    let heston = engine.price_semi_analytical(&call, &market).unwrap();
    let bs = black_scholes(&market, OptionType::Call, 110.0, 1.0);
    assert_abs_diff_eq!(heston, bs, epsilon = 1e-3);
}

#[test]
fn test_monte_carlo_agrees_with_fourier() {
    let market = MarketData::new(100.0, 0.03, 0.2, 0.01).unwrap();
    let engine = HestonEngine::new(HestonParams::default()).unwrap();
    for option_type in [OptionType::Call, OptionType::Put] {
        let contract = european(option_type, 100.0, 1.0);
        let exact = engine.price_semi_analytical(&contract, &market).unwrap();
        let mc = engine
            .price_monte_carlo_detailed(&contract, &market, 40_000, 100)
            .unwrap();
        assert_within_se(
            &format!("Heston {:?}", option_type),
            mc.price,
            mc.std_error,
            exact,
            4.0,
            0.1,
        );
    }
}

#[test]
fn test_finer_quadrature_changes_little() {
    let market = standard_market();
    let coarse = HestonEngine::new(HestonParams::default()).unwrap();
    let fine = coarse
        .clone()
        .with_integration(FourierConfig::builder().n_points(4000).upper_limit(200.0).build().unwrap());
    let call = european(OptionType::Call, 95.0, 2.0);
    let a = coarse.price_semi_analytical(&call, &market).unwrap();
    let b = fine.price_semi_analytical(&call, &market).unwrap();
    assert_abs_diff_eq!(a, b, epsilon = 1e-4);
}

#[test]
fn test_deep_out_of_the_money_short_expiry_is_quadrature_noise() {
    // Prices are returned unclamped, so tiny negative values can appear;
    // they must stay within the quadrature error.
    let market = standard_market();
    let engine = HestonEngine::new(HestonParams::default()).unwrap();
    for (option_type, strike) in [(OptionType::Call, 150.0), (OptionType::Put, 60.0)] {
        let contract = european(option_type, strike, 0.05);
        let price = engine.price_semi_analytical(&contract, &market).unwrap();
        assert!(price.is_finite());
        assert!(price.abs() < 1e-3, "{:?} K={}: {:e}", option_type, strike, price);
    }
}

#[test]
fn test_heston_monte_carlo_is_bit_identical() {
    let market = standard_market();
    let engine = HestonEngine::new(HestonParams::default())
        .unwrap()
        .with_simulation(HestonMcConfig::builder().n_paths(3_000).n_steps(40).seed(11).build().unwrap());
    let call = european(OptionType::Call, 100.0, 1.0);
    let a = engine.price_monte_carlo_configured(&call, &market).unwrap();
    let b = engine.price_monte_carlo_configured(&call, &market).unwrap();
    assert_eq!(a.price.to_bits(), b.price.to_bits());
    assert_eq!(a.n_paths, 3_000);
}

#[test]
fn test_digital_priced_by_simulation() {
    let market = standard_market();
    let engine = HestonEngine::new(flat_params()).unwrap();
    let digital = european(OptionType::Call, 100.0, 1.0).with_kind(ProductKind::digital(1.0).unwrap());
    let reference = pricer_models::analytical::BlackScholes::from_market(&market)
        .price_digital(OptionType::Call, 100.0, 1.0, 1.0);
    let result = engine
        .price_monte_carlo_detailed(&digital, &market, 40_000, 50)
        .unwrap();
    assert_within_se("Heston digital", result.price, result.std_error, reference, 4.0, 0.01);
}

#[test]
fn test_simulated_variance_stays_at_theta_without_vol_of_vol() {
    let engine = HestonEngine::new(flat_params()).unwrap();
    let mut rng = PricerRng::from_seed(5);
    let (spots, variances) = engine
        .simulate_path(&mut rng, &standard_market(), 1.0, 64)
        .unwrap();
    assert_eq!(spots.len(), 65);
    assert!(variances.iter().all(|v| (v - 0.04).abs() < 1e-14));
}
