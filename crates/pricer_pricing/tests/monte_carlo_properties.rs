//! Monte Carlo engine properties: accuracy, payoff orderings, barrier
//! parity, antithetic variance reduction and reproducibility.

mod common;

use approx::assert_relative_eq;
use common::{assert_within_se, black_scholes, european, init_tracing, standard_market};
use pricer_models::analytical::norm_cdf;
use pricer_models::instruments::{
    AveragingType, BarrierSpec, BarrierType, OptionContract, OptionType, ProductKind,
};
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};

fn engine(n_paths: usize, n_steps: usize, antithetic: bool) -> MonteCarloEngine {
    MonteCarloEngine::new(
        MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .seed(42)
            .antithetic(antithetic)
            .build()
            .unwrap(),
    )
}

fn asian(averaging: AveragingType, observations: usize) -> OptionContract {
    european(OptionType::Call, 100.0, 1.0)
        .with_kind(ProductKind::asian(averaging, observations).unwrap())
}

fn barrier(barrier_type: BarrierType, level: f64) -> OptionContract {
    european(OptionType::Call, 100.0, 1.0)
        .with_kind(ProductKind::barrier(BarrierSpec::new(barrier_type, level, 0.0).unwrap()))
}

/// Continuously monitored geometric Asian call (Kemna-Vorst).
fn geometric_asian_call(spot: f64, strike: f64, rate: f64, vol: f64, expiry: f64) -> f64 {
    let vol_a = vol / 3.0_f64.sqrt();
    let carry_a = 0.5 * (rate - vol * vol / 6.0);
    let d1 = ((spot / strike).ln() + (carry_a + 0.5 * vol_a * vol_a) * expiry) / (vol_a * expiry.sqrt());
    let d2 = d1 - vol_a * expiry.sqrt();
    spot * ((carry_a - rate) * expiry).exp() * norm_cdf(d1) - strike * (-rate * expiry).exp() * norm_cdf(d2)
}

#[test]
fn test_vanilla_call_matches_black_scholes() {
    init_tracing();
    let market = standard_market();
    let call = european(OptionType::Call, 100.0, 1.0);
    let result = engine(100_000, 1, true).price_detailed(&call, &market).unwrap();
    assert_within_se("MC call", result.price, result.std_error, 10.4506, 4.0, 0.05);
}

#[test]
fn test_vanilla_put_with_dividend() {
    let market = pricer_core::market_data::MarketData::new(95.0, 0.03, 0.3, 0.02).unwrap();
    let put = european(OptionType::Put, 100.0, 0.5);
    let reference = black_scholes(&market, OptionType::Put, 100.0, 0.5);
    let result = engine(50_000, 10, true).price_detailed(&put, &market).unwrap();
    assert_within_se("MC put", result.price, result.std_error, reference, 4.0, 0.05);
}

#[test]
fn test_geometric_asian_below_arithmetic_on_same_seed() {
    let market = standard_market();
    let mc = engine(20_000, 50, true);
    let geometric = mc.price_asian(&asian(AveragingType::Geometric, 12), &market).unwrap();
    let arithmetic = mc.price_asian(&asian(AveragingType::Arithmetic, 12), &market).unwrap();
    assert!(
        geometric <= arithmetic,
        "geometric {} > arithmetic {}",
        geometric,
        arithmetic
    );
}

#[test]
fn test_arithmetic_asian_below_vanilla() {
    let market = standard_market();
    let mc = engine(50_000, 12, true);
    let asian_price = mc.price_asian(&asian(AveragingType::Arithmetic, 12), &market).unwrap();
    let vanilla = mc.price(&european(OptionType::Call, 100.0, 1.0), &market).unwrap();
    assert!(asian_price < vanilla, "asian {} vs vanilla {}", asian_price, vanilla);
    assert!(asian_price > 0.0);
}

#[test]
fn test_geometric_asian_near_continuous_closed_form() {
    let market = standard_market();
    let result = engine(50_000, 1, true)
        .price_asian_detailed(&asian(AveragingType::Geometric, 252), &market)
        .unwrap();
    let reference = geometric_asian_call(100.0, 100.0, 0.05, 0.2, 1.0);
    assert_within_se("geometric Asian", result.price, result.std_error, reference, 4.0, 0.15);
}

#[test]
fn test_knock_in_plus_knock_out_is_vanilla() {
    let market = standard_market();
    let mc = engine(20_000, 50, true);
    let vanilla = mc.price(&european(OptionType::Call, 100.0, 1.0), &market).unwrap();

    for (knock_in, knock_out, level) in [
        (BarrierType::UpIn, BarrierType::UpOut, 120.0),
        (BarrierType::DownIn, BarrierType::DownOut, 90.0),
    ] {
        let pin = mc.price_barrier(&barrier(knock_in, level), &market).unwrap();
        let pout = mc.price_barrier(&barrier(knock_out, level), &market).unwrap();
        assert!(pin > 0.0 && pout > 0.0);
        assert_relative_eq!(pin + pout, vanilla, max_relative = 1e-9);
    }
}

#[test]
fn test_down_out_cheaper_than_vanilla() {
    let market = standard_market();
    let mc = engine(20_000, 50, true);
    let vanilla = mc.price(&european(OptionType::Call, 100.0, 1.0), &market).unwrap();
    let down_out = mc.price_barrier(&barrier(BarrierType::DownOut, 95.0), &market).unwrap();
    assert!(down_out < vanilla);
}

#[test]
fn test_discrete_up_out_decreases_toward_continuous_monitoring() {
    // Finer monitoring catches more crossings, so the knock-out price falls.
    let market = standard_market();
    let vanilla = engine(20_000, 4, true)
        .price(&european(OptionType::Call, 100.0, 1.0), &market)
        .unwrap();
    let contract = barrier(BarrierType::UpOut, 130.0);

    let mut previous: Option<(usize, f64, f64)> = None;
    for n_steps in [4, 16, 64, 256] {
        let result = engine(20_000, n_steps, true)
            .price_barrier_detailed(&contract, &market)
            .unwrap();
        assert!(
            result.price <= vanilla,
            "n_steps={}: up-out {:.4} above vanilla {:.4}",
            n_steps,
            result.price,
            vanilla
        );
        if let Some((prev_steps, prev_price, prev_se)) = previous {
            let slack = 3.0 * prev_se.max(result.std_error);
            assert!(
                result.price <= prev_price + slack,
                "n_steps {} -> {}: {:.4} -> {:.4}",
                prev_steps,
                n_steps,
                prev_price,
                result.price
            );
        }
        previous = Some((n_steps, result.price, result.std_error));
    }

    let coarsest = engine(20_000, 4, true).price_barrier(&contract, &market).unwrap();
    let (_, finest, _) = previous.unwrap();
    assert!(finest < coarsest, "256 steps {:.4} not below 4 steps {:.4}", finest, coarsest);
}

#[test]
fn test_antithetic_reduces_standard_error() {
    let market = standard_market();
    let call = european(OptionType::Call, 100.0, 1.0);
    let plain = engine(20_000, 1, false).price_detailed(&call, &market).unwrap();
    let anti = engine(20_000, 1, true).price_detailed(&call, &market).unwrap();
    assert_eq!(plain.n_paths, 20_000);
    assert_eq!(anti.n_paths, 20_000);
    assert!(
        anti.std_error <= plain.std_error,
        "antithetic se {} > plain se {}",
        anti.std_error,
        plain.std_error
    );
}

#[test]
fn test_same_seed_is_bit_identical() {
    let market = standard_market();
    let mc = engine(5_000, 20, true);
    let contract = barrier(BarrierType::UpOut, 130.0);
    let a = mc.price(&contract, &market).unwrap();
    let b = mc.price(&contract, &market).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());

    let other = MonteCarloEngine::new(mc.config().with_seed(43));
    assert_ne!(other.price(&contract, &market).unwrap().to_bits(), a.to_bits());
}

#[test]
fn test_digital_matches_closed_form() {
    let market = standard_market();
    let digital = european(OptionType::Call, 105.0, 1.0).with_kind(ProductKind::digital(10.0).unwrap());
    let reference = pricer_models::analytical::BlackScholes::from_market(&market)
        .price_digital(OptionType::Call, 105.0, 1.0, 10.0);
    let result = engine(50_000, 1, true).price_detailed(&digital, &market).unwrap();
    assert_within_se("digital", result.price, result.std_error, reference, 4.0, 0.02);
}

#[test]
fn test_parallel_is_deterministic_and_accurate() {
    let market = standard_market();
    let call = european(OptionType::Call, 100.0, 1.0);
    let mc = engine(40_000, 1, true);
    let a = mc.price_parallel(&call, &market, 8).unwrap();
    let b = mc.price_parallel(&call, &market, 8).unwrap();
    assert_eq!(a.price.to_bits(), b.price.to_bits());
    assert_eq!(a.n_paths, 40_000);
    assert_within_se("parallel", a.price, a.std_error, 10.4506, 4.0, 0.05);
}
