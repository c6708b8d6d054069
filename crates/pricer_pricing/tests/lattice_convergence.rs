//! Lattice convergence against Black-Scholes and early-exercise ordering.

mod common;

use approx::assert_abs_diff_eq;
use common::{american, black_scholes, european, init_tracing, standard_market};
use pricer_core::market_data::MarketData;
use pricer_models::instruments::OptionType;
use pricer_pricing::lattice::{BinomialTree, TrinomialTree};

const STRIKES: [f64; 5] = [80.0, 90.0, 100.0, 110.0, 120.0];

#[test]
fn test_black_scholes_reference_scenario() {
    init_tracing();
    let market = standard_market();
    let bs = black_scholes(&market, OptionType::Call, 100.0, 1.0);
    assert_abs_diff_eq!(bs, 10.4506, epsilon = 1e-4);

    let call = european(OptionType::Call, 100.0, 1.0);
    let binomial = BinomialTree::with_steps(500).unwrap().price(&call, &market).unwrap();
    let trinomial = TrinomialTree::with_steps(500).unwrap().price(&call, &market).unwrap();
    assert_abs_diff_eq!(binomial, bs, epsilon = 0.1);
    assert_abs_diff_eq!(trinomial, bs, epsilon = 0.1);
}

#[test]
fn test_european_trees_converge_across_strikes() {
    let market = MarketData::new(100.0, 0.03, 0.25, 0.01).unwrap();
    let binomial = BinomialTree::with_steps(500).unwrap();
    let trinomial = TrinomialTree::with_steps(500).unwrap();

    for option_type in [OptionType::Call, OptionType::Put] {
        for strike in STRIKES {
            let contract = european(option_type, strike, 0.75);
            let reference = black_scholes(&market, option_type, strike, 0.75);
            let b = binomial.price(&contract, &market).unwrap();
            let t = trinomial.price(&contract, &market).unwrap();
            assert!(
                (b - reference).abs() < 0.1,
                "binomial {:?} K={}: {} vs {}",
                option_type,
                strike,
                b,
                reference
            );
            assert!(
                (t - reference).abs() < 0.1,
                "trinomial {:?} K={}: {} vs {}",
                option_type,
                strike,
                t,
                reference
            );
        }
    }
}

#[test]
fn test_american_dominates_european_dominates_intrinsic() {
    let market = MarketData::new(100.0, 0.06, 0.3, 0.02).unwrap();
    let binomial = BinomialTree::with_steps(300).unwrap();
    let trinomial = TrinomialTree::with_steps(300).unwrap();

    for option_type in [OptionType::Call, OptionType::Put] {
        for strike in STRIKES {
            let eu = european(option_type, strike, 1.0);
            let am = american(option_type, strike, 1.0);
            let intrinsic = am.intrinsic(market.spot());
            for (name, eu_price, am_price) in [
                (
                    "binomial",
                    binomial.price(&eu, &market).unwrap(),
                    binomial.price(&am, &market).unwrap(),
                ),
                (
                    "trinomial",
                    trinomial.price(&eu, &market).unwrap(),
                    trinomial.price(&am, &market).unwrap(),
                ),
            ] {
                assert!(am_price >= eu_price - 1e-10, "{} {:?} K={}", name, option_type, strike);
                assert!(am_price >= intrinsic - 1e-10, "{} {:?} K={}", name, option_type, strike);
                assert!(eu_price >= 0.0);
            }
        }
    }
}

#[test]
fn test_binomial_error_shrinks_with_steps() {
    let market = standard_market();
    let put = european(OptionType::Put, 100.0, 1.0);
    let reference = black_scholes(&market, OptionType::Put, 100.0, 1.0);
    let coarse = BinomialTree::with_steps(20).unwrap().price(&put, &market).unwrap();
    let fine = BinomialTree::with_steps(1000).unwrap().price(&put, &market).unwrap();
    assert!((fine - reference).abs() < (coarse - reference).abs());
}
