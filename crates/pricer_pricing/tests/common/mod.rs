//! Shared helpers for the integration tests.

#![allow(dead_code)]

use pricer_core::market_data::MarketData;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{OptionContract, OptionType};

/// Installs a test-writer subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// S = 100, r = 5%, σ = 20%, q = 0.
pub fn standard_market() -> MarketData {
    MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap()
}

/// European contract helper.
pub fn european(option_type: OptionType, strike: f64, expiry: f64) -> OptionContract {
    OptionContract::european(option_type, strike, expiry).unwrap()
}

/// American contract helper.
pub fn american(option_type: OptionType, strike: f64, expiry: f64) -> OptionContract {
    OptionContract::american(option_type, strike, expiry).unwrap()
}

/// Black-Scholes reference price.
pub fn black_scholes(market: &MarketData, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
    BlackScholes::from_market(market).price(option_type, strike, expiry)
}

/// Asserts |estimate − reference| < max(k·se, floor).
pub fn assert_within_se(label: &str, estimate: f64, std_error: f64, reference: f64, k: f64, floor: f64) {
    let tolerance = (k * std_error).max(floor);
    let error = (estimate - reference).abs();
    assert!(
        error < tolerance,
        "{}: estimate={:.4}, reference={:.4}, error={:.4}, tolerance={:.4}",
        label,
        estimate,
        reference,
        error,
        tolerance
    );
}
