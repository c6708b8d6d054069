//! # Lattice Engines
//!
//! Recombining trees for European and American vanilla options.
//!
//! - [`BinomialTree`]: Cox-Ross-Rubinstein with u = e^{σ√dt}, d = 1/u
//! - [`TrinomialTree`]: log-space tree with dx = σ√(3dt)
//!
//! Both trees refuse to clamp: a risk-neutral probability outside [0, 1]
//! is reported as `NumericalInfeasibility`. American exercise compares
//! continuation against intrinsic value at every node.
//!
//! ```rust
//! use pricer_core::market_data::MarketData;
//! use pricer_models::instruments::{OptionContract, OptionType};
//! use pricer_pricing::lattice::{BinomialTree, LatticeConfig};
//!
//! let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
//! let config = LatticeConfig::builder().n_steps(500).build().unwrap();
//! let tree = BinomialTree::new(config);
//!
//! let european = OptionContract::european(OptionType::Put, 100.0, 1.0).unwrap();
//! let american = OptionContract::american(OptionType::Put, 100.0, 1.0).unwrap();
//! assert!(tree.price(&american, &market).unwrap() >= tree.price(&european, &market).unwrap());
//! ```

mod binomial;
mod config;
mod trinomial;

pub use binomial::BinomialTree;
pub use config::{LatticeConfig, LatticeConfigBuilder, DEFAULT_LATTICE_STEPS};
pub use trinomial::TrinomialTree;

use pricer_core::types::PricingError;
use pricer_models::instruments::{OptionContract, ProductKind};

/// Trees price plain calls and puts only.
fn check_vanilla(engine: &str, contract: &OptionContract) -> Result<(), PricingError> {
    match contract.kind() {
        ProductKind::Vanilla => Ok(()),
        other => Err(PricingError::UnsupportedStyle(format!(
            "{} tree does not price {} options",
            engine, other
        ))),
    }
}

fn check_probability(name: &str, p: f64) -> Result<(), PricingError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(PricingError::NumericalInfeasibility(format!(
            "risk-neutral probability {} = {} is outside [0, 1]",
            name, p
        )))
    }
}
