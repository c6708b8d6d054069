//! # Monte Carlo Engine
//!
//! GBM path simulation and pricing of European vanilla, digital, Asian and
//! barrier contracts.
//!
//! ```text
//! MonteCarloEngine
//! ├── MonteCarloConfig  (paths, steps, seed, antithetic)
//! ├── PricerRng         (reseeded from the config on every call)
//! └── Orchestration
//!     ├── simulate_path() / simulate_antithetic_pair()
//!     ├── PathObserver + path_payoff()
//!     └── RunningStats  → PricingResult
//! ```
//!
//! Path buffers are allocated once per call and reused for every path.
//!
//! ```rust
//! use pricer_core::market_data::MarketData;
//! use pricer_models::instruments::{AveragingType, OptionContract, OptionType, ProductKind};
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
//!
//! let engine = MonteCarloEngine::new(
//!     MonteCarloConfig::builder().n_paths(10_000).build().unwrap(),
//! );
//! let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
//! let asian = OptionContract::european(OptionType::Call, 100.0, 1.0)
//!     .unwrap()
//!     .with_kind(ProductKind::asian(AveragingType::Arithmetic, 12).unwrap());
//!
//! let price = engine.price_asian(&asian, &market).unwrap();
//! assert!(price > 0.0 && price < 10.45);
//! ```

mod config;
mod parallel;
mod paths;
mod pricer;

pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_PATHS, DEFAULT_SEED, DEFAULT_STEPS,
    MAX_PATHS, MAX_STEPS,
};
pub(crate) use config::validate_counts;
pub use paths::{simulate_antithetic_pair, simulate_path, GbmParams};
pub use pricer::{MonteCarloEngine, PricingResult};
