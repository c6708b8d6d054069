//! # pricer_core: Numerical Foundation for the Pricing Engines
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 3-layer architecture, providing:
//! - Error types: `PricingError`, `InterpolationError`, `SolverError` (`types::error`)
//! - Market snapshot, yield curves and volatility surfaces (`market_data`)
//! - Dense linear algebra and least squares (`math::linalg`)
//! - Sample statistics with mergeable accumulators (`math::statistics`)
//! - Interpolators and root-finding solvers (`math::interpolators`, `math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketData;
//! use pricer_core::math::linalg::{least_squares, Matrix};
//!
//! let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
//! assert!((market.discount_factor(1.0) - (-0.05_f64).exp()).abs() < 1e-15);
//!
//! // Fit y = 1 + 2x exactly
//! let design = Matrix::from_rows(&[vec![1.0, 0.0], vec![1.0, 1.0], vec![1.0, 2.0]]).unwrap();
//! let beta = least_squares(&design, &[1.0, 3.0, 5.0]).unwrap();
//! assert!((beta[0] - 1.0).abs() < 1e-10 && (beta[1] - 2.0).abs() < 1e-10);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for market data, statistics and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
