//! Heston stochastic volatility pricing.
//!
//! - [`HestonEngine::price_semi_analytical`]: Fourier inversion of the
//!   "little trap" characteristic function with trapezoid quadrature
//! - [`HestonEngine::price_monte_carlo`]: full-truncation Euler scheme with
//!   one correlated normal pair per step
//!
//! Vol-of-vol below [`DETERMINISTIC_SIGMA`] collapses the model to
//! Black-Scholes at the time-averaged variance.

mod char_fn;
mod config;
mod engine;
mod semi_analytical;
mod simulation;

pub use config::{
    FourierConfig, FourierConfigBuilder, HestonMcConfig, HestonMcConfigBuilder,
    DEFAULT_FOURIER_POINTS, DEFAULT_UPPER_LIMIT,
};
pub use engine::HestonEngine;
pub use semi_analytical::DETERMINISTIC_SIGMA;
