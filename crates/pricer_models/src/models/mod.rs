//! Stochastic model parameters.
//!
//! - [`heston::HestonParams`]: Heston stochastic volatility dynamics

pub mod heston;

pub use heston::{HestonError, HestonParams};
