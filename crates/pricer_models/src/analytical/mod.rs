//! Analytical pricing formulas for European options.
//!
//! - Black-Scholes with continuous dividend yield, analytic Greeks, digital
//!   payoffs and implied volatility
//! - Standard normal distribution functions

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::{BlackScholes, BlackScholesModel};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
