//! # Least-Squares Monte Carlo
//!
//! Longstaff-Schwartz pricing of American vanilla options on GBM paths.
//!
//! - [`LsmcConfig`]: paths, exercise dates, seed, Laguerre degree, antithetic
//! - [`LsmcEngine`]: backward induction with continuation regression
//! - [`laguerre_basis`]: e^{−x/2}-weighted Laguerre polynomials
//!
//! Regressions that are too thin (fewer in-the-money paths than basis
//! functions) or numerically singular skip their exercise date and are
//! logged; they never fail the pricing call.

mod basis;
mod config;
mod pricer;

pub use basis::laguerre_basis;
pub use config::{
    LsmcConfig, LsmcConfigBuilder, DEFAULT_DEGREE, DEFAULT_LSMC_PATHS, DEFAULT_LSMC_STEPS,
    MAX_DEGREE,
};
pub use pricer::LsmcEngine;
