//! Root-finding solvers.
//!
//! - [`NewtonRaphsonSolver`]: quadratic convergence using an explicit derivative,
//!   with an optional domain restart for positive-only parameters
//! - [`SolverConfig`]: tolerance, iteration budget and derivative floor
//!
//! The implied volatility search in `pricer_models` is the main consumer.
//!
//! ```
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 1.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod config;
mod newton_raphson;

pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
