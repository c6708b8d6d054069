//! Numerical building blocks shared by the pricing engines.
//!
//! - [`linalg`]: dense matrix, Gaussian elimination and least squares
//! - [`statistics`]: single-pass sample moments with mergeable accumulators
//! - [`interpolators`]: linear, natural cubic spline and bilinear interpolation
//! - [`solvers`]: Newton-Raphson root finding

pub mod interpolators;
pub mod linalg;
pub mod solvers;
pub mod statistics;
