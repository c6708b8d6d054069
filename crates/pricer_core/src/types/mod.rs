//! Core error types.
//!
//! # Re-exports
//!
//! [`PricingError`], [`InterpolationError`] and [`SolverError`] are
//! re-exported at this module level for convenience.

pub mod error;

pub use error::{InterpolationError, PricingError, SolverError};
