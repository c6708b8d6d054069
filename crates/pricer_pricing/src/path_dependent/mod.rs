//! Path-dependent payoff infrastructure.
//!
//! - [`PathObserver`]: streaming average, extremes and terminal of a path
//! - [`path_payoff`]: settles any [`ProductKind`](pricer_models::instruments::ProductKind)
//!   against an observed path
//!
//! Simulation engines feed each generated path through an observer, so the
//! same settlement code serves GBM and Heston paths.

mod observer;
mod payoff;

pub use observer::PathObserver;
pub use payoff::{barrier_touched, path_payoff};
