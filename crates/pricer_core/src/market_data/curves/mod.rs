//! Yield curve providers.
//!
//! - [`YieldCurve`]: zero rate, discount factor and forward rate contract
//! - [`FlatCurve`]: constant rate
//! - [`InterpolatedCurve`]: linear interpolation on zero rates between pillars
//! - [`NelsonSiegelCurve`]: parametric level/slope/curvature curve

mod flat;
mod interpolated;
mod nelson_siegel;
mod traits;

pub use flat::FlatCurve;
pub use interpolated::InterpolatedCurve;
pub use nelson_siegel::NelsonSiegelCurve;
pub use traits::YieldCurve;
