//! Volatility surface providers.
//!
//! - [`VolatilitySurface`]: σ(K, T) lookup contract
//! - [`FlatVol`]: constant volatility
//! - [`InterpolatedVolSurface`]: bilinear interpolation on a strike/expiry grid

mod flat;
mod interpolated;
mod traits;

pub use flat::FlatVol;
pub use interpolated::InterpolatedVolSurface;
pub use traits::VolatilitySurface;
