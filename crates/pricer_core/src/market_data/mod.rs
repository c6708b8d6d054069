//! Market data structures consumed by the pricing engines.
//!
//! Every engine prices off a scalar [`MarketData`] snapshot. Curve and
//! surface providers are optional sources that a snapshot can be built from.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and implementations (FlatCurve, InterpolatedCurve, NelsonSiegelCurve)
//! - [`surfaces`]: Volatility surface trait and implementations (FlatVol, InterpolatedVolSurface)
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
//! use pricer_core::market_data::surfaces::{VolatilitySurface, FlatVol};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! let vol_surface = FlatVol::new(0.20_f64);
//! let sigma = vol_surface.volatility(100.0, 1.0).unwrap();
//! assert_eq!(sigma, 0.20);
//! ```

pub mod curves;
pub mod error;
mod snapshot;
pub mod surfaces;

pub use curves::{FlatCurve, InterpolatedCurve, NelsonSiegelCurve, YieldCurve};
pub use error::MarketDataError;
pub use snapshot::MarketData;
pub use surfaces::{FlatVol, InterpolatedVolSurface, VolatilitySurface};
