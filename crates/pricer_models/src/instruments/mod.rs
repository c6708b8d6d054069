//! Option contract definitions.
//!
//! Contracts are plain value types. The payoff family is a tagged
//! [`ProductKind`] so engines select behaviour by matching on it:
//!
//! - [`OptionContract`]: parameters, [`OptionType`], [`ExerciseStyle`] and kind
//! - [`ProductKind`]: Vanilla, Asian, Barrier or Digital
//! - [`BarrierSpec`]: barrier level, direction and rebate
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{
//!     BarrierSpec, BarrierType, OptionContract, OptionType, ProductKind,
//! };
//!
//! let barrier = BarrierSpec::new(BarrierType::UpOut, 130.0, 0.0).unwrap();
//! let contract = OptionContract::european(OptionType::Call, 100.0, 1.0)
//!     .unwrap()
//!     .with_kind(ProductKind::barrier(barrier));
//! assert_eq!(contract.kind().name(), "Barrier");
//! ```

mod error;
mod exercise;
mod option;
mod params;
mod payoff;
mod product;

pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use option::OptionContract;
pub use params::ContractParams;
pub use payoff::OptionType;
pub use product::{AveragingType, BarrierSpec, BarrierType, ProductKind};
