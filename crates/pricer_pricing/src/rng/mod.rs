//! # Random Number Generation
//!
//! Seeded streams for the simulation engines.
//!
//! - [`PricerRng`]: `StdRng` wrapper with seed tracking, uniform, normal and
//!   correlated-normal draws and zero-allocation batch fills
//! - [`StreamArena`]: deterministic per-worker streams from a master seed,
//!   mixed with SplitMix64
//!
//! Documentation in this module follows British English spelling
//! ("initialise", "behaviour").
//!
//! ```rust
//! use pricer_pricing::rng::{PricerRng, StreamArena};
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//!
//! let workers = StreamArena::new(12345).streams(8);
//! assert_eq!(workers.len(), 8);
//! ```

mod prng;
mod streams;

pub use prng::PricerRng;
pub use streams::StreamArena;
