//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts, closed-form models and the pricing facade.
//!
//! This crate provides:
//! - Contract definitions with a tagged product kind (`instruments`)
//! - Black-Scholes pricing, Greeks, digitals and implied volatility (`analytical`)
//! - Heston model parameters (`models`)
//! - The [`pricing::PricingModel`] trait, [`pricing::Greeks`] and finite-difference sensitivities (`pricing`)
//!
//! ## Design Principles
//!
//! - **Enum-based products** so engines match on the payoff family
//! - **Immutable value types**: Greeks reprice bumped copies, never mutate inputs
//! - **Validated construction**: a contract that exists is always priceable

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
pub mod pricing;
