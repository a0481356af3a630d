//! # Pricer Models
//!
//! Black-Scholes valuation of European options.
//!
//! This crate provides:
//! - Closed-form call and put prices
//! - Analytical Greeks (Delta, Gamma, Theta, Vega, Rho)
//! - Price surfaces over a spot × volatility mesh
//! - Colour mapping for heatmap rendering of those surfaces
//!
//! ## Design Principles
//!
//! - **Stateless**: every operation is a pure function of its inputs
//! - **Validated inputs**: out-of-domain parameters return `PricingError`
//! - **Row parallelism** behind the `parallel` feature

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod surface;
