//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions under Black-Scholes dynamics:
//! - `black_scholes`: call/put prices and the shared d₁/d₂ derivation
//! - `greeks`: Delta, Gamma, Theta, Vega, Rho
//!
//! ## Design Principles
//!
//! - **Pure functions**: every call is a fresh computation from its inputs
//! - **Eager validation**: out-of-domain inputs fail with `PricingError`
//!   rather than propagating NaN or infinity
//! - **Numerical Stability**: erfc-based CDF for accuracy in the tails

pub mod black_scholes;
pub mod greeks;

// Re-export main types at module level
pub use black_scholes::{price, price_option, BlackScholes, PricingResult, D1D2};
pub use greeks::{greeks, greeks_option, GreeksResult};
