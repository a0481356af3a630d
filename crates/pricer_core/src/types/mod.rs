//! Core parameter and error types.
//!
//! This module provides:
//! - `option`: `OptionType` and the validated `OptionParameters` record
//! - `error`: `PricingError` and the field/axis identifiers it reports
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`OptionType`], [`OptionParameters`] from `option`
//! - [`PricingError`], [`Parameter`], [`Axis`] from `error`

pub mod error;
pub mod option;

pub use error::{ensure_finite, ensure_positive, ensure_representable, Axis, Parameter, PricingError};
pub use option::{OptionParameters, OptionType};
