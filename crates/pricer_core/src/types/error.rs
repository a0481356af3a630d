//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing, Greeks and surface generation
//! - `Parameter`: The input field a validation failure refers to
//! - `Axis`: The surface axis a degenerate range refers to

use std::fmt;
use thiserror::Error;

/// Input field named by [`PricingError::InvalidParameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Parameter {
    /// Underlying spot price (S)
    SpotPrice,
    /// Strike price (K)
    StrikePrice,
    /// Time to maturity in years (T)
    TimeToMaturity,
    /// Annualised risk-free rate (r)
    RiskFreeRate,
    /// Annualised volatility (σ)
    Volatility,
    /// Lower bound of the surface spot axis
    MinSpot,
    /// Upper bound of the surface spot axis
    MaxSpot,
    /// Lower bound of the surface volatility axis
    MinVol,
    /// Upper bound of the surface volatility axis
    MaxVol,
    /// Mesh resolution of a surface
    Steps,
}

impl Parameter {
    /// Snake-case field name, as used in messages and configuration keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::SpotPrice => "spot_price",
            Parameter::StrikePrice => "strike_price",
            Parameter::TimeToMaturity => "time_to_maturity",
            Parameter::RiskFreeRate => "risk_free_rate",
            Parameter::Volatility => "volatility",
            Parameter::MinSpot => "min_spot",
            Parameter::MaxSpot => "max_spot",
            Parameter::MinVol => "min_vol",
            Parameter::MaxVol => "max_vol",
            Parameter::Steps => "steps",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface axis named by [`PricingError::DegenerateRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Column axis (spot price)
    Spot,
    /// Row axis (volatility)
    Volatility,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Spot => f.write_str("spot"),
            Axis::Volatility => f.write_str("volatility"),
        }
    }
}

/// Categorised pricing errors.
///
/// Every engine in the workspace validates eagerly and reports failures
/// synchronously through this type instead of returning NaN or infinity.
///
/// # Variants
/// - `InvalidParameter`: A single input violates its domain constraint
/// - `DegenerateRange`: A surface axis has `max <= min`
/// - `NumericOverflow`: A computed quantity is not representable as a finite `f64`
///
/// # Examples
/// ```
/// use pricer_core::types::{Parameter, PricingError};
///
/// let err = PricingError::InvalidParameter {
///     parameter: Parameter::Volatility,
///     value: 0.0,
///     reason: "must be positive",
/// };
/// assert_eq!(format!("{}", err), "Invalid parameter volatility = 0: must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PricingError {
    /// Input outside its valid domain.
    #[error("Invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        /// The offending field
        parameter: Parameter,
        /// The rejected value (lossy for integer fields)
        value: f64,
        /// Constraint the value violated
        reason: &'static str,
    },

    /// Surface axis with non-positive extent.
    #[error("Degenerate {axis} range: max {max} must exceed min {min}")]
    DegenerateRange {
        /// The offending axis
        axis: Axis,
        /// Lower bound supplied
        min: f64,
        /// Upper bound supplied
        max: f64,
    },

    /// Result not representable as a finite number.
    #[error("Numeric overflow: {quantity} is not representable")]
    NumericOverflow {
        /// Name of the quantity that overflowed
        quantity: &'static str,
    },
}

impl PricingError {
    /// Shorthand for an `InvalidParameter` error.
    #[inline]
    pub fn invalid(parameter: Parameter, value: f64, reason: &'static str) -> Self {
        PricingError::InvalidParameter {
            parameter,
            value,
            reason,
        }
    }

    /// The field responsible for an `InvalidParameter` error, if any.
    pub fn parameter(&self) -> Option<Parameter> {
        match self {
            PricingError::InvalidParameter { parameter, .. } => Some(*parameter),
            _ => None,
        }
    }
}

/// Requires `value` to be finite and strictly positive.
pub fn ensure_positive(parameter: Parameter, value: f64) -> Result<f64, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::invalid(parameter, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(PricingError::invalid(parameter, value, "must be positive"));
    }
    Ok(value)
}

/// Requires `value` to be finite.
pub fn ensure_finite(parameter: Parameter, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid(parameter, value, "must be finite"))
    }
}

/// Maps a non-finite computed value to `NumericOverflow`.
#[inline]
pub fn ensure_representable(quantity: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::NumericOverflow { quantity })
    }
}
