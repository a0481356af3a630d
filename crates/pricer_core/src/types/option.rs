//! European option parameter records.
//!
//! `OptionParameters` is the immutable input record shared by the pricing
//! and Greeks engines. It can only be built through [`OptionParameters::new`],
//! so any value in hand has already passed domain validation.

use std::fmt;
use std::str::FromStr;

use super::error::{ensure_finite, ensure_positive, Parameter, PricingError};

/// Option right.
///
/// Selects the sign conventions of delta, theta and rho, and the palette used
/// when colouring a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike.
    #[default]
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Returns `true` for [`OptionType::Call`].
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.write_str("call"),
            OptionType::Put => f.write_str("put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(format!("Unknown option type: {}. Expected call or put", other)),
        }
    }
}

/// Validated Black-Scholes inputs for a single European option.
///
/// # Invariants
/// - `spot_price`, `strike_price`, `volatility` are finite and > 0
/// - `time_to_maturity` is finite and >= 0 (0 means expiring now)
/// - `risk_free_rate` is finite and may be negative
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionParameters, OptionType, Parameter};
///
/// let params = OptionParameters::new(100.0, 95.0, 0.5, 0.03, 0.25, OptionType::Put).unwrap();
/// assert_eq!(params.strike_price(), 95.0);
///
/// let err = OptionParameters::new(100.0, 0.0, 0.5, 0.03, 0.25, OptionType::Put).unwrap_err();
/// assert_eq!(err.parameter(), Some(Parameter::StrikePrice));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionParameters {
    spot_price: f64,
    strike_price: f64,
    time_to_maturity: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
}

impl OptionParameters {
    /// Validates and builds a parameter record.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the first field that violates
    /// its constraint, checked in declaration order.
    pub fn new(
        spot_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Result<Self, PricingError> {
        ensure_positive(Parameter::SpotPrice, spot_price)?;
        ensure_positive(Parameter::StrikePrice, strike_price)?;
        ensure_finite(Parameter::TimeToMaturity, time_to_maturity)?;
        if time_to_maturity < 0.0 {
            return Err(PricingError::invalid(
                Parameter::TimeToMaturity,
                time_to_maturity,
                "must not be negative",
            ));
        }
        ensure_finite(Parameter::RiskFreeRate, risk_free_rate)?;
        ensure_positive(Parameter::Volatility, volatility)?;

        Ok(Self {
            spot_price,
            strike_price,
            time_to_maturity,
            risk_free_rate,
            volatility,
            option_type,
        })
    }

    /// Returns a copy with a different option type.
    #[inline]
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Spot price (S).
    #[inline]
    pub fn spot_price(&self) -> f64 {
        self.spot_price
    }

    /// Strike price (K).
    #[inline]
    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    /// Time to maturity in years (T).
    #[inline]
    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    /// Risk-free rate as a decimal (r).
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Volatility as a decimal (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Option right.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OptionParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            spot_price: f64,
            strike_price: f64,
            time_to_maturity: f64,
            risk_free_rate: f64,
            volatility: f64,
            #[serde(default)]
            option_type: OptionType,
        }

        let raw = Raw::deserialize(deserializer)?;
        OptionParameters::new(
            raw.spot_price,
            raw.strike_price,
            raw.time_to_maturity,
            raw.risk_free_rate,
            raw.volatility,
            raw.option_type,
        )
        .map_err(serde::de::Error::custom)
    }
}
