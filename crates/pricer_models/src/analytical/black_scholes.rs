//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options. Greeks live in [`super::greeks`] and share the
//! same [`D1D2`] derivation.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::math::distributions::norm_cdf;
use pricer_core::types::{
    ensure_finite, ensure_positive, ensure_representable, OptionParameters, Parameter,
    PricingError,
};

/// Standardised moneyness terms of the Black-Scholes formula.
///
/// Only defined for a strictly positive expiry; callers handle `T <= 0`
/// before constructing one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct D1D2 {
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    pub d1: f64,
    /// d₂ = d₁ - σ√T
    pub d2: f64,
    /// √T, reused by the Greeks
    pub sqrt_t: f64,
}

impl D1D2 {
    /// Computes d₁ and d₂ from the five base parameters.
    ///
    /// # Arguments
    /// * `spot` - Spot price (S), positive
    /// * `strike` - Strike price (K), positive
    /// * `expiry` - Time to expiration in years (T), positive
    /// * `rate` - Risk-free rate (r)
    /// * `volatility` - Volatility (σ), positive
    #[inline]
    pub fn new(spot: f64, strike: f64, expiry: f64, rate: f64, volatility: f64) -> Self {
        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = volatility * sqrt_t;

        let log_moneyness = (spot / strike).ln();
        let drift = (rate + 0.5 * volatility * volatility) * expiry;

        let d1 = (log_moneyness + drift) / vol_sqrt_t;
        Self {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
        }
    }
}

/// Call and put prices for one parameter set.
///
/// Both prices are always computed; the option type of the inputs is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// European call price, >= 0
    pub call_price: f64,
    /// European put price, >= 0
    pub put_price: f64,
}

impl PricingResult {
    /// Payoff at expiry: `max(0, S-K)` and `max(0, K-S)`.
    #[inline]
    pub fn intrinsic(spot: f64, strike: f64) -> Self {
        Self {
            call_price: (spot - strike).max(0.0),
            put_price: (strike - spot).max(0.0),
        }
    }
}

/// Black-Scholes model for European option pricing.
///
/// Holds the market state (spot, rate, volatility) and prices any
/// strike/expiry pair against it.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let result = bs.price(100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = result.call_price - result.put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, may be negative)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for a non-positive spot or volatility,
    /// or any non-finite input.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, PricingError> {
        Ok(Self {
            spot: ensure_positive(Parameter::SpotPrice, spot)?,
            rate: ensure_finite(Parameter::RiskFreeRate, rate)?,
            volatility: ensure_positive(Parameter::Volatility, volatility)?,
        })
    }

    /// Builds the model from a validated parameter record.
    #[inline]
    pub fn from_parameters(params: &OptionParameters) -> Self {
        Self {
            spot: params.spot_price(),
            rate: params.risk_free_rate(),
            volatility: params.volatility(),
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// d₁ and d₂ for a strike and a strictly positive expiry.
    #[inline]
    pub fn d1d2(&self, strike: f64, expiry: f64) -> D1D2 {
        D1D2::new(self.spot, strike, expiry, self.rate, self.volatility)
    }

    /// Prices the European call and put with the given strike and expiry.
    ///
    /// An expiry at or below zero returns the intrinsic payoff. Both prices
    /// are floored at zero.
    ///
    /// # Errors
    /// - `InvalidParameter` for a non-positive strike or non-finite expiry
    /// - `NumericOverflow` when the discount factor or a price is not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(110.0, 0.05, 0.2).unwrap();
    /// let at_expiry = bs.price(100.0, 0.0).unwrap();
    /// assert_eq!(at_expiry.call_price, 10.0);
    /// assert_eq!(at_expiry.put_price, 0.0);
    /// ```
    pub fn price(&self, strike: f64, expiry: f64) -> Result<PricingResult, PricingError> {
        ensure_positive(Parameter::StrikePrice, strike)?;
        ensure_finite(Parameter::TimeToMaturity, expiry)?;

        if expiry <= 0.0 {
            return Ok(PricingResult::intrinsic(self.spot, strike));
        }

        let D1D2 { d1, d2, .. } = self.d1d2(strike, expiry);
        let discount = ensure_representable("discount factor", (-self.rate * expiry).exp())?;
        let discounted_strike = strike * discount;

        // C = S·N(d₁) - K·e^(-rT)·N(d₂)
        let call = self.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2);
        // P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
        let put = discounted_strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1);

        Ok(PricingResult {
            call_price: ensure_representable("call price", call)?.max(0.0),
            put_price: ensure_representable("put price", put)?.max(0.0),
        })
    }
}

/// Prices a European call and put from the five Black-Scholes inputs.
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_scholes::price;
///
/// let result = price(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// assert!((result.call_price - 10.45).abs() < 0.01);
/// assert!((result.put_price - 5.57).abs() < 0.01);
/// ```
pub fn price(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
) -> Result<PricingResult, PricingError> {
    BlackScholes::new(spot, rate, volatility)?.price(strike, expiry)
}

/// Prices a validated parameter record.
pub fn price_option(params: &OptionParameters) -> Result<PricingResult, PricingError> {
    BlackScholes::from_parameters(params).price(params.strike_price(), params.time_to_maturity())
}
