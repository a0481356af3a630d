//! Analytical Black-Scholes Greeks.
//!
//! Reported in the units a trading screen shows them:
//! - Delta, Gamma: per unit of spot
//! - Theta: per calendar day (annual theta / 365)
//! - Vega: per 1 percentage point of volatility (/ 100)
//! - Rho: per 1 percentage point of rate (/ 100)
//!
//! The expiry boundary `T <= 0` is a singularity of every formula here and is
//! rejected instead of producing infinities.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::types::{
    ensure_positive, ensure_representable, OptionParameters, OptionType, Parameter, PricingError,
};

use super::black_scholes::{BlackScholes, D1D2};

/// Calendar days used to convert annual theta into daily theta.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Scale from per-unit to per-percentage-point sensitivities.
pub const PERCENT: f64 = 100.0;

/// Black-Scholes sensitivities for one option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksResult {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S², identical for calls and puts
    pub gamma: f64,
    /// Daily time decay
    pub theta: f64,
    /// Price change per 1% volatility move
    pub vega: f64,
    /// Price change per 1% rate move
    pub rho: f64,
}

impl BlackScholes {
    /// Computes all five Greeks for the given strike, expiry and right.
    ///
    /// # Formulas
    /// - Delta: N(d₁) for calls, N(d₁) - 1 for puts
    /// - Gamma: φ(d₁) / (S·σ·√T)
    /// - Theta: [-(S·σ·φ(d₁))/(2√T) ∓ r·K·e^(-rT)·N(±d₂)] / 365
    /// - Vega: S·√T·φ(d₁) / 100
    /// - Rho: ±K·T·e^(-rT)·N(±d₂) / 100
    ///
    /// # Errors
    /// - `InvalidParameter` for a non-positive strike or expiry
    /// - `NumericOverflow` if any sensitivity is not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_core::types::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    /// let greeks = bs.greeks(100.0, 1.0, OptionType::Call).unwrap();
    /// assert!((greeks.delta - 0.6368).abs() < 1e-4);
    /// ```
    pub fn greeks(
        &self,
        strike: f64,
        expiry: f64,
        option_type: OptionType,
    ) -> Result<GreeksResult, PricingError> {
        ensure_positive(Parameter::StrikePrice, strike)?;
        ensure_positive(Parameter::TimeToMaturity, expiry)?;

        let spot = self.spot();
        let rate = self.rate();
        let volatility = self.volatility();

        let D1D2 { d1, d2, sqrt_t } = self.d1d2(strike, expiry);
        let pdf_d1 = norm_pdf(d1);
        let discounted_strike = strike * (-rate * expiry).exp();

        // Common theta term: -(S·σ·φ(d₁))/(2√T)
        let decay = -(spot * volatility * pdf_d1) / (2.0 * sqrt_t);

        let (delta, annual_theta, rho) = match option_type {
            OptionType::Call => {
                let n_d2 = norm_cdf(d2);
                (
                    norm_cdf(d1),
                    decay - rate * discounted_strike * n_d2,
                    expiry * discounted_strike * n_d2,
                )
            }
            OptionType::Put => {
                let n_minus_d2 = norm_cdf(-d2);
                (
                    norm_cdf(d1) - 1.0,
                    decay + rate * discounted_strike * n_minus_d2,
                    -expiry * discounted_strike * n_minus_d2,
                )
            }
        };

        Ok(GreeksResult {
            delta: ensure_representable("delta", delta)?,
            gamma: ensure_representable("gamma", pdf_d1 / (spot * volatility * sqrt_t))?,
            theta: ensure_representable("theta", annual_theta / DAYS_PER_YEAR)?,
            vega: ensure_representable("vega", spot * sqrt_t * pdf_d1 / PERCENT)?,
            rho: ensure_representable("rho", rho / PERCENT)?,
        })
    }
}

/// Computes the Greeks from the five Black-Scholes inputs and the option right.
pub fn greeks(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> Result<GreeksResult, PricingError> {
    BlackScholes::new(spot, rate, volatility)?.greeks(strike, expiry, option_type)
}

/// Computes the Greeks of a validated parameter record.
///
/// # Errors
/// `InvalidParameter` if the record expires now (`time_to_maturity == 0`).
pub fn greeks_option(params: &OptionParameters) -> Result<GreeksResult, PricingError> {
    BlackScholes::from_parameters(params).greeks(
        params.strike_price(),
        params.time_to_maturity(),
        params.option_type(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const STRIKES: [f64; 5] = [80.0, 90.0, 100.0, 110.0, 120.0];

    fn textbook() -> BlackScholes {
        BlackScholes::new(100.0, 0.05, 0.2).unwrap()
    }

    fn call_price(spot: f64, rate: f64, vol: f64, expiry: f64) -> f64 {
        BlackScholes::new(spot, rate, vol)
            .unwrap()
            .price(100.0, expiry)
            .unwrap()
            .call_price
    }

    // ==========================================================
    // Reference Values
    // ==========================================================

    #[test]
    fn test_call_reference_values() {
        // S=100, K=100, T=1, r=0.05, σ=0.2
        let g = textbook().greeks(100.0, 1.0, OptionType::Call).unwrap();
        assert_relative_eq!(g.delta, 0.6368306511756191, epsilon = 1e-9);
        assert_relative_eq!(g.gamma, 0.018762017345846895, epsilon = 1e-9);
        assert_relative_eq!(g.vega, 0.3752403469169379, epsilon = 1e-9);
        assert_relative_eq!(g.theta, -6.414027546438197 / 365.0, epsilon = 1e-9);
        assert_relative_eq!(g.rho, 0.5323248154537634, epsilon = 1e-9);
    }

    #[test]
    fn test_put_reference_values() {
        let g = textbook().greeks(100.0, 1.0, OptionType::Put).unwrap();
        assert_relative_eq!(g.delta, 0.6368306511756191 - 1.0, epsilon = 1e-9);
        assert_relative_eq!(g.theta, -1.657880423934626 / 365.0, epsilon = 1e-9);
        assert_relative_eq!(g.rho, -0.4189046090469506, epsilon = 1e-9);
    }

    // ==========================================================
    // Structural Properties
    // ==========================================================

    #[test]
    fn test_delta_bounds() {
        let bs = textbook();
        for strike in STRIKES {
            let call = bs.greeks(strike, 1.0, OptionType::Call).unwrap().delta;
            let put = bs.greeks(strike, 1.0, OptionType::Put).unwrap().delta;
            assert!((0.0..=1.0).contains(&call), "Call delta should be in [0, 1]");
            assert!((-1.0..=0.0).contains(&put), "Put delta should be in [-1, 0]");
            assert_relative_eq!(put, call - 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gamma_and_vega_shared_between_rights() {
        let bs = textbook();
        for strike in STRIKES {
            let call = bs.greeks(strike, 1.0, OptionType::Call).unwrap();
            let put = bs.greeks(strike, 1.0, OptionType::Put).unwrap();
            assert_eq!(call.gamma, put.gamma);
            assert_eq!(call.vega, put.vega);
            assert!(call.gamma >= 0.0);
            assert!(call.vega >= 0.0);
        }
    }

    #[test]
    fn test_gamma_maximum_near_atm() {
        let bs = textbook();
        let gamma = |k: f64| bs.greeks(k, 1.0, OptionType::Call).unwrap().gamma;
        assert!(gamma(100.0) >= gamma(80.0));
        assert!(gamma(100.0) >= gamma(120.0));
    }

    #[test]
    fn test_signs() {
        let bs = textbook();
        let call = bs.greeks(100.0, 1.0, OptionType::Call).unwrap();
        let put = bs.greeks(100.0, 1.0, OptionType::Put).unwrap();
        assert!(call.theta < 0.0, "Call theta should typically be negative");
        assert!(call.rho > 0.0, "Call rho should be positive");
        assert!(put.rho < 0.0, "Put rho should be negative");
    }

    // ==========================================================
    // Greeks vs Finite Difference Tests
    // ==========================================================

    #[test]
    fn test_delta_vs_finite_diff() {
        let h = 0.01;
        let fd = (call_price(100.0 + h, 0.05, 0.2, 1.0) - call_price(100.0 - h, 0.05, 0.2, 1.0))
            / (2.0 * h);
        let analytical = textbook().greeks(100.0, 1.0, OptionType::Call).unwrap().delta;
        assert_relative_eq!(analytical, fd, epsilon = 1e-6);
    }

    #[test]
    fn test_gamma_vs_finite_diff() {
        let h = 0.01;
        let fd = (call_price(100.0 + h, 0.05, 0.2, 1.0) - 2.0 * call_price(100.0, 0.05, 0.2, 1.0)
            + call_price(100.0 - h, 0.05, 0.2, 1.0))
            / (h * h);
        let analytical = textbook().greeks(100.0, 1.0, OptionType::Call).unwrap().gamma;
        assert_relative_eq!(analytical, fd, epsilon = 1e-4);
    }

    #[test]
    fn test_vega_vs_finite_diff() {
        let h = 0.001;
        let fd = (call_price(100.0, 0.05, 0.2 + h, 1.0) - call_price(100.0, 0.05, 0.2 - h, 1.0))
            / (2.0 * h);
        let analytical = textbook().greeks(100.0, 1.0, OptionType::Call).unwrap().vega;
        assert_relative_eq!(analytical * PERCENT, fd, epsilon = 1e-4);
    }

    #[test]
    fn test_rho_vs_finite_diff() {
        let h = 0.0001;
        let fd = (call_price(100.0, 0.05 + h, 0.2, 1.0) - call_price(100.0, 0.05 - h, 0.2, 1.0))
            / (2.0 * h);
        let analytical = textbook().greeks(100.0, 1.0, OptionType::Call).unwrap().rho;
        assert_relative_eq!(analytical * PERCENT, fd, epsilon = 1e-4);
    }

    #[test]
    fn test_theta_vs_finite_diff() {
        // Theta is the decay as calendar time passes, i.e. -∂V/∂T
        let h = 1e-4;
        let fd = -(call_price(100.0, 0.05, 0.2, 1.0 + h) - call_price(100.0, 0.05, 0.2, 1.0 - h))
            / (2.0 * h);
        let analytical = textbook().greeks(100.0, 1.0, OptionType::Call).unwrap().theta;
        assert_relative_eq!(analytical * DAYS_PER_YEAR, fd, epsilon = 1e-4);
    }

    // ==========================================================
    // Expiry Boundary & Validation
    // ==========================================================

    #[test]
    fn test_zero_expiry_rejected() {
        for expiry in [0.0, -1.0] {
            let err = textbook().greeks(100.0, expiry, OptionType::Call).unwrap_err();
            assert_eq!(err.parameter(), Some(Parameter::TimeToMaturity));
        }
    }

    #[test]
    fn test_greeks_option_at_expiry_rejected() {
        let params = OptionParameters::new(100.0, 100.0, 0.0, 0.05, 0.2, OptionType::Put).unwrap();
        assert!(greeks_option(&params).is_err());
    }

    #[test]
    fn test_free_function_matches_model() {
        let free = greeks(100.0, 110.0, 0.5, 0.01, 0.35, OptionType::Put).unwrap();
        let params =
            OptionParameters::new(100.0, 110.0, 0.5, 0.01, 0.35, OptionType::Put).unwrap();
        assert_eq!(free, greeks_option(&params).unwrap());
    }

    #[test]
    fn test_free_function_validates_strike() {
        let err = greeks(100.0, -1.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::StrikePrice));
    }
}
