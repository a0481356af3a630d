//! Mesh definition for price surfaces.
//!
//! A [`SurfaceRange`] fixes strike, maturity and rate, and spans a
//! `steps × steps` mesh over spot (columns) and volatility (rows).

use pricer_core::types::{ensure_finite, ensure_positive, Axis, Parameter, PricingError};

/// Smallest mesh resolution; one step would divide by zero.
pub const MIN_STEPS: usize = 2;

/// Largest mesh resolution; bounds a surface to 400 pricings.
pub const MAX_STEPS: usize = 20;

/// Default volatility axis of a freshly opened heatmap.
pub const DEFAULT_VOL_RANGE: (f64, f64) = (0.1, 0.4);

/// Default mesh resolution of a freshly opened heatmap.
pub const DEFAULT_STEPS: usize = 10;

/// Spot axis bounds as fractions of the current spot.
const SPOT_BAND: (f64, f64) = (0.7, 1.3);

/// Parameter mesh for [`generate_surface`](super::generate_surface).
///
/// # Invariants (checked by [`SurfaceRange::validate`])
/// - `strike_price > 0`, `min_spot > 0`, `min_vol > 0`
/// - `max_spot > min_spot`, `max_vol > min_vol`
/// - `steps >= 2`; values above [`MAX_STEPS`] are clamped, not rejected
///
/// # Examples
/// ```
/// use pricer_models::surface::SurfaceRange;
///
/// let range = SurfaceRange {
///     strike_price: 100.0,
///     time_to_maturity: 1.0,
///     risk_free_rate: 0.05,
///     min_spot: 80.0,
///     max_spot: 120.0,
///     min_vol: 0.1,
///     max_vol: 0.4,
///     steps: 5,
/// };
/// assert!(range.validate().is_ok());
/// assert_eq!(range.spot_axis(), vec![80.0, 90.0, 100.0, 110.0, 120.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceRange {
    /// Strike price (K), fixed across the mesh
    pub strike_price: f64,
    /// Time to maturity in years (T), fixed across the mesh
    pub time_to_maturity: f64,
    /// Risk-free rate (r), fixed across the mesh
    pub risk_free_rate: f64,
    /// Spot of column 0
    pub min_spot: f64,
    /// Spot of the last column
    pub max_spot: f64,
    /// Volatility of row 0
    pub min_vol: f64,
    /// Volatility of the last row
    pub max_vol: f64,
    /// Requested mesh resolution per axis
    pub steps: usize,
}

impl SurfaceRange {
    /// Default mesh centred on `spot`: spot axis `round(0.7·S)..round(1.3·S)`,
    /// volatility `0.10..0.40`, 10 steps.
    ///
    /// For very small spots the rounded bounds may coincide; such a range
    /// fails validation with `DegenerateRange`.
    pub fn around_spot(spot: f64, strike_price: f64, time_to_maturity: f64, risk_free_rate: f64) -> Self {
        Self {
            strike_price,
            time_to_maturity,
            risk_free_rate,
            min_spot: (spot * SPOT_BAND.0).round(),
            max_spot: (spot * SPOT_BAND.1).round(),
            min_vol: DEFAULT_VOL_RANGE.0,
            max_vol: DEFAULT_VOL_RANGE.1,
            steps: DEFAULT_STEPS,
        }
    }

    /// Checks every invariant, reporting the first violation.
    ///
    /// # Errors
    /// - `InvalidParameter` for a bad strike, maturity, rate, axis bound or `steps < 2`
    /// - `DegenerateRange` when an axis maximum does not exceed its minimum
    pub fn validate(&self) -> Result<(), PricingError> {
        ensure_positive(Parameter::StrikePrice, self.strike_price)?;
        ensure_finite(Parameter::TimeToMaturity, self.time_to_maturity)?;
        ensure_finite(Parameter::RiskFreeRate, self.risk_free_rate)?;

        if self.steps < MIN_STEPS {
            return Err(PricingError::invalid(
                Parameter::Steps,
                self.steps as f64,
                "must be at least 2",
            ));
        }

        ensure_positive(Parameter::MinSpot, self.min_spot)?;
        ensure_finite(Parameter::MaxSpot, self.max_spot)?;
        if self.max_spot <= self.min_spot {
            return Err(PricingError::DegenerateRange {
                axis: Axis::Spot,
                min: self.min_spot,
                max: self.max_spot,
            });
        }

        ensure_positive(Parameter::MinVol, self.min_vol)?;
        ensure_finite(Parameter::MaxVol, self.max_vol)?;
        if self.max_vol <= self.min_vol {
            return Err(PricingError::DegenerateRange {
                axis: Axis::Volatility,
                min: self.min_vol,
                max: self.max_vol,
            });
        }

        Ok(())
    }

    /// Resolution actually used: `steps` capped at [`MAX_STEPS`].
    #[inline]
    pub fn effective_steps(&self) -> usize {
        self.steps.min(MAX_STEPS)
    }

    /// Spot distance between adjacent columns.
    #[inline]
    pub fn spot_step(&self) -> f64 {
        (self.max_spot - self.min_spot) / (self.effective_steps() - 1) as f64
    }

    /// Volatility distance between adjacent rows.
    #[inline]
    pub fn vol_step(&self) -> f64 {
        (self.max_vol - self.min_vol) / (self.effective_steps() - 1) as f64
    }

    /// Spot of column `j`.
    #[inline]
    pub fn spot_at(&self, j: usize) -> f64 {
        self.min_spot + j as f64 * self.spot_step()
    }

    /// Volatility of row `i`.
    #[inline]
    pub fn vol_at(&self, i: usize) -> f64 {
        self.min_vol + i as f64 * self.vol_step()
    }

    /// Column coordinates, ascending.
    pub fn spot_axis(&self) -> Vec<f64> {
        (0..self.effective_steps()).map(|j| self.spot_at(j)).collect()
    }

    /// Row coordinates, ascending.
    pub fn vol_axis(&self) -> Vec<f64> {
        (0..self.effective_steps()).map(|i| self.vol_at(i)).collect()
    }
}
