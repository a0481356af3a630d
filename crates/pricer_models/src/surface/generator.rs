//! Price surface generation.
//!
//! Re-prices the Black-Scholes call and put at every point of a
//! [`SurfaceRange`] mesh. Row `i` is volatility `min_vol + i·vol_step`,
//! column `j` is spot `min_spot + j·spot_step`; both ascend.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, warn};

use pricer_core::types::PricingError;

use super::range::SurfaceRange;
use crate::analytical::BlackScholes;

/// Rounds to 2 decimal places (cents).
///
/// Values too large for `value * 100` to stay finite have no cent fraction
/// and are returned unchanged.
#[inline]
pub(crate) fn round_cents(value: f64) -> f64 {
    let cents = value * 100.0;
    if cents.is_finite() {
        cents.round() / 100.0
    } else {
        value
    }
}

/// One mesh point with its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SurfaceCell {
    /// Spot price of the column
    pub spot: f64,
    /// Volatility of the row
    pub volatility: f64,
    /// Rounded call price
    pub call_price: f64,
    /// Rounded put price
    pub put_price: f64,
}

/// Call and put price grids over a spot × volatility mesh.
///
/// # Invariants
/// - Both grids are `steps × steps`
/// - Every cell is finite and rounded to 2 decimals
/// - `vol_axis[i]` and `spot_axis[j]` are the coordinates of cell `(i, j)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceSurface {
    call_grid: Vec<Vec<f64>>,
    put_grid: Vec<Vec<f64>>,
    spot_axis: Vec<f64>,
    vol_axis: Vec<f64>,
}

impl PriceSurface {
    /// Mesh resolution per axis.
    #[inline]
    pub fn steps(&self) -> usize {
        self.vol_axis.len()
    }

    /// Call prices, indexed `[vol_row][spot_column]`.
    #[inline]
    pub fn call_grid(&self) -> &[Vec<f64>] {
        &self.call_grid
    }

    /// Put prices, indexed `[vol_row][spot_column]`.
    #[inline]
    pub fn put_grid(&self) -> &[Vec<f64>] {
        &self.put_grid
    }

    /// Spot coordinates of the columns.
    #[inline]
    pub fn spot_axis(&self) -> &[f64] {
        &self.spot_axis
    }

    /// Volatility coordinates of the rows.
    #[inline]
    pub fn vol_axis(&self) -> &[f64] {
        &self.vol_axis
    }

    /// Cell at row `i`, column `j`, if in bounds.
    pub fn cell(&self, i: usize, j: usize) -> Option<SurfaceCell> {
        Some(SurfaceCell {
            spot: *self.spot_axis.get(j)?,
            volatility: *self.vol_axis.get(i)?,
            call_price: *self.call_grid.get(i)?.get(j)?,
            put_price: *self.put_grid.get(i)?.get(j)?,
        })
    }

    /// Largest call price; normaliser for colour mapping.
    #[inline]
    pub fn call_max(&self) -> f64 {
        grid_max(&self.call_grid)
    }

    /// Largest put price; normaliser for colour mapping.
    #[inline]
    pub fn put_max(&self) -> f64 {
        grid_max(&self.put_grid)
    }
}

/// Maximum cell of a grid; 1 for an empty grid.
pub fn grid_max(grid: &[Vec<f64>]) -> f64 {
    grid.iter()
        .flatten()
        .copied()
        .reduce(f64::max)
        .unwrap_or(1.0)
}

/// Prices one volatility row across the spot axis.
fn price_row(
    range: &SurfaceRange,
    spot_axis: &[f64],
    volatility: f64,
) -> Result<(Vec<f64>, Vec<f64>), PricingError> {
    let mut calls = Vec::with_capacity(spot_axis.len());
    let mut puts = Vec::with_capacity(spot_axis.len());

    for &spot in spot_axis {
        let result = BlackScholes::new(spot, range.risk_free_rate, volatility)?
            .price(range.strike_price, range.time_to_maturity)?;
        calls.push(round_cents(result.call_price));
        puts.push(round_cents(result.put_price));
    }

    Ok((calls, puts))
}

/// Generates call and put price grids over the range's mesh.
///
/// `steps` above [`MAX_STEPS`](super::MAX_STEPS) is clamped. With the
/// `parallel` feature rows are priced on the rayon pool; the output is
/// identical to the sequential path.
///
/// # Errors
/// - `InvalidParameter` / `DegenerateRange` from [`SurfaceRange::validate`]
/// - `NumericOverflow` if any mesh point prices to a non-finite value
///
/// # Examples
/// ```
/// use pricer_models::surface::{generate_surface, SurfaceRange};
///
/// let range = SurfaceRange::around_spot(100.0, 100.0, 1.0, 0.05);
/// let surface = generate_surface(&range).unwrap();
/// assert_eq!(surface.steps(), 10);
/// assert_eq!(surface.call_grid().len(), 10);
/// assert!(surface.call_grid().iter().all(|row| row.len() == 10));
/// ```
pub fn generate_surface(range: &SurfaceRange) -> Result<PriceSurface, PricingError> {
    range.validate()?;

    let steps = range.effective_steps();
    if steps < range.steps {
        warn!(
            requested = range.steps,
            steps, "Surface resolution clamped to maximum"
        );
    }
    debug!(
        steps,
        strike = range.strike_price,
        maturity = range.time_to_maturity,
        rate = range.risk_free_rate,
        "Generating price surface"
    );

    let spot_axis = range.spot_axis();
    let vol_axis = range.vol_axis();

    #[cfg(feature = "parallel")]
    let rows: Vec<(Vec<f64>, Vec<f64>)> = vol_axis
        .par_iter()
        .map(|&vol| price_row(range, &spot_axis, vol))
        .collect::<Result<Vec<_>, PricingError>>()?;

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<(Vec<f64>, Vec<f64>)> = vol_axis
        .iter()
        .map(|&vol| price_row(range, &spot_axis, vol))
        .collect::<Result<Vec<_>, PricingError>>()?;

    let (call_grid, put_grid): (Vec<_>, Vec<_>) = rows.into_iter().unzip();

    debug!(steps, "Price surface generated");
    Ok(PriceSurface {
        call_grid,
        put_grid,
        spot_axis,
        vol_axis,
    })
}
