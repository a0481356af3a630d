//! Property-based checks of pricing, Greeks and surface invariants.

use approx::assert_relative_eq;
use pricer_core::types::{OptionParameters, OptionType, PricingError};
use pricer_models::analytical::{greeks, price, price_option};
use pricer_models::surface::{generate_surface, SurfaceRange};
use proptest::prelude::*;

// ================================================================
// Reference scenario
// ================================================================

#[test]
fn test_reference_scenario() {
    let params = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
    let result = price_option(&params).unwrap();
    assert_relative_eq!(result.call_price, 10.450583572185565, epsilon = 1e-9);
    assert_relative_eq!(result.put_price, 5.573526022256971, epsilon = 1e-9);
    assert_eq!((result.call_price * 100.0).round() / 100.0, 10.45);
    assert_eq!((result.put_price * 100.0).round() / 100.0, 5.57);
}

#[test]
fn test_expired_at_the_money_is_worthless() {
    let result = price(100.0, 100.0, 0.0, 0.05, 0.2).unwrap();
    assert_eq!(result.call_price, 0.0);
    assert_eq!(result.put_price, 0.0);
}

#[test]
fn test_greeks_reject_expired_option() {
    let err = greeks(100.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call).unwrap_err();
    assert!(matches!(err, PricingError::InvalidParameter { .. }));
}

// ================================================================
// Properties
// ================================================================

fn spot() -> impl Strategy<Value = f64> {
    10.0..500.0f64
}

fn strike() -> impl Strategy<Value = f64> {
    10.0..500.0f64
}

fn expiry() -> impl Strategy<Value = f64> {
    0.01..5.0f64
}

fn rate() -> impl Strategy<Value = f64> {
    -0.02..0.15f64
}

fn vol() -> impl Strategy<Value = f64> {
    0.05..1.0f64
}

proptest! {
    #[test]
    fn prop_put_call_parity(s in spot(), k in strike(), t in expiry(), r in rate(), v in vol()) {
        let result = price(s, k, t, r, v).unwrap();
        let forward = s - k * (-r * t).exp();
        prop_assert!((result.call_price - result.put_price - forward).abs() < 1e-6);
    }

    #[test]
    fn prop_prices_non_negative(s in spot(), k in strike(), t in 0.0..5.0f64, r in rate(), v in vol()) {
        let result = price(s, k, t, r, v).unwrap();
        prop_assert!(result.call_price >= 0.0);
        prop_assert!(result.put_price >= 0.0);
        prop_assert!(result.call_price <= s + 1e-9);
    }

    #[test]
    fn prop_monotone_in_spot(s in spot(), k in strike(), t in expiry(), r in rate(), v in vol()) {
        let lower = price(s, k, t, r, v).unwrap();
        let upper = price(s * 1.05, k, t, r, v).unwrap();
        prop_assert!(upper.call_price >= lower.call_price - 1e-9);
        prop_assert!(upper.put_price <= lower.put_price + 1e-9);
    }

    #[test]
    fn prop_monotone_in_volatility(s in spot(), k in strike(), t in expiry(), r in rate(), v in vol()) {
        let lower = price(s, k, t, r, v).unwrap();
        let upper = price(s, k, t, r, v + 0.05).unwrap();
        prop_assert!(upper.call_price >= lower.call_price - 1e-9);
        prop_assert!(upper.put_price >= lower.put_price - 1e-9);
    }

    #[test]
    fn prop_delta_bounds(s in spot(), k in strike(), t in expiry(), r in rate(), v in vol()) {
        let call = greeks(s, k, t, r, v, OptionType::Call).unwrap();
        let put = greeks(s, k, t, r, v, OptionType::Put).unwrap();
        prop_assert!((0.0..=1.0).contains(&call.delta));
        prop_assert!((-1.0..=0.0).contains(&put.delta));
        prop_assert!((call.delta - put.delta - 1.0).abs() < 1e-12);
        prop_assert!(call.gamma >= 0.0);
        prop_assert!(call.vega >= 0.0);
        prop_assert_eq!(call.gamma, put.gamma);
        prop_assert_eq!(call.vega, put.vega);
    }

    #[test]
    fn prop_surface_shape_and_orientation(
        s in 20.0..300.0f64,
        k in strike(),
        t in expiry(),
        r in rate(),
        steps in 2usize..40,
    ) {
        let range = SurfaceRange {
            steps,
            ..SurfaceRange::around_spot(s, k, t, r)
        };
        let surface = generate_surface(&range).unwrap();
        let n = steps.min(20);
        prop_assert_eq!(surface.steps(), n);
        prop_assert_eq!(surface.call_grid().len(), n);
        prop_assert!(surface.put_grid().iter().all(|row| row.len() == n));

        // Rounded cells stay monotone: calls rise along a row, puts fall
        for row in surface.call_grid() {
            prop_assert!(row.windows(2).all(|w| w[1] >= w[0]));
        }
        for row in surface.put_grid() {
            prop_assert!(row.windows(2).all(|w| w[1] <= w[0]));
        }
        prop_assert_eq!(surface.spot_axis()[0], range.min_spot);
        prop_assert_eq!(surface.vol_axis()[0], range.min_vol);
    }
}
