//! Integration tests for the packet sine

mod common;

use common::{assert_allclose_f32, assert_allclose_f64, linspace, map_packet};
use packmath::math::psin;
use packmath::packet::portable::{F32x, F64x};
use packmath::prelude::*;
use proptest::prelude::*;
use std::f64::consts::PI;

fn sin_f32(x: &[f32]) -> Vec<f32> {
    map_packet::<NativeF32>(x, psin)
}

fn sin_f64(x: &[f64]) -> Vec<f64> {
    map_packet::<NativeF64>(x, psin)
}

#[test]
fn test_sin_reference_lanes_f32() {
    let x = [
        0.0,
        (PI / 2.0) as f32,
        PI as f32,
        (3.0 * PI / 2.0) as f32,
        (-PI / 2.0) as f32,
        (100.0 * PI) as f32,
        1.0e-40,
        -1.0,
    ];
    let expected = [0.0, 1.0, 0.0, -1.0, -1.0, 0.0, 1.0e-40, -0.841_470_98];

    let got = sin_f32(&x);
    // 100π is not representable; its f32 neighbour is about 6e-6 away
    assert_allclose_f32(&got, &expected, 0.0, 1e-5, "sin reference lanes");
    assert_eq!(got[0], 0.0);
    assert!((got[6] - 1.0e-40).abs() < 1.0e-44);
}

#[test]
fn test_sin_reference_lanes_f64() {
    let x = [0.0, PI / 2.0, PI, 3.0 * PI / 2.0, -PI / 2.0, 100.0 * PI, 1.0e-300, -1.0];
    let expected = x.map(f64::sin);
    assert_allclose_f64(&sin_f64(&x), &expected, 0.0, 1e-14, "sin reference lanes");
}

#[test]
fn test_sin_dense_f32() {
    let x: Vec<f32> = linspace(-20.0, 20.0, 4001).iter().map(|&v| v as f32).collect();
    let expected: Vec<f32> = x.iter().map(|&v| (v as f64).sin() as f32).collect();
    assert_allclose_f32(&sin_f32(&x), &expected, 0.0, 1e-6, "sin f32 on [-20, 20]");
}

#[test]
fn test_sin_dense_f64() {
    let x = linspace(-1000.0, 1000.0, 20_001);
    let expected: Vec<f64> = x.iter().map(|v| v.sin()).collect();
    assert_allclose_f64(&sin_f64(&x), &expected, 0.0, 1e-13, "sin f64 on [-1000, 1000]");
}

#[test]
fn test_sin_lane_count_does_not_change_results() {
    let x: Vec<f32> = (0..24).map(|i| i as f32 * 0.41 - 5.0).collect();
    let narrow = map_packet::<F32x<1>>(&x, psin);
    let wide = map_packet::<F32x<16>>(&x, psin);
    assert_eq!(narrow, wide);

    let y: Vec<f64> = x.iter().map(|&v| v as f64).collect();
    assert_eq!(map_packet::<F64x<2>>(&y, psin), map_packet::<F64x<8>>(&y, psin));
}

#[test]
fn test_sin_non_finite() {
    let got = sin_f64(&[f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0]);
    assert!(got[..3].iter().all(|v| v.is_nan()));
    assert_eq!(got[3], 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// sin(x) = sin(x + 2π)
    #[test]
    fn prop_sin_periodic(x in -1.0e4f64..1.0e4) {
        let got = sin_f64(&[x, x + 2.0 * PI]);
        prop_assert!((got[0] - got[1]).abs() < 1e-11, "{} vs {}", got[0], got[1]);
    }

    /// sin(-x) = -sin(x)
    #[test]
    fn prop_sin_odd(x in -1.0e3f32..1.0e3) {
        let got = sin_f32(&[x, -x]);
        prop_assert!((got[0] + got[1]).abs() < 2e-6, "{} vs {}", got[0], got[1]);
    }

    /// f32 sine stays within 1e-6 of the f64 reference on the accurate range
    #[test]
    fn prop_sin_f32_matches_reference(x in -1.0e5f32..1.0e5) {
        let got = sin_f32(&[x])[0] as f64;
        let want = (x as f64).sin();
        prop_assert!((got - want).abs() < 1e-6, "sin({}) = {}, want {}", x, got, want);
    }
}
