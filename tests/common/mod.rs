//! Common test utilities
#![allow(dead_code)]

use packmath::packet::Packet;

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|. NaN matches NaN and
/// infinities must match exactly.
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
        if x.is_nan() || y.is_nan() {
            assert!(x.is_nan() && y.is_nan(), "{}: element {}: {} vs {}", msg, i, x, y);
            continue;
        }
        if x.is_infinite() || y.is_infinite() {
            assert_eq!(x, y, "{}: element {}", msg, i);
            continue;
        }
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two f32 slices are close within tolerance
///
/// Same rules as [`assert_allclose_f64`], compared in f64.
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f64, atol: f64, msg: &str) {
    let a: Vec<f64> = a.iter().map(|&v| v as f64).collect();
    let b: Vec<f64> = b.iter().map(|&v| v as f64).collect();
    assert_allclose_f64(&a, &b, rtol, atol, msg);
}

/// Apply a packet function to every element of `input`, one packet at a time
///
/// Missing tail lanes are padded with 1.0.
pub fn map_packet<P: Packet>(input: &[P::Scalar], f: impl Fn(P) -> P) -> Vec<P::Scalar> {
    let mut out = input.to_vec();
    for (src, dst) in input.chunks(P::LANES).zip(out.chunks_mut(P::LANES)) {
        let one = <P::Scalar as num_traits::One>::one();
        f(P::load_or(src, one)).store_partial(dst);
    }
    out
}

/// Evenly spaced values from `start` to `end`, inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![start; n];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}
