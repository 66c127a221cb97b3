//! Integration tests for the slice kernels

mod common;

use common::{assert_allclose_f32, assert_allclose_f64, map_packet};
use packmath::prelude::*;

fn reference_f64(op: UnaryOp, x: f64) -> f64 {
    match op {
        UnaryOp::Sin => x.sin(),
        UnaryOp::Exp => x.exp(),
        UnaryOp::Log => x.ln(),
        UnaryOp::Tanh => x.tanh(),
        UnaryOp::Sqrt => x.sqrt(),
        UnaryOp::Rsqrt => 1.0 / x.sqrt(),
    }
}

#[test]
fn test_unary_f32_all_ops_against_std() {
    // Odd length so every op runs through the padded tail
    let input: Vec<f32> = (1..=203).map(|i| i as f32 * 0.049).collect();
    for op in UnaryOp::ALL {
        let mut out = vec![0.0f32; input.len()];
        unary_f32(op, &input, &mut out).unwrap();
        let expected: Vec<f32> = input.iter().map(|&v| reference_f64(op, v as f64) as f32).collect();
        assert_allclose_f32(&out, &expected, 1e-6, 1e-6, op.name());
    }
}

#[test]
fn test_unary_f64_all_ops_against_std() {
    let input: Vec<f64> = (1..=101).map(|i| i as f64 * 0.097).collect();
    for op in UnaryOp::ALL {
        let mut out = vec![0.0f64; input.len()];
        unary_f64(op, &input, &mut out).unwrap();
        let expected: Vec<f64> = input.iter().map(|&v| reference_f64(op, v)).collect();
        // tanh shares the single-precision rational fit
        let (rtol, atol) = if op == UnaryOp::Tanh { (0.0, 1e-6) } else { (1e-14, 1e-15) };
        assert_allclose_f64(&out, &expected, rtol, atol, op.name());
    }
}

#[test]
fn test_slice_results_match_packets_bitwise() {
    let input: Vec<f32> = (0..77).map(|i| (i as f32 - 38.0) * 0.31).collect();
    for op in UnaryOp::ALL {
        let mut out = vec![0.0f32; input.len()];
        unary_f32(op, &input, &mut out).unwrap();
        let packets = map_packet::<NativeF32>(&input, |p| op.apply(p));
        for (a, b) in out.iter().zip(&packets) {
            assert!(a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan()), "{}", op);
        }
    }
}

#[test]
fn test_every_tail_length() {
    let lanes = NativeF64::LANES;
    for len in 0..3 * lanes {
        let input: Vec<f64> = (0..len).map(|i| 0.5 + i as f64).collect();
        let mut out = vec![f64::NAN; len];
        unary_f64(UnaryOp::Log, &input, &mut out).unwrap();
        let expected: Vec<f64> = input.iter().map(|v| v.ln()).collect();
        assert_allclose_f64(&out, &expected, 1e-15, 1e-16, "log tail");
    }
}

#[test]
fn test_length_mismatch_is_reported() {
    let mut out = vec![0.0f32; 4];
    let err = unary_f32(UnaryOp::Exp, &[1.0; 5], &mut out).unwrap_err();
    assert_eq!(err, Error::LengthMismatch { input: 5, output: 4 });
    assert_eq!(out, [0.0; 4]);
}

#[test]
fn test_inplace_kernels() {
    let mut data: Vec<f32> = (0..19).map(|i| i as f32 * 0.2).collect();
    let mut out = vec![0.0f32; data.len()];
    unary_f32(UnaryOp::Tanh, &data, &mut out).unwrap();
    unary_inplace_f32(UnaryOp::Tanh, &mut data);
    assert_eq!(data, out);

    let mut data = vec![4.0f64; 6];
    unary_inplace_f64(UnaryOp::Rsqrt, &mut data);
    assert_eq!(data, [0.5; 6]);
}

#[test]
fn test_compiled_level_is_reported() {
    let level = SimdLevel::compiled();
    assert!(detect_simd() >= level);
    assert_eq!(NativeF32::LANES, level.f32_lanes());
}

#[cfg(feature = "rayon")]
#[test]
fn test_parallel_kernels_match_serial() {
    use packmath::kernels::PARALLEL_CHUNK;

    let n = 2 * PARALLEL_CHUNK + 13;
    let input: Vec<f64> = (0..n).map(|i| 1.0 + i as f64 * 1e-3).collect();
    for op in UnaryOp::ALL {
        let mut serial = vec![0.0; n];
        let mut parallel = vec![0.0; n];
        unary_f64(op, &input, &mut serial).unwrap();
        par_unary_f64(op, &input, &mut parallel).unwrap();
        assert_eq!(serial, parallel, "{}", op);
    }

    let input32: Vec<f32> = input.iter().map(|&v| v as f32).collect();
    let mut serial = vec![0.0f32; n];
    let mut parallel = vec![0.0f32; n];
    unary_f32(UnaryOp::Sin, &input32, &mut serial).unwrap();
    par_unary_f32(UnaryOp::Sin, &input32, &mut parallel).unwrap();
    assert_eq!(serial, parallel);
}
