//! Square root and reciprocal square root
//!
//! Two complete variants of each, both always compiled:
//!
//! | Variant | sqrt | rsqrt | Lanes |
//! |---------|------|-------|-------|
//! | exact | `sqrt` instruction | `1 / sqrt` | f32, f64 |
//! | fast | estimate + one Newton step, × v | estimate + one Newton step | f32 |
//!
//! [`psqrt`] and [`prsqrt`] pick one per lane type at build time through
//! [`Element::FAST_SQRT`]: the fast path for f32 with the `fast-math`
//! feature, the exact path otherwise. f64 lanes always take the exact path.
//!
//! # Fast Path
//!
//! The estimate has about 12 good bits; one Newton step
//! `e ← e·(1.5 − ½·v·e²)` brings it to within 1-2 ulp of the exact result.
//! The step is not defined for subnormal inputs, so those lanes are flushed:
//! `psqrt_fast` returns 0 and `prsqrt_fast` returns +inf. `psqrt_fast(+inf)`
//! and `prsqrt_fast(+inf)` are NaN.

use super::common::sqrt_constants::*;
use crate::dtype::Element;
use crate::packet::{IntPacket, Packet};

/// Build-selected square root
#[inline]
pub fn psqrt<P: Packet>(x: P) -> P {
    P::Scalar::sqrt_packet(x)
}

/// Build-selected reciprocal square root
#[inline]
pub fn prsqrt<P: Packet>(x: P) -> P {
    P::Scalar::rsqrt_packet(x)
}

/// Correctly rounded square root
///
/// NaN for negative inputs, `sqrt(-0) = -0`, `sqrt(+inf) = +inf`.
#[inline(always)]
pub fn psqrt_exact<P: Packet>(x: P) -> P {
    x.sqrt()
}

/// `1 / sqrt(x)` through the exact square root
///
/// +inf for +0, −inf for −0, NaN for negative inputs, 0 for +inf.
#[inline(always)]
pub fn prsqrt_exact<P: Packet>(x: P) -> P {
    P::constant(1.0).div(x.sqrt())
}

/// Square root from the reciprocal estimate and one Newton step
#[inline(always)]
pub fn psqrt_fast<P: Packet<Scalar = f32>>(x: P) -> P {
    let half = x.mul(P::constant(0.5));
    let denormal = x
        .cmp_lt(P::splat(f32::MIN_POSITIVE))
        .and(x.cmp_ge(P::zero()));

    let e = x.rsqrt_estimate();
    let e = e.mul(P::constant(ONE_POINT_FIVE).sub(half.mul(e.mul(e))));

    denormal.andnot(x.mul(e))
}

/// Reciprocal square root from the estimate and one Newton step
///
/// Special lanes are patched in from bit patterns: negative inputs become
/// NaN, zero and subnormal inputs become +inf.
#[inline(always)]
pub fn prsqrt_fast<P: Packet<Scalar = f32>>(x: P) -> P {
    let inf = P::from_bits(P::Int::splat(INF_BITS_F32));
    let nan = P::from_bits(P::Int::splat(NAN_BITS_F32));
    let flt_min = P::from_bits(P::Int::splat(MIN_NORMAL_BITS_F32));

    let neg_half = x.mul(P::constant(MINUS_HALF));

    // Only positive normal lanes keep their estimate
    let le_zero = x.cmp_lt(flt_min);
    let e = le_zero.andnot(x.rsqrt_estimate());

    let neg = x.cmp_lt(P::zero());
    let zero = neg.andnot(le_zero);
    let specials = neg.and(nan).or(zero.and(inf));

    let e = e.mul(neg_half.madd(e.mul(e), P::constant(ONE_POINT_FIVE)));
    e.or(specials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::portable::{F32x, F64x};

    // 1-2 bits worse than exact
    const FAST_REL_TOL: f64 = 6.0 * f32::EPSILON as f64;

    #[test]
    fn test_exact_matches_scalar() {
        let x = F64x::from([0.0, 2.0, 1.0e-310, 1.0e300]);
        let got = psqrt_exact(x).to_array();
        for (i, &v) in x.to_array().iter().enumerate() {
            assert_eq!(got[i], v.sqrt());
        }
        let r = prsqrt_exact(F64x::from([4.0, 0.0, -1.0, f64::INFINITY])).to_array();
        assert_eq!(r[0], 0.5);
        assert_eq!(r[1], f64::INFINITY);
        assert!(r[2].is_nan());
        assert_eq!(r[3], 0.0);
    }

    #[test]
    fn test_exact_specials() {
        let got = psqrt_exact(F32x::from([-1.0f32, f32::INFINITY, -0.0, f32::NAN])).to_array();
        assert!(got[0].is_nan());
        assert_eq!(got[1], f32::INFINITY);
        assert!(got[2] == 0.0 && got[2].is_sign_negative());
        assert!(got[3].is_nan());
    }

    #[test]
    fn test_fast_sqrt_close_to_exact() {
        let mut v = f32::MIN_POSITIVE;
        while v < 1.0e30 {
            let fast = psqrt_fast(F32x::<4>::splat(v)).to_array()[0] as f64;
            let exact = (v as f64).sqrt();
            assert!((fast - exact).abs() <= FAST_REL_TOL * exact, "sqrt({}) = {}", v, fast);
            v *= 3.7;
        }
    }

    #[test]
    fn test_fast_sqrt_flushes_denormals() {
        let x = F32x::from([0.0f32, 1.0e-40, f32::MIN_POSITIVE / 2.0, -1.0]);
        let got = psqrt_fast(x).to_array();
        assert_eq!(&got[..3], &[0.0, 0.0, 0.0]);
        assert!(got[3].is_nan());
    }

    #[test]
    fn test_fast_rsqrt_close_to_exact() {
        let mut v = f32::MIN_POSITIVE;
        while v < 1.0e30 {
            let fast = prsqrt_fast(F32x::<4>::splat(v)).to_array()[0] as f64;
            let exact = 1.0 / (v as f64).sqrt();
            assert!((fast - exact).abs() <= FAST_REL_TOL * exact, "rsqrt({}) = {}", v, fast);
            v *= 3.7;
        }
    }

    #[test]
    fn test_fast_rsqrt_specials() {
        let x = F32x::from([-1.0f32, 0.0, 1.0e-40, -0.0, f32::NEG_INFINITY, 4.0, f32::NAN, -1.0e-40]);
        let got = prsqrt_fast(x).to_array();
        assert!(got[0].is_nan());
        assert_eq!(got[1], f32::INFINITY);
        assert_eq!(got[2], f32::INFINITY);
        assert_eq!(got[3], f32::INFINITY);
        assert!(got[4].is_nan());
        assert!((got[5] - 0.5).abs() < 1e-6);
        assert!(got[6].is_nan());
        assert!(got[7].is_nan());
    }

    #[test]
    fn test_build_selected_variants() {
        let x = F32x::from([0.25f32, 2.0, 9.0, 1.0e10]);
        let expect_sqrt = if f32::FAST_SQRT { psqrt_fast(x) } else { psqrt_exact(x) };
        let expect_rsqrt = if f32::FAST_SQRT { prsqrt_fast(x) } else { prsqrt_exact(x) };
        assert_eq!(psqrt(x).to_array(), expect_sqrt.to_array());
        assert_eq!(prsqrt(x).to_array(), expect_rsqrt.to_array());

        let y = F64x::from([0.25, 2.0, 9.0, 1.0e300]);
        assert_eq!(psqrt(y).to_array(), psqrt_exact(y).to_array());
        assert_eq!(prsqrt(y).to_array(), prsqrt_exact(y).to_array());
    }
}
