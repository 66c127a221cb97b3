//! Exponential, logarithm and tanh
//!
//! These are the generic evaluators the entry points in [`crate::math`]
//! delegate to. Each is written once over [`Packet`] and takes its constants
//! from the lane type's tables in `common.rs`.
//!
//! # Special Values
//!
//! | Input | `pexp` | `plog` | `ptanh` |
//! |-------|--------|--------|---------|
//! | NaN | NaN | NaN | NaN |
//! | +inf | +inf | +inf | 1 |
//! | −inf | 0 | NaN | −1 |
//! | 0 | 1 | −inf | 0 |
//! | < 0 | | NaN | |
//!
//! `plog` treats subnormal inputs as the smallest normal value.

use num_traits::Float;

use super::common::{ExpTable, LogTable, TanhTable};
use super::poly::horner;
use super::select::{restore_nan, select};
use super::shift::pow2;
use crate::dtype::Element;
use crate::packet::{IntPacket, Packet};

/// Lane-wise `e^x`
///
/// x = m·ln2 + r with m = floor(x·log₂e + ½), so |r| ≤ ln2/2. exp(r) comes
/// from `1 + r + r²·P(r)` and the scale 2^m is applied in two halves so
/// neither factor leaves the normal exponent range.
///
/// Inputs above the upper clamp give +inf; inputs below the lower clamp
/// give 0.
#[inline]
pub fn pexp<P: Packet>(x: P) -> P {
    let ExpTable {
        lo,
        hi,
        log2e,
        neg_ln2,
        poly,
    } = P::Scalar::EXP;
    let one = P::constant(1.0);

    let xc = x.max(P::splat(lo)).min(P::splat(hi));

    let m = xc.madd(P::splat(log2e), P::constant(0.5)).floor();
    let r = m.madd(P::splat(neg_ln2[0]), xc);
    let r = m.madd(P::splat(neg_ln2[1]), r);

    let y = horner(r, poly).madd(r.mul(r), r.add(one));

    let m_lo = m.mul(P::constant(0.5)).floor();
    let m_hi = m.sub(m_lo);
    let y = y.mul(pow2::<P>(m_lo.to_int())).mul(pow2::<P>(m_hi.to_int()));

    let y = select(x.cmp_gt(P::splat(hi)), y, P::splat(P::Scalar::infinity()));
    let y = P::splat(lo).cmp_gt(x).andnot(y);
    restore_nan(x, y)
}

/// Lane-wise natural logarithm
///
/// x = 2^e·m with m ∈ [√½, √2). With f = m − 1 and s = f/(2 + f),
/// log(m) = 2·atanh(s) and |s| ≤ 0.1716, so a short odd series in s
/// suffices. The exponent term e·ln2 is added in two parts.
#[inline]
pub fn plog<P: Packet>(x: P) -> P {
    let LogTable { ln2, poly } = P::Scalar::LOG;
    let one = P::constant(1.0);

    let xc = x.max(P::splat(P::Scalar::min_positive_value()));

    // frexp: mantissa in [0.5, 1), exponent adjusted to match
    let bits = xc.to_bits();
    let biased = bits.shr(P::Scalar::MANTISSA_BITS);
    let e = P::from_int(biased.sub(<P::Int as IntPacket>::splat(
        P::Scalar::EXP_BIAS - num_traits::One::one(),
    )));
    let mant = P::from_bits(
        bits.and(<P::Int as IntPacket>::splat(P::Scalar::MANTISSA_MASK))
            .or(P::constant(0.5).to_bits()),
    );

    // Move mantissas below √½ up an octave
    let small = mant.cmp_lt(P::constant(std::f64::consts::FRAC_1_SQRT_2));
    let f = mant.add(small.and(mant)).sub(one);
    let e = e.sub(small.and(one));

    let s = f.div(f.add(P::constant(2.0)));
    let s2 = s.mul(s);
    let atanh = horner(s2, poly).mul(s2).madd(s, s);

    let y = e.madd(P::splat(ln2[1]), atanh.add(atanh));
    let y = e.madd(P::splat(ln2[0]), y);

    let zero = P::zero();
    let inf = P::splat(P::Scalar::infinity());
    let y = select(x.cmp_eq(inf), y, inf);
    let y = select(x.cmp_eq(zero), y, P::splat(P::Scalar::neg_infinity()));
    select(x.cmp_ge(zero), P::splat(P::Scalar::nan()), y)
}

/// Lane-wise hyperbolic tangent
///
/// 13/6 rational approximation `x·N(x²) / D(x²)` on the clamped input.
/// Lanes with |x| below the tiny threshold return x exactly.
#[inline]
pub fn ptanh<P: Packet>(x: P) -> P {
    let TanhTable {
        clamp,
        tiny,
        num,
        den,
    } = P::Scalar::TANH;

    let xc = x.max(P::splat(-clamp)).min(P::splat(clamp));
    let small = xc.abs().cmp_lt(P::splat(tiny));

    let x2 = xc.mul(xc);
    let p = horner(x2, num).mul(xc);
    let q = horner(x2, den);

    restore_nan(x, select(small, p.div(q), xc))
}
