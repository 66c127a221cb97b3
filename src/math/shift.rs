//! Integer-lane shifts used to build float bit patterns
//!
//! `shift_left` moves integer data into the exponent or sign field of a lane.
//! On the AVX backend without AVX2 the shift runs on two 128-bit halves
//! (`packet::avx::pshiftleft`). A left shift never moves bits across a
//! 32-bit lane, so the halves need no fix-up.

use num_traits::One;

use crate::dtype::Element;
use crate::packet::{IntPacket, Packet};

/// Logical left shift of every lane by `n`
///
/// `n = 0` is the identity. Counts of the lane width or more give zero.
#[inline(always)]
pub fn shift_left<I: IntPacket>(v: I, n: u32) -> I {
    v.shl(n)
}

/// Sign-bit mask from the parity of `k`
///
/// Lanes with odd `k` get only the sign bit set, even lanes get zero. XOR
/// the result into a float to negate the odd lanes.
#[inline(always)]
pub fn parity_sign_mask<P: Packet>(k: P::Int) -> P::Int {
    let low = k.and(<P::Int as IntPacket>::splat(One::one()));
    shift_left(low, <P::Int as IntPacket>::LANE_BITS - 1)
}

/// `2^n` per lane for integer `n` in the normal exponent range
///
/// Writes `n + bias` into the exponent field. Callers keep `n` within
/// `[1 - bias, bias]`; outside that the field wraps.
#[inline(always)]
pub fn pow2<P: Packet>(n: P::Int) -> P {
    let biased = n.add(<P::Int as IntPacket>::splat(P::Scalar::EXP_BIAS));
    P::from_bits(shift_left(biased, P::Scalar::MANTISSA_BITS))
}
