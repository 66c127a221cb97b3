//! Branch-free selection between candidate results
//!
//! Every candidate is computed for every lane; a mask decides per lane which
//! one survives. Nothing here branches on lane data.

use crate::packet::Packet;

/// `a` where `mask` is clear, `b` where it is set
///
/// Written as `(a & !mask) | (b & mask)`.
#[inline(always)]
pub fn select<P: Packet>(mask: P, a: P, b: P) -> P {
    mask.andnot(a).or(mask.and(b))
}

/// Stitch piecewise results over mutually exclusive regions
///
/// `pieces` pairs each candidate with the mask of lanes it covers. Lanes
/// outside every mask take `fallback`. If masks overlap, later pieces win.
#[inline(always)]
pub fn blend_intervals<P: Packet>(fallback: P, pieces: &[(P, P)]) -> P {
    pieces
        .iter()
        .fold(fallback, |acc, &(mask, value)| select(mask, acc, value))
}

/// Flip the sign of lanes whose shift count `k` is odd
///
/// The low bit of `k` is moved into the sign position and XORed into
/// `value`. Even lanes pass through unchanged, bit for bit.
#[inline(always)]
pub fn flip_sign_on_odd<P: Packet>(value: P, k: P::Int) -> P {
    value.xor(P::from_bits(super::shift::parity_sign_mask::<P>(k)))
}

/// Replace lanes that were NaN in `x` with the matching lanes of `x`
///
/// Used after clamps, which drop NaN because `min`/`max` return the bound.
#[inline(always)]
pub fn restore_nan<P: Packet>(x: P, result: P) -> P {
    select(x.is_ordered(), x, result)
}
