//! Range reduction for sine
//!
//! x is wrapped into [−π/4, 3π/4) by subtracting an integer number of half
//! periods. The subtraction uses π split into three parts: the leading part
//! has enough trailing zero bits that `shift · part` is exact, so the large
//! cancellation against x loses nothing, and the two smaller parts restore
//! the precision the leading part dropped.
//!
//! Precision degrades once `shift` outgrows the exact range of the leading
//! product (around 2¹⁶ half periods for f32). Inputs of any magnitude are
//! still reduced; there is no cutoff.

use crate::dtype::Element;
use crate::packet::Packet;

/// Result of range reduction
#[derive(Copy, Clone, Debug)]
pub struct ReducedArg<P: Packet> {
    /// Reduced argument scaled by 4/π, in [−1, 3)
    pub z: P,
    /// Number of half periods removed; its parity decides the sign
    pub k: P::Int,
}

/// Reduce `x` modulo π into `z = (x − k·π)·4/π`
#[inline(always)]
pub fn reduce_pi<P: Packet>(x: P) -> ReducedArg<P> {
    let t = P::Scalar::TRIG;

    let z = x.mul(P::splat(t.one_over_pi));
    let shift = z.add(P::constant(0.25)).floor();

    let x = shift.madd(P::splat(t.neg_pi[0]), x);
    let x = shift.madd(P::splat(t.neg_pi[1]), x);
    let x = shift.madd(P::splat(t.neg_pi[2]), x);

    ReducedArg {
        z: x.mul(P::splat(t.four_over_pi)),
        k: shift.to_int(),
    }
}
