//! Sine
//!
//! `psin` wraps x into [−π/4, 3π/4) and evaluates one of two interpolants,
//! both computed for every lane:
//!
//! | z = x'·4/π | Interpolant | Form |
//! |------------|-------------|------|
//! | [−1, 1] | sin(π/4·z) | odd polynomial in z |
//! | (1, 3) | cos(π/4·(z−2)) | even polynomial in z − 2 |
//!
//! The lane result is picked by the mask `z > 1`, then negated where the
//! number of removed half periods is odd.
//!
//! # Accuracy
//!
//! - f32: absolute error below 1e-6 for |x| ≤ 2¹⁵·π
//! - f64: absolute error below 1e-14 for |x| ≤ 2²⁸·π
//!
//! Beyond those magnitudes the reduction loses bits progressively and the
//! error grows with |x| without bound. NaN and ±inf give NaN.

use super::poly::{poly_even, poly_odd};
use super::range::reduce_pi;
use super::select::{flip_sign_on_odd, select};
use crate::dtype::Element;
use crate::packet::Packet;

/// Lane-wise sine
#[inline]
pub fn psin<P: Packet>(x: P) -> P {
    let t = P::Scalar::TRIG;
    let r = reduce_pi(x);

    let right_mask = r.z.cmp_gt(P::constant(1.0));
    let right = poly_even(r.z.sub(P::constant(2.0)), t.right);
    let left = poly_odd(r.z, t.left);

    flip_sign_on_odd(select(right_mask, left, right), r.k)
}
