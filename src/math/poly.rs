//! Horner chains over packet lanes
//!
//! Coefficients are given highest degree first. Every step is one `madd`,
//! so a degree-n chain costs n fused multiply-adds and no separate powers.

use crate::packet::Packet;

/// Evaluate `c[0]·xⁿ + c[1]·xⁿ⁻¹ + … + c[n]`
///
/// An empty coefficient list evaluates to zero.
#[inline(always)]
pub fn horner<P: Packet>(x: P, coeffs: &[P::Scalar]) -> P {
    let Some((&first, rest)) = coeffs.split_first() else {
        return P::zero();
    };
    rest.iter()
        .fold(P::splat(first), |acc, &c| acc.madd(x, P::splat(c)))
}

/// Even polynomial: `Σ c[i]·x^(2(n-i))`, evaluated in x²
#[inline(always)]
pub fn poly_even<P: Packet>(x: P, coeffs: &[P::Scalar]) -> P {
    horner(x.mul(x), coeffs)
}

/// Odd polynomial: `x · Σ c[i]·x^(2(n-i))`, evaluated in x² then scaled by x
#[inline(always)]
pub fn poly_odd<P: Packet>(x: P, coeffs: &[P::Scalar]) -> P {
    horner(x.mul(x), coeffs).mul(x)
}
