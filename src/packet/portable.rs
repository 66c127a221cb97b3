//! Portable packets over plain arrays
//!
//! `F32x<N>` and `F64x<N>` hold `N` lanes in a `[T; N]` and run every
//! primitive lane by lane with scalar IEEE arithmetic. They are the
//! reference backend: any `N >= 1` works, results do not depend on the host
//! ISA, and the AVX backend is checked against them.
//!
//! `madd` uses `mul_add`, so it is fused on every target. `rsqrt_estimate`
//! models a hardware estimate by truncating the exact reciprocal square root
//! to 12 mantissa bits.

use bytemuck::cast;

use super::{IntPacket, Packet};

macro_rules! impl_int_packet {
    ($name:ident, $lane:ty, $ulane:ty, $bits:expr) => {
        #[doc = concat!("Portable packet of `N` lanes of `", stringify!($lane), "`")]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        #[repr(transparent)]
        pub struct $name<const N: usize>(pub [$lane; N]);

        impl<const N: usize> $name<N> {
            #[inline(always)]
            fn map(self, f: impl Fn($lane) -> $lane) -> Self {
                Self(std::array::from_fn(|i| f(self.0[i])))
            }

            #[inline(always)]
            fn zip(self, rhs: Self, f: impl Fn($lane, $lane) -> $lane) -> Self {
                Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
            }
        }

        impl<const N: usize> IntPacket for $name<N> {
            type Lane = $lane;
            const LANES: usize = N;
            const LANE_BITS: u32 = $bits;

            #[inline]
            fn splat(v: $lane) -> Self {
                Self([v; N])
            }

            #[inline]
            fn load(src: &[$lane]) -> Self {
                Self(std::array::from_fn(|i| src[i]))
            }

            #[inline]
            fn store(self, dst: &mut [$lane]) {
                dst[..N].copy_from_slice(&self.0);
            }

            #[inline]
            fn add(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a.wrapping_add(b))
            }

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a.wrapping_sub(b))
            }

            #[inline]
            fn and(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a & b)
            }

            #[inline]
            fn or(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a | b)
            }

            #[inline]
            fn shl(self, n: u32) -> Self {
                self.map(|a| (a as $ulane).checked_shl(n).unwrap_or(0) as $lane)
            }

            #[inline]
            fn shr(self, n: u32) -> Self {
                self.map(|a| (a as $ulane).checked_shr(n).unwrap_or(0) as $lane)
            }

            #[inline]
            fn shr_arith(self, n: u32) -> Self {
                self.map(|a| a >> n.min($bits - 1))
            }
        }
    };
}

macro_rules! impl_float_packet {
    ($name:ident, $scalar:ty, $int:ident, $lane:ty, $bits:ty, $estimate_mask:expr) => {
        #[doc = concat!("Portable packet of `N` lanes of `", stringify!($scalar), "`")]
        #[derive(Copy, Clone, Debug, PartialEq)]
        #[repr(transparent)]
        pub struct $name<const N: usize>(pub [$scalar; N]);

        impl<const N: usize> $name<N> {
            /// Lanes as an array
            #[inline]
            pub fn to_array(self) -> [$scalar; N] {
                self.0
            }

            #[inline(always)]
            fn map(self, f: impl Fn($scalar) -> $scalar) -> Self {
                Self(std::array::from_fn(|i| f(self.0[i])))
            }

            #[inline(always)]
            fn zip(self, rhs: Self, f: impl Fn($scalar, $scalar) -> $scalar) -> Self {
                Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
            }

            #[inline(always)]
            fn mask(self, rhs: Self, f: impl Fn($scalar, $scalar) -> bool) -> Self {
                self.zip(rhs, |a, b| <$scalar>::from_bits(if f(a, b) { !0 } else { 0 }))
            }

            #[inline(always)]
            fn bitwise(self, rhs: Self, f: impl Fn($bits, $bits) -> $bits) -> Self {
                self.zip(rhs, |a, b| <$scalar>::from_bits(f(a.to_bits(), b.to_bits())))
            }
        }

        impl<const N: usize> From<[$scalar; N]> for $name<N> {
            #[inline]
            fn from(lanes: [$scalar; N]) -> Self {
                Self(lanes)
            }
        }

        impl<const N: usize> Packet for $name<N> {
            type Scalar = $scalar;
            type Int = $int<N>;
            const LANES: usize = N;

            #[inline]
            fn splat(v: $scalar) -> Self {
                Self([v; N])
            }

            #[inline]
            fn load(src: &[$scalar]) -> Self {
                Self(std::array::from_fn(|i| src[i]))
            }

            #[inline]
            fn load_or(src: &[$scalar], fill: $scalar) -> Self {
                Self(std::array::from_fn(|i| src.get(i).copied().unwrap_or(fill)))
            }

            #[inline]
            fn store(self, dst: &mut [$scalar]) {
                dst[..N].copy_from_slice(&self.0);
            }

            #[inline]
            fn store_partial(self, dst: &mut [$scalar]) {
                let n = dst.len().min(N);
                dst[..n].copy_from_slice(&self.0[..n]);
            }

            #[inline]
            fn add(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a + b)
            }

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a - b)
            }

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a * b)
            }

            #[inline]
            fn div(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a / b)
            }

            #[inline]
            fn madd(self, b: Self, c: Self) -> Self {
                Self(std::array::from_fn(|i| self.0[i].mul_add(b.0[i], c.0[i])))
            }

            // Same NaN rule as minps/maxps: the second operand wins
            #[inline]
            fn min(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| if a < b { a } else { b })
            }

            #[inline]
            fn max(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| if a > b { a } else { b })
            }

            #[inline]
            fn floor(self) -> Self {
                self.map(<$scalar>::floor)
            }

            #[inline]
            fn sqrt(self) -> Self {
                self.map(<$scalar>::sqrt)
            }

            #[inline]
            fn rsqrt_estimate(self) -> Self {
                self.map(|a| <$scalar>::from_bits((1.0 / a.sqrt()).to_bits() & $estimate_mask))
            }

            #[inline]
            fn cmp_lt(self, rhs: Self) -> Self {
                self.mask(rhs, |a, b| a < b)
            }

            #[inline]
            fn cmp_le(self, rhs: Self) -> Self {
                self.mask(rhs, |a, b| a <= b)
            }

            #[inline]
            fn cmp_gt(self, rhs: Self) -> Self {
                self.mask(rhs, |a, b| a > b)
            }

            #[inline]
            fn cmp_ge(self, rhs: Self) -> Self {
                self.mask(rhs, |a, b| a >= b)
            }

            #[inline]
            fn cmp_eq(self, rhs: Self) -> Self {
                self.mask(rhs, |a, b| a == b)
            }

            #[inline]
            fn and(self, rhs: Self) -> Self {
                self.bitwise(rhs, |a, b| a & b)
            }

            #[inline]
            fn or(self, rhs: Self) -> Self {
                self.bitwise(rhs, |a, b| a | b)
            }

            #[inline]
            fn xor(self, rhs: Self) -> Self {
                self.bitwise(rhs, |a, b| a ^ b)
            }

            #[inline]
            fn andnot(self, rhs: Self) -> Self {
                self.bitwise(rhs, |a, b| !a & b)
            }

            #[inline]
            fn blend(mask: Self, if_true: Self, if_false: Self) -> Self {
                mask.and(if_true).or(mask.andnot(if_false))
            }

            #[inline]
            fn to_bits(self) -> $int<N> {
                $int(cast::<[$scalar; N], [$lane; N]>(self.0))
            }

            #[inline]
            fn from_bits(bits: $int<N>) -> Self {
                Self(cast::<[$lane; N], [$scalar; N]>(bits.0))
            }

            #[inline]
            fn to_int(self) -> $int<N> {
                $int(std::array::from_fn(|i| self.0[i].round_ties_even() as $lane))
            }

            #[inline]
            fn from_int(v: $int<N>) -> Self {
                Self(std::array::from_fn(|i| v.0[i] as $scalar))
            }
        }
    };
}

impl_int_packet!(I32x, i32, u32, 32);
impl_int_packet!(I64x, i64, u64, 64);

// Estimate keeps 12 mantissa bits
impl_float_packet!(F32x, f32, I32x, i32, u32, !0x7FFu32);
impl_float_packet!(F64x, f64, I64x, i64, u64, !((1u64 << 40) - 1));
