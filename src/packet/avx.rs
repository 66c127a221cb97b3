//! AVX packets: 8 × f32 and 4 × f64 in 256-bit registers
//!
//! Compiled only when the build enables AVX (`-C target-feature=+avx` or a
//! `target-cpu` that has it), so every intrinsic below is available for the
//! whole program and the `unsafe` blocks carry no runtime feature checks.
//!
//! # Integer Lanes
//!
//! AVX has 256-bit integer registers but no 256-bit integer arithmetic; that
//! arrived with AVX2. Without AVX2 every integer op splits the register into
//! two 128-bit halves, runs the SSE2 instruction on each and reassembles.
//! Lane-wise ops never carry bits across the half boundary, so the split is
//! exact.
//!
//! # f64 ↔ i64
//!
//! Neither AVX nor AVX2 converts between f64 and i64 lanes
//! (`_mm256_cvtpd_epi64` is AVX-512DQ). `Packet4d::to_int`/`from_int` go
//! through memory for those four lanes; everything around them stays in
//! registers. The same holds for the 64-bit arithmetic right shift.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{IntPacket, Packet, x86};

/// Apply a 128-bit SSE2 integer op to both halves of a 256-bit register
macro_rules! split_halves {
    ($op:ident, $a:expr) => {{
        let a = $a;
        let lo = $op(_mm256_castsi256_si128(a));
        let hi = $op(_mm256_extractf128_si256::<1>(a));
        _mm256_insertf128_si256::<1>(_mm256_castsi128_si256(lo), hi)
    }};
    ($op:ident, $a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        let lo = $op(_mm256_castsi256_si128(a), _mm256_castsi256_si128(b));
        let hi = $op(
            _mm256_extractf128_si256::<1>(a),
            _mm256_extractf128_si256::<1>(b),
        );
        _mm256_insertf128_si256::<1>(_mm256_castsi128_si256(lo), hi)
    }};
}

// ============================================================================
// Integer registers
// ============================================================================

/// Eight `i32` lanes
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct Packet8i(pub __m256i);

/// Four `i64` lanes
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct Packet4l(pub __m256i);

/// Bitwise AND through the float domain, available on plain AVX
#[inline(always)]
unsafe fn and_si256(a: __m256i, b: __m256i) -> __m256i {
    _mm256_castps_si256(_mm256_and_ps(_mm256_castsi256_ps(a), _mm256_castsi256_ps(b)))
}

/// Bitwise OR through the float domain, available on plain AVX
#[inline(always)]
unsafe fn or_si256(a: __m256i, b: __m256i) -> __m256i {
    _mm256_castps_si256(_mm256_or_ps(_mm256_castsi256_ps(a), _mm256_castsi256_ps(b)))
}

/// Left-shift every 32-bit lane by `n`
///
/// One `vpslld` with AVX2. Without it, shift the two 128-bit halves with
/// the SSE2 instruction and put them back together.
#[inline(always)]
pub fn pshiftleft(v: __m256i, n: u32) -> __m256i {
    unsafe {
        #[cfg(target_feature = "avx2")]
        {
            x86::sll_epi32_avx2(v, n)
        }
        #[cfg(not(target_feature = "avx2"))]
        {
            x86::sll_epi32_split(v, n)
        }
    }
}

impl IntPacket for Packet8i {
    type Lane = i32;
    const LANES: usize = 8;
    const LANE_BITS: u32 = 32;

    #[inline(always)]
    fn splat(v: i32) -> Self {
        unsafe { Self(_mm256_set1_epi32(v)) }
    }

    #[inline(always)]
    fn load(src: &[i32]) -> Self {
        assert!(src.len() >= 8, "load needs 8 lanes, got {}", src.len());
        unsafe { Self(_mm256_loadu_si256(src.as_ptr() as *const __m256i)) }
    }

    #[inline(always)]
    fn store(self, dst: &mut [i32]) {
        assert!(dst.len() >= 8, "store needs 8 lanes, got {}", dst.len());
        unsafe { _mm256_storeu_si256(dst.as_mut_ptr() as *mut __m256i, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe {
            #[cfg(target_feature = "avx2")]
            {
                Self(_mm256_add_epi32(self.0, rhs.0))
            }
            #[cfg(not(target_feature = "avx2"))]
            {
                Self(split_halves!(_mm_add_epi32, self.0, rhs.0))
            }
        }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe {
            #[cfg(target_feature = "avx2")]
            {
                Self(_mm256_sub_epi32(self.0, rhs.0))
            }
            #[cfg(not(target_feature = "avx2"))]
            {
                Self(split_halves!(_mm_sub_epi32, self.0, rhs.0))
            }
        }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Self(and_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self(or_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn shl(self, n: u32) -> Self {
        Self(pshiftleft(self.0, n))
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        unsafe {
            let count = _mm_cvtsi32_si128(n as i32);
            #[cfg(target_feature = "avx2")]
            {
                Self(_mm256_srl_epi32(self.0, count))
            }
            #[cfg(not(target_feature = "avx2"))]
            {
                let shift = |h: __m128i| _mm_srl_epi32(h, count);
                Self(split_halves!(shift, self.0))
            }
        }
    }

    #[inline(always)]
    fn shr_arith(self, n: u32) -> Self {
        unsafe {
            let count = _mm_cvtsi32_si128(n as i32);
            #[cfg(target_feature = "avx2")]
            {
                Self(_mm256_sra_epi32(self.0, count))
            }
            #[cfg(not(target_feature = "avx2"))]
            {
                let shift = |h: __m128i| _mm_sra_epi32(h, count);
                Self(split_halves!(shift, self.0))
            }
        }
    }
}

impl IntPacket for Packet4l {
    type Lane = i64;
    const LANES: usize = 4;
    const LANE_BITS: u32 = 64;

    #[inline(always)]
    fn splat(v: i64) -> Self {
        unsafe { Self(_mm256_set1_epi64x(v)) }
    }

    #[inline(always)]
    fn load(src: &[i64]) -> Self {
        assert!(src.len() >= 4, "load needs 4 lanes, got {}", src.len());
        unsafe { Self(_mm256_loadu_si256(src.as_ptr() as *const __m256i)) }
    }

    #[inline(always)]
    fn store(self, dst: &mut [i64]) {
        assert!(dst.len() >= 4, "store needs 4 lanes, got {}", dst.len());
        unsafe { _mm256_storeu_si256(dst.as_mut_ptr() as *mut __m256i, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe {
            #[cfg(target_feature = "avx2")]
            {
                Self(_mm256_add_epi64(self.0, rhs.0))
            }
            #[cfg(not(target_feature = "avx2"))]
            {
                Self(split_halves!(_mm_add_epi64, self.0, rhs.0))
            }
        }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe {
            #[cfg(target_feature = "avx2")]
            {
                Self(_mm256_sub_epi64(self.0, rhs.0))
            }
            #[cfg(not(target_feature = "avx2"))]
            {
                Self(split_halves!(_mm_sub_epi64, self.0, rhs.0))
            }
        }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Self(and_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self(or_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn shl(self, n: u32) -> Self {
        unsafe {
            let count = _mm_cvtsi32_si128(n as i32);
            #[cfg(target_feature = "avx2")]
            {
                Self(_mm256_sll_epi64(self.0, count))
            }
            #[cfg(not(target_feature = "avx2"))]
            {
                let shift = |h: __m128i| _mm_sll_epi64(h, count);
                Self(split_halves!(shift, self.0))
            }
        }
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        unsafe {
            let count = _mm_cvtsi32_si128(n as i32);
            #[cfg(target_feature = "avx2")]
            {
                Self(_mm256_srl_epi64(self.0, count))
            }
            #[cfg(not(target_feature = "avx2"))]
            {
                let shift = |h: __m128i| _mm_srl_epi64(h, count);
                Self(split_halves!(shift, self.0))
            }
        }
    }

    // No 64-bit arithmetic shift below AVX-512
    #[inline(always)]
    fn shr_arith(self, n: u32) -> Self {
        let mut lanes = [0i64; 4];
        self.store(&mut lanes);
        let n = n.min(63);
        Self::load(&lanes.map(|v| v >> n))
    }
}

// ============================================================================
// Float registers
// ============================================================================

/// Eight `f32` lanes
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct Packet8f(pub __m256);

/// Four `f64` lanes
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct Packet4d(pub __m256d);

impl Packet for Packet8f {
    type Scalar = f32;
    type Int = Packet8i;
    const LANES: usize = 8;

    #[inline(always)]
    fn splat(v: f32) -> Self {
        unsafe { Self(_mm256_set1_ps(v)) }
    }

    #[inline(always)]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= 8, "load needs 8 lanes, got {}", src.len());
        unsafe { Self(_mm256_loadu_ps(src.as_ptr())) }
    }

    #[inline(always)]
    fn load_or(src: &[f32], fill: f32) -> Self {
        let mut lanes = [fill; 8];
        let n = src.len().min(8);
        lanes[..n].copy_from_slice(&src[..n]);
        Self::load(&lanes)
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= 8, "store needs 8 lanes, got {}", dst.len());
        unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn store_partial(self, dst: &mut [f32]) {
        let mut lanes = [0.0f32; 8];
        self.store(&mut lanes);
        let n = dst.len().min(8);
        dst[..n].copy_from_slice(&lanes[..n]);
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_add_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_sub_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_mul_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_div_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn madd(self, b: Self, c: Self) -> Self {
        unsafe {
            #[cfg(target_feature = "fma")]
            {
                Self(_mm256_fmadd_ps(self.0, b.0, c.0))
            }
            #[cfg(not(target_feature = "fma"))]
            {
                Self(_mm256_add_ps(_mm256_mul_ps(self.0, b.0), c.0))
            }
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Self(_mm256_floor_ps(self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self(_mm256_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn rsqrt_estimate(self) -> Self {
        unsafe { Self(_mm256_rsqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_ps::<_CMP_LT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_and_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_or_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_xor_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_andnot_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn blend(mask: Self, if_true: Self, if_false: Self) -> Self {
        unsafe { Self(_mm256_blendv_ps(if_false.0, if_true.0, mask.0)) }
    }

    #[inline(always)]
    fn to_bits(self) -> Packet8i {
        unsafe { Packet8i(_mm256_castps_si256(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Packet8i) -> Self {
        unsafe { Self(_mm256_castsi256_ps(bits.0)) }
    }

    #[inline(always)]
    fn to_int(self) -> Packet8i {
        unsafe { Packet8i(_mm256_cvtps_epi32(self.0)) }
    }

    #[inline(always)]
    fn from_int(v: Packet8i) -> Self {
        unsafe { Self(_mm256_cvtepi32_ps(v.0)) }
    }
}

impl Packet for Packet4d {
    type Scalar = f64;
    type Int = Packet4l;
    const LANES: usize = 4;

    #[inline(always)]
    fn splat(v: f64) -> Self {
        unsafe { Self(_mm256_set1_pd(v)) }
    }

    #[inline(always)]
    fn load(src: &[f64]) -> Self {
        assert!(src.len() >= 4, "load needs 4 lanes, got {}", src.len());
        unsafe { Self(_mm256_loadu_pd(src.as_ptr())) }
    }

    #[inline(always)]
    fn load_or(src: &[f64], fill: f64) -> Self {
        let mut lanes = [fill; 4];
        let n = src.len().min(4);
        lanes[..n].copy_from_slice(&src[..n]);
        Self::load(&lanes)
    }

    #[inline(always)]
    fn store(self, dst: &mut [f64]) {
        assert!(dst.len() >= 4, "store needs 4 lanes, got {}", dst.len());
        unsafe { _mm256_storeu_pd(dst.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn store_partial(self, dst: &mut [f64]) {
        let mut lanes = [0.0f64; 4];
        self.store(&mut lanes);
        let n = dst.len().min(4);
        dst[..n].copy_from_slice(&lanes[..n]);
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_add_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_sub_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_mul_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_div_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn madd(self, b: Self, c: Self) -> Self {
        unsafe {
            #[cfg(target_feature = "fma")]
            {
                Self(_mm256_fmadd_pd(self.0, b.0, c.0))
            }
            #[cfg(not(target_feature = "fma"))]
            {
                Self(_mm256_add_pd(_mm256_mul_pd(self.0, b.0), c.0))
            }
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_min_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_max_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Self(_mm256_floor_pd(self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self(_mm256_sqrt_pd(self.0)) }
    }

    // No packed-double estimate before AVX-512; the exact value is a valid one
    #[inline(always)]
    fn rsqrt_estimate(self) -> Self {
        unsafe { Self(_mm256_div_pd(_mm256_set1_pd(1.0), _mm256_sqrt_pd(self.0))) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_pd::<_CMP_LT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_pd::<_CMP_LE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_pd::<_CMP_GT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_pd::<_CMP_GE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_cmp_pd::<_CMP_EQ_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_and_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_or_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_xor_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_andnot_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn blend(mask: Self, if_true: Self, if_false: Self) -> Self {
        unsafe { Self(_mm256_blendv_pd(if_false.0, if_true.0, mask.0)) }
    }

    #[inline(always)]
    fn to_bits(self) -> Packet4l {
        unsafe { Packet4l(_mm256_castpd_si256(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Packet4l) -> Self {
        unsafe { Self(_mm256_castsi256_pd(bits.0)) }
    }

    #[inline(always)]
    fn to_int(self) -> Packet4l {
        let mut lanes = [0.0f64; 4];
        self.store(&mut lanes);
        Packet4l::load(&lanes.map(|v| v.round_ties_even() as i64))
    }

    #[inline(always)]
    fn from_int(v: Packet4l) -> Self {
        let mut lanes = [0i64; 4];
        v.store(&mut lanes);
        Self::load(&lanes.map(|l| l as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::portable::{F32x, F64x, I32x};

    fn lanes8(p: Packet8f) -> [f32; 8] {
        let mut out = [0.0f32; 8];
        p.store(&mut out);
        out
    }

    #[test]
    fn test_shift_matches_portable() {
        let src = [1, -1, 0x1234_5678, i32::MAX, 0, 7, -300, 1 << 30];
        for n in [0u32, 1, 5, 23, 31, 32] {
            let mut avx = [0i32; 8];
            Packet8i::load(&src).shl(n).store(&mut avx);
            assert_eq!(avx, I32x(src).shl(n).0, "shl by {}", n);

            Packet8i::load(&src).shr(n).store(&mut avx);
            assert_eq!(avx, I32x(src).shr(n).0, "shr by {}", n);

            Packet8i::load(&src).shr_arith(n).store(&mut avx);
            assert_eq!(avx, I32x(src).shr_arith(n).0, "shr_arith by {}", n);
        }
    }

    #[test]
    fn test_float_ops_match_portable() {
        let a = [1.5f32, -2.25, 0.0, 3.0e10, -1.0e-3, 7.0, f32::INFINITY, 0.5];
        let b = [2.0f32, 2.0, -0.0, 1.0, 4.0, 7.0, 1.0, -0.5];
        let (pa, pb) = (Packet8f::load(&a), Packet8f::load(&b));
        let (qa, qb) = (F32x::from(a), F32x::from(b));

        assert_eq!(lanes8(pa.mul(pb)), qa.mul(qb).to_array());
        assert_eq!(lanes8(pa.sub(pb)), qa.sub(qb).to_array());
        assert_eq!(lanes8(pa.floor()), qa.floor().to_array());
        assert_eq!(lanes8(pa.abs()), qa.abs().to_array());

        let m = lanes8(pa.cmp_gt(pb));
        let q = qa.cmp_gt(qb).to_array();
        for (x, y) in m.iter().zip(q.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_f64_int_conversions() {
        let p = Packet4d::load(&[3.0, -4.0, 1.0e12, 0.0]);
        let mut ints = [0i64; 4];
        p.to_int().store(&mut ints);
        assert_eq!(ints, F64x::from([3.0, -4.0, 1.0e12, 0.0]).to_int().0);

        let back = Packet4d::from_int(Packet4l::splat(-17));
        let mut out = [0.0f64; 4];
        back.store(&mut out);
        assert_eq!(out, [-17.0; 4]);
    }
}
