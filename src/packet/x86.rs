//! 256-bit integer-lane shifts for x86-64
//!
//! Compiled on every x86-64 build and gated per function with
//! `#[target_feature]`, so both paths exist whatever the build flags are.
//! The AVX packets call the one their build enables; the tests run both
//! against the portable packets on any host that supports them.

use std::arch::x86_64::*;

/// Left-shift every 32-bit lane by `n` with one AVX2 `vpslld`
///
/// Counts of 32 or more clear the lane.
///
/// # Safety
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn sll_epi32_avx2(v: __m256i, n: u32) -> __m256i {
    _mm256_sll_epi32(v, _mm_cvtsi32_si128(n as i32))
}

/// Left-shift every 32-bit lane by `n` using only AVX
///
/// AVX has no 256-bit integer shift, so each 128-bit half is shifted with
/// the SSE2 instruction and the halves are reassembled. A left shift of a
/// 32-bit lane never crosses the half boundary. Counts of 32 or more clear
/// the lane.
///
/// # Safety
/// The CPU must support AVX.
#[target_feature(enable = "avx")]
#[inline]
pub unsafe fn sll_epi32_split(v: __m256i, n: u32) -> __m256i {
    let count = _mm_cvtsi32_si128(n as i32);
    let lo = _mm_sll_epi32(_mm256_castsi256_si128(v), count);
    let hi = _mm_sll_epi32(_mm256_extractf128_si256::<1>(v), count);
    _mm256_insertf128_si256::<1>(_mm256_castsi128_si256(lo), hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::IntPacket;
    use crate::packet::portable::I32x;

    const SRC: [i32; 8] = [1, -1, 0x1234_5678, i32::MAX, 0, 7, -300, 1 << 30];
    const COUNTS: [u32; 7] = [0, 1, 5, 16, 23, 31, 32];

    fn has_avx() -> bool {
        is_x86_feature_detected!("avx")
    }

    fn has_avx2() -> bool {
        is_x86_feature_detected!("avx2")
    }

    #[target_feature(enable = "avx")]
    unsafe fn shift_lanes(f: unsafe fn(__m256i, u32) -> __m256i, n: u32) -> [i32; 8] {
        let v = _mm256_loadu_si256(SRC.as_ptr() as *const __m256i);
        let mut out = [0i32; 8];
        _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, f(v, n));
        out
    }

    #[test]
    fn test_split_shift_matches_portable() {
        if !has_avx() {
            return;
        }

        for n in COUNTS {
            let got = unsafe { shift_lanes(sll_epi32_split, n) };
            assert_eq!(got, I32x(SRC).shl(n).0, "shl by {}", n);
        }
    }

    #[test]
    fn test_split_shift_zero_is_identity() {
        if !has_avx() {
            return;
        }

        assert_eq!(unsafe { shift_lanes(sll_epi32_split, 0) }, SRC);
    }

    #[test]
    fn test_split_shift_keeps_halves_apart() {
        if !has_avx() {
            return;
        }

        // The top bit of lane 3 must not leak into lane 4
        let got = unsafe { shift_lanes(sll_epi32_split, 1) };
        assert_eq!(got[3], i32::MAX << 1);
        assert_eq!(got[4], 0);
    }

    #[test]
    fn test_avx2_shift_matches_split() {
        if !has_avx2() {
            return;
        }

        for n in COUNTS {
            let wide = unsafe { shift_lanes(sll_epi32_avx2, n) };
            let split = unsafe { shift_lanes(sll_epi32_split, n) };
            assert_eq!(wide, split, "shl by {}", n);
        }
    }
}
