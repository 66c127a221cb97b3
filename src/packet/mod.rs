//! Vector registers and their lane-wise primitives
//!
//! Every evaluator in [`crate::math`] is written once against the [`Packet`]
//! and [`IntPacket`] traits. A backend supplies the primitives; the
//! evaluators never look at individual lanes.
//!
//! # Module Structure
//!
//! ```text
//! packet/
//! ├── mod.rs       # This file: traits, SIMD level reporting, native aliases
//! ├── portable.rs  # [T; N] packets, any lane count, every target
//! ├── x86.rs       # 256-bit integer shifts, AVX2 and split AVX paths
//! └── avx.rs       # __m256 / __m256d packets (build enables AVX)
//! ```
//!
//! # Backend Selection
//!
//! | Build flags | `NativeF32` | `NativeF64` | Integer shifts |
//! |-------------|-------------|-------------|----------------|
//! | `+avx,+avx2,+fma` | `Packet8f` | `Packet4d` | native 256-bit |
//! | `+avx` | `Packet8f` | `Packet4d` | two 128-bit halves |
//! | otherwise | `F32x<8>` | `F64x<4>` | per lane |
//!
//! The backend is fixed at build time. [`detect_simd`] only reports what the
//! host could run, so a caller can tell when a rebuild with
//! `-C target-cpu=native` would pick a wider backend.
//!
//! # Masks
//!
//! Comparisons return a packet of the same type whose lanes are all-ones or
//! all-zeros. Masks are only ever combined with `and`/`or`/`xor`/`andnot` or
//! [`Packet::blend`]; they are never read back as booleans.

pub mod portable;

#[cfg(target_arch = "x86_64")]
pub mod x86;

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub mod avx;

use std::fmt::Debug;
use std::sync::OnceLock;

use num_traits::{PrimInt, Zero};

use crate::dtype::Element;

/// Integer view of a vector register
///
/// Lanes have the same width as the float lanes of the packet they pair
/// with (`i32` for `f32`, `i64` for `f64`). Shifts take a uniform count for
/// all lanes; counts at or above the lane width produce zero for the
/// logical shifts and a sign fill for [`IntPacket::shr_arith`].
pub trait IntPacket: Copy + Debug + Send + Sync + 'static {
    /// Scalar lane type
    type Lane: PrimInt + Debug + Send + Sync + 'static;

    /// Number of lanes
    const LANES: usize;

    /// Width of a lane in bits
    const LANE_BITS: u32;

    /// Broadcast one value to every lane
    fn splat(v: Self::Lane) -> Self;

    /// Load the first `LANES` values of `src`
    ///
    /// # Panics
    /// Panics if `src.len() < LANES`.
    fn load(src: &[Self::Lane]) -> Self;

    /// Store all lanes into the first `LANES` slots of `dst`
    ///
    /// # Panics
    /// Panics if `dst.len() < LANES`.
    fn store(self, dst: &mut [Self::Lane]);

    /// Wrapping lane-wise addition
    fn add(self, rhs: Self) -> Self;

    /// Wrapping lane-wise subtraction
    fn sub(self, rhs: Self) -> Self;

    /// Bitwise AND
    fn and(self, rhs: Self) -> Self;

    /// Bitwise OR
    fn or(self, rhs: Self) -> Self;

    /// Logical left shift of every lane by `n`
    fn shl(self, n: u32) -> Self;

    /// Logical right shift of every lane by `n`
    fn shr(self, n: u32) -> Self;

    /// Arithmetic (sign-filling) right shift of every lane by `n`
    fn shr_arith(self, n: u32) -> Self;
}

/// Floating-point vector register
///
/// A `Packet` is an immutable value; every operation returns a new register.
/// The operations are exactly the primitives the evaluators need, and every
/// one of them is lane-wise with no cross-lane data movement.
pub trait Packet: Copy + Debug + Send + Sync + 'static {
    /// Scalar lane type
    type Scalar: Element;

    /// Integer register with the same lane count and width
    type Int: IntPacket<Lane = <Self::Scalar as Element>::Bits>;

    /// Number of lanes
    const LANES: usize;

    /// Broadcast one value to every lane
    fn splat(v: Self::Scalar) -> Self;

    /// Load the first `LANES` values of `src`
    ///
    /// # Panics
    /// Panics if `src.len() < LANES`.
    fn load(src: &[Self::Scalar]) -> Self;

    /// Load up to `LANES` values of `src`, filling missing lanes with `fill`
    fn load_or(src: &[Self::Scalar], fill: Self::Scalar) -> Self;

    /// Store all lanes into the first `LANES` slots of `dst`
    ///
    /// # Panics
    /// Panics if `dst.len() < LANES`.
    fn store(self, dst: &mut [Self::Scalar]);

    /// Store the first `min(LANES, dst.len())` lanes into `dst`
    fn store_partial(self, dst: &mut [Self::Scalar]);

    /// Lane-wise `self + rhs`
    fn add(self, rhs: Self) -> Self;

    /// Lane-wise `self - rhs`
    fn sub(self, rhs: Self) -> Self;

    /// Lane-wise `self * rhs`
    fn mul(self, rhs: Self) -> Self;

    /// Lane-wise `self / rhs`
    fn div(self, rhs: Self) -> Self;

    /// Lane-wise `self * b + c`, fused when the backend has FMA
    fn madd(self, b: Self, c: Self) -> Self;

    /// Lane-wise minimum; returns `rhs` when either lane is NaN
    fn min(self, rhs: Self) -> Self;

    /// Lane-wise maximum; returns `rhs` when either lane is NaN
    fn max(self, rhs: Self) -> Self;

    /// Lane-wise round toward negative infinity
    fn floor(self) -> Self;

    /// Lane-wise correctly rounded square root
    fn sqrt(self) -> Self;

    /// Hardware-grade estimate of `1 / sqrt(self)`
    ///
    /// Relative error is bounded by roughly 2⁻¹¹. Returns `±inf` for `±0`,
    /// NaN for negative lanes and `0` for `+inf`.
    fn rsqrt_estimate(self) -> Self;

    /// Mask of lanes where `self < rhs` (ordered, quiet)
    fn cmp_lt(self, rhs: Self) -> Self;

    /// Mask of lanes where `self <= rhs` (ordered, quiet)
    fn cmp_le(self, rhs: Self) -> Self;

    /// Mask of lanes where `self > rhs` (ordered, quiet)
    fn cmp_gt(self, rhs: Self) -> Self;

    /// Mask of lanes where `self >= rhs` (ordered, quiet)
    fn cmp_ge(self, rhs: Self) -> Self;

    /// Mask of lanes where `self == rhs` (ordered, quiet)
    fn cmp_eq(self, rhs: Self) -> Self;

    /// Bitwise AND
    fn and(self, rhs: Self) -> Self;

    /// Bitwise OR
    fn or(self, rhs: Self) -> Self;

    /// Bitwise XOR
    fn xor(self, rhs: Self) -> Self;

    /// Bitwise `!self & rhs`
    fn andnot(self, rhs: Self) -> Self;

    /// Per lane, `if_true` where `mask` is set and `if_false` elsewhere
    fn blend(mask: Self, if_true: Self, if_false: Self) -> Self;

    /// Reinterpret the lane bits as integers
    fn to_bits(self) -> Self::Int;

    /// Reinterpret integer lane bits as floats
    fn from_bits(bits: Self::Int) -> Self;

    /// Convert integral-valued lanes to integers (round to nearest)
    fn to_int(self) -> Self::Int;

    /// Convert integer lanes to floats
    fn from_int(v: Self::Int) -> Self;

    /// Broadcast an `f64` literal converted to the lane type
    #[inline]
    fn constant(v: f64) -> Self {
        Self::splat(Self::Scalar::from_f64(v))
    }

    /// All lanes zero
    #[inline]
    fn zero() -> Self {
        Self::splat(Self::Scalar::zero())
    }

    /// Lane-wise absolute value (clears the sign bit)
    #[inline]
    fn abs(self) -> Self {
        Self::splat(-Self::Scalar::zero()).andnot(self)
    }

    /// Mask of lanes that are not NaN
    #[inline]
    fn is_ordered(self) -> Self {
        self.cmp_eq(self)
    }
}

/// Widest `f32` packet the build enables
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub type NativeF32 = avx::Packet8f;

/// Widest `f64` packet the build enables
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub type NativeF64 = avx::Packet4d;

/// Widest `f32` packet the build enables
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub type NativeF32 = portable::F32x<8>;

/// Widest `f64` packet the build enables
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub type NativeF64 = portable::F64x<4>;

/// SIMD capability level
///
/// Higher values indicate wider or more complete instruction sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdLevel {
    /// AVX2 with FMA: native 256-bit integer shifts and fused multiply-add
    Avx2Fma = 2,
    /// AVX: 256-bit float ops, integer ops split into 128-bit halves
    Avx = 1,
    /// Portable lane-by-lane backend
    Portable = 0,
}

impl SimdLevel {
    /// Level the packet backend was compiled for
    #[inline]
    pub const fn compiled() -> Self {
        if cfg!(all(
            target_arch = "x86_64",
            target_feature = "avx2",
            target_feature = "fma"
        )) {
            Self::Avx2Fma
        } else if cfg!(all(target_arch = "x86_64", target_feature = "avx")) {
            Self::Avx
        } else {
            Self::Portable
        }
    }

    /// Returns true if this level uses the x86-64 AVX backend
    #[inline]
    pub const fn is_x86(self) -> bool {
        matches!(self, Self::Avx2Fma | Self::Avx)
    }

    /// Returns true if integer lanes shift with a single 256-bit instruction
    #[inline]
    pub const fn has_wide_int_shift(self) -> bool {
        matches!(self, Self::Avx2Fma)
    }

    /// Returns the number of f32 elements per native packet
    #[inline]
    pub const fn f32_lanes(self) -> usize {
        8
    }

    /// Returns the number of f64 elements per native packet
    #[inline]
    pub const fn f64_lanes(self) -> usize {
        4
    }

    /// Returns the name of this SIMD level as a string
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avx2Fma => "AVX2+FMA",
            Self::Avx => "AVX",
            Self::Portable => "Portable",
        }
    }
}

impl std::fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached host detection
static SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

/// Detect the best SIMD level the host CPU supports
///
/// This is cached; the first call performs detection. It does not change
/// which backend runs, see [`SimdLevel::compiled`].
#[inline]
pub fn detect_simd() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(detect_simd_uncached)
}

#[cold]
fn detect_simd_uncached() -> SimdLevel {
    let host = host_level();
    let compiled = SimdLevel::compiled();
    if host > compiled {
        log::debug!(
            "host supports {} but packets were compiled for {}; rebuild with \
             -C target-cpu=native to use the wider backend",
            host,
            compiled
        );
    } else {
        log::debug!("packet backend: {} (host: {})", compiled, host);
    }
    host
}

fn host_level() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            return SimdLevel::Avx2Fma;
        }
        if is_x86_feature_detected!("avx") {
            return SimdLevel::Avx;
        }
    }

    SimdLevel::Portable
}
