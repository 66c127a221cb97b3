//! Element trait for mapping lane types to their bit layout and constant tables

use super::DType;
use crate::math::common::{
    ExpTable, LogTable, TanhTable, TrigTable, exp_coefficients, log_coefficients,
    tanh_coefficients, trig_coefficients,
};
use crate::math::sqrt::{prsqrt_exact, prsqrt_fast, psqrt_exact, psqrt_fast};
use crate::packet::Packet;
use bytemuck::{Pod, Zeroable};
use num_traits::{Float, PrimInt};
use std::fmt::Debug;

/// Trait for floating-point lane types
///
/// The evaluators in [`crate::math`] are generic over the packet type; this
/// trait is where they find the width-specific pieces: the IEEE 754 bit
/// layout, the per-function constant tables and the build-time choice of
/// sqrt implementation. The choice is static: `sqrt_packet` and
/// `rsqrt_packet` are resolved per lane type, so f64 packets never see the
/// f32-only fast path.
///
/// # Bounds
/// - `Float` - Scalar IEEE operations and special values (num-traits)
/// - `Pod + Zeroable` - Safe bit reinterpretation (bytemuck)
pub trait Element: Float + Pod + Zeroable + Debug + Send + Sync + 'static {
    /// Signed integer with the same width, used for integer lanes
    type Bits: PrimInt + Pod + Debug + Send + Sync + 'static;

    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Number of explicitly stored mantissa bits
    const MANTISSA_BITS: u32;

    /// Exponent bias
    const EXP_BIAS: Self::Bits;

    /// Mask selecting the mantissa field
    const MANTISSA_MASK: Self::Bits;

    /// Whether `sqrt`/`rsqrt` use the estimate-plus-Newton path
    const FAST_SQRT: bool;

    /// Range reduction and polynomial constants for sine
    const TRIG: TrigTable<Self>;

    /// Constants for the exponential
    const EXP: ExpTable<Self>;

    /// Constants for the natural logarithm
    const LOG: LogTable<Self>;

    /// Rational approximation constants for tanh
    const TANH: TanhTable<Self>;

    /// Convert from f64 to this type
    fn from_f64(v: f64) -> Self;

    /// Square root of a packet of this lane type, fast or exact per build
    fn sqrt_packet<P: Packet<Scalar = Self>>(x: P) -> P;

    /// Reciprocal square root of a packet of this lane type, fast or exact per build
    fn rsqrt_packet<P: Packet<Scalar = Self>>(x: P) -> P;
}

impl Element for f32 {
    type Bits = i32;

    const DTYPE: DType = DType::F32;
    const MANTISSA_BITS: u32 = 23;
    const EXP_BIAS: i32 = 127;
    const MANTISSA_MASK: i32 = 0x007F_FFFF;
    const FAST_SQRT: bool = cfg!(feature = "fast-math");

    const TRIG: TrigTable<f32> = trig_coefficients::TABLE_F32;
    const EXP: ExpTable<f32> = exp_coefficients::TABLE_F32;
    const LOG: LogTable<f32> = log_coefficients::TABLE_F32;
    const TANH: TanhTable<f32> = tanh_coefficients::TABLE_F32;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline(always)]
    fn sqrt_packet<P: Packet<Scalar = f32>>(x: P) -> P {
        if Self::FAST_SQRT {
            psqrt_fast(x)
        } else {
            psqrt_exact(x)
        }
    }

    #[inline(always)]
    fn rsqrt_packet<P: Packet<Scalar = f32>>(x: P) -> P {
        if Self::FAST_SQRT {
            prsqrt_fast(x)
        } else {
            prsqrt_exact(x)
        }
    }
}

impl Element for f64 {
    type Bits = i64;

    const DTYPE: DType = DType::F64;
    const MANTISSA_BITS: u32 = 52;
    const EXP_BIAS: i64 = 1023;
    const MANTISSA_MASK: i64 = 0x000F_FFFF_FFFF_FFFF;
    // One Newton step on a 12-bit estimate cannot reach f64 precision
    const FAST_SQRT: bool = false;

    const TRIG: TrigTable<f64> = trig_coefficients::TABLE_F64;
    const EXP: ExpTable<f64> = exp_coefficients::TABLE_F64;
    const LOG: LogTable<f64> = log_coefficients::TABLE_F64;
    const TANH: TanhTable<f64> = tanh_coefficients::TABLE_F64;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline(always)]
    fn sqrt_packet<P: Packet<Scalar = f64>>(x: P) -> P {
        psqrt_exact(x)
    }

    #[inline(always)]
    fn rsqrt_packet<P: Packet<Scalar = f64>>(x: P) -> P {
        prsqrt_exact(x)
    }
}
