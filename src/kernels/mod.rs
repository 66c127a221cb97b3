//! Slice kernels over the packet evaluators
//!
//! These are the entry points a tensor runtime calls: one function per lane
//! type that maps a [`UnaryOp`] over a slice. Full packets are loaded
//! straight from the slice; the tail is loaded into a packet padded with
//! `1.0` and only the live lanes are written back. Every element goes
//! through the same packet evaluator, so slice results are bit-identical to
//! calling the evaluator on a packet directly.
//!
//! # Parallelism
//!
//! With the `rayon` feature (default), [`par_unary_f32`] and
//! [`par_unary_f64`] split the slice into [`PARALLEL_CHUNK`]-element chunks
//! and run the serial kernel on each one. The chunk size is a multiple of
//! every packet width, so chunk boundaries never split a packet and the
//! parallel result matches the serial one bit for bit.

#[cfg(feature = "rayon")]
mod parallel;

#[cfg(feature = "rayon")]
pub use parallel::{PARALLEL_CHUNK, par_unary, par_unary_f32, par_unary_f64};

use std::fmt;

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::math::{pexp, plog, prsqrt, psin, psqrt, ptanh};
use crate::packet::{NativeF32, NativeF64, Packet, SimdLevel};

/// Element-wise function applied by the slice kernels
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Sine
    Sin,
    /// Natural exponential
    Exp,
    /// Natural logarithm
    Log,
    /// Hyperbolic tangent
    Tanh,
    /// Square root (fast or exact per build)
    Sqrt,
    /// Reciprocal square root (fast or exact per build)
    Rsqrt,
}

impl UnaryOp {
    /// Every operation, in declaration order
    pub const ALL: [UnaryOp; 6] = [
        UnaryOp::Sin,
        UnaryOp::Exp,
        UnaryOp::Log,
        UnaryOp::Tanh,
        UnaryOp::Sqrt,
        UnaryOp::Rsqrt,
    ];

    /// Short lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Tanh => "tanh",
            Self::Sqrt => "sqrt",
            Self::Rsqrt => "rsqrt",
        }
    }

    /// Apply this operation to one packet
    #[inline]
    pub fn apply<P: Packet>(self, x: P) -> P {
        self.packet_fn::<P>()(x)
    }

    /// The packet evaluator for this operation
    #[inline]
    pub fn packet_fn<P: Packet>(self) -> fn(P) -> P {
        match self {
            Self::Sin => psin::<P>,
            Self::Exp => pexp::<P>,
            Self::Log => plog::<P>,
            Self::Tanh => ptanh::<P>,
            Self::Sqrt => psqrt::<P>,
            Self::Rsqrt => prsqrt::<P>,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply `op` to every element of `input`, writing into `out`
///
/// Works for any packet type; [`unary_f32`] and [`unary_f64`] pick the
/// native one.
pub fn unary<P: Packet>(op: UnaryOp, input: &[P::Scalar], out: &mut [P::Scalar]) -> Result<()> {
    if input.len() != out.len() {
        return Err(Error::length_mismatch(input.len(), out.len()));
    }

    log::trace!(
        "unary {} on {} x {} ({} lanes, {})",
        op,
        input.len(),
        P::Scalar::DTYPE,
        P::LANES,
        SimdLevel::compiled()
    );

    map_packets(input, out, op.packet_fn::<P>());
    Ok(())
}

/// Apply `op` to every element of `data` in place
pub fn unary_inplace<P: Packet>(op: UnaryOp, data: &mut [P::Scalar]) {
    log::trace!(
        "unary {} in place on {} x {}",
        op,
        data.len(),
        P::Scalar::DTYPE
    );

    map_packets_inplace(data, op.packet_fn::<P>());
}

/// Apply `op` to an f32 slice using the native packet
///
/// # Errors
/// [`Error::LengthMismatch`] if `input` and `out` differ in length.
#[inline]
pub fn unary_f32(op: UnaryOp, input: &[f32], out: &mut [f32]) -> Result<()> {
    unary::<NativeF32>(op, input, out)
}

/// Apply `op` to an f64 slice using the native packet
///
/// # Errors
/// [`Error::LengthMismatch`] if `input` and `out` differ in length.
#[inline]
pub fn unary_f64(op: UnaryOp, input: &[f64], out: &mut [f64]) -> Result<()> {
    unary::<NativeF64>(op, input, out)
}

/// Apply `op` to an f32 slice in place using the native packet
#[inline]
pub fn unary_inplace_f32(op: UnaryOp, data: &mut [f32]) {
    unary_inplace::<NativeF32>(op, data)
}

/// Apply `op` to an f64 slice in place using the native packet
#[inline]
pub fn unary_inplace_f64(op: UnaryOp, data: &mut [f64]) {
    unary_inplace::<NativeF64>(op, data)
}

/// Pad value for tail lanes; every evaluator accepts it
#[inline(always)]
fn pad<T: Element>() -> T {
    T::one()
}

/// Run `f` over `input` one packet at a time, writing into `out`
///
/// Lengths must already match.
#[inline]
pub(crate) fn map_packets<P: Packet>(
    input: &[P::Scalar],
    out: &mut [P::Scalar],
    f: fn(P) -> P,
) {
    debug_assert_eq!(input.len(), out.len());

    let mut in_chunks = input.chunks_exact(P::LANES);
    let mut out_chunks = out.chunks_exact_mut(P::LANES);
    for (src, dst) in (&mut in_chunks).zip(&mut out_chunks) {
        f(P::load(src)).store(dst);
    }

    let tail = in_chunks.remainder();
    if !tail.is_empty() {
        f(P::load_or(tail, pad())).store_partial(out_chunks.into_remainder());
    }
}

#[inline]
fn map_packets_inplace<P: Packet>(data: &mut [P::Scalar], f: fn(P) -> P) {
    let mut chunks = data.chunks_exact_mut(P::LANES);
    for chunk in &mut chunks {
        f(P::load(chunk)).store(chunk);
    }

    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        f(P::load_or(tail, pad())).store_partial(tail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::portable::F32x;

    #[test]
    fn test_length_mismatch() {
        let input = [1.0f32; 10];
        let mut out = [0.0f32; 9];
        let err = unary_f32(UnaryOp::Sin, &input, &mut out).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { input: 10, output: 9 });
    }

    #[test]
    fn test_empty_slices() {
        let mut out: [f64; 0] = [];
        unary_f64(UnaryOp::Log, &[], &mut out).unwrap();
        unary_inplace_f64(UnaryOp::Log, &mut out);
    }

    #[test]
    fn test_tail_matches_full_packet() {
        // 8 lanes of one packet vs 8 + 3 split into body and tail
        let input: Vec<f32> = (0..11).map(|i| i as f32 * 0.37 - 1.5).collect();
        for op in UnaryOp::ALL {
            let mut out = vec![f32::NAN; input.len()];
            unary::<F32x<8>>(op, &input, &mut out).unwrap();

            for (i, &x) in input.iter().enumerate() {
                let want = op.apply(F32x::<8>::splat(x)).to_array()[0];
                let got = out[i];
                assert!(
                    got.to_bits() == want.to_bits() || (got.is_nan() && want.is_nan()),
                    "{} at {}: {} vs {}",
                    op,
                    i,
                    got,
                    want
                );
            }
        }
    }

    #[test]
    fn test_tail_does_not_touch_extra_output() {
        let input = [0.5f32; 3];
        let mut out = [7.0f32; 3];
        unary::<F32x<8>>(UnaryOp::Exp, &input, &mut out).unwrap();
        for v in out {
            assert!((v - 0.5f32.exp()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_inplace_matches_out_of_place() {
        let input: Vec<f64> = (1..=37).map(|i| i as f64 * 0.25).collect();
        for op in UnaryOp::ALL {
            let mut out = vec![0.0; input.len()];
            unary_f64(op, &input, &mut out).unwrap();
            let mut data = input.clone();
            unary_inplace_f64(op, &mut data);
            assert_eq!(data, out, "{}", op);
        }
    }

    #[test]
    fn test_op_names() {
        let names: Vec<String> = UnaryOp::ALL.iter().map(|op| op.to_string()).collect();
        assert_eq!(names, ["sin", "exp", "log", "tanh", "sqrt", "rsqrt"]);
    }
}
