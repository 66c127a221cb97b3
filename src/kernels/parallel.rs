//! Rayon-parallel slice kernels

use rayon::prelude::*;

use super::{UnaryOp, map_packets};
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::packet::{NativeF32, NativeF64, Packet};

/// Elements per parallel task; a multiple of every packet width
pub const PARALLEL_CHUNK: usize = 4096;

/// Parallel [`unary`](super::unary) over rayon's global pool
///
/// Slices shorter than one chunk run serially on the calling thread.
pub fn par_unary<P: Packet>(
    op: UnaryOp,
    input: &[P::Scalar],
    out: &mut [P::Scalar],
) -> Result<()> {
    if input.len() != out.len() {
        return Err(Error::length_mismatch(input.len(), out.len()));
    }
    if input.len() < PARALLEL_CHUNK {
        return super::unary::<P>(op, input, out);
    }

    log::trace!(
        "par_unary {} on {} x {} in {} chunks",
        op,
        input.len(),
        P::Scalar::DTYPE,
        input.len().div_ceil(PARALLEL_CHUNK)
    );

    let f = op.packet_fn::<P>();
    out.par_chunks_mut(PARALLEL_CHUNK)
        .zip(input.par_chunks(PARALLEL_CHUNK))
        .for_each(|(dst, src)| map_packets(src, dst, f));
    Ok(())
}

/// Parallel f32 kernel using the native packet
///
/// # Errors
/// [`Error::LengthMismatch`] if `input` and `out` differ in length.
#[inline]
pub fn par_unary_f32(op: UnaryOp, input: &[f32], out: &mut [f32]) -> Result<()> {
    par_unary::<NativeF32>(op, input, out)
}

/// Parallel f64 kernel using the native packet
///
/// # Errors
/// [`Error::LengthMismatch`] if `input` and `out` differ in length.
#[inline]
pub fn par_unary_f64(op: UnaryOp, input: &[f64], out: &mut [f64]) -> Result<()> {
    par_unary::<NativeF64>(op, input, out)
}
