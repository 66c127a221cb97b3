//! # packmath
//!
//! **Branch-free vector evaluators for sin, exp, log, tanh, sqrt and rsqrt.**
//!
//! packmath evaluates elementary functions on whole vector registers at a
//! time. Every lane runs the same instruction sequence: range reduction,
//! a polynomial or rational approximation, then mask-based selection for
//! interval stitching and special values. Nothing branches on lane data.
//!
//! ## Layers
//!
//! - **Packets** ([`packet`]): the vector register abstraction, with a
//!   portable `[T; N]` backend and an AVX backend chosen at build time
//! - **Evaluators** ([`math`]): `psin`, `pexp`, `plog`, `ptanh`, `psqrt`,
//!   `prsqrt`, written once and generic over the packet type
//! - **Slice kernels** ([`kernels`]): map a [`UnaryOp`](kernels::UnaryOp)
//!   over `f32`/`f64` slices, optionally in parallel with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use packmath::prelude::*;
//!
//! let x = [0.0f32, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];
//! let mut y = [0.0f32; 9];
//! unary_f32(UnaryOp::Sin, &x, &mut y)?;
//! assert!((y[2] - 1.0f32.sin()).abs() < 1e-6);
//!
//! let p = NativeF64::splat(2.0);
//! let mut lanes = [0.0f64; 4];
//! psqrt(p).store(&mut lanes);
//! assert_eq!(lanes[0], 2.0f64.sqrt());
//! # Ok::<(), packmath::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): parallel slice kernels
//! - `fast-math`: f32 `sqrt`/`rsqrt` use the hardware estimate plus one
//!   Newton step instead of the exact instruction
//!
//! The packet backend follows the target features of the build. Compile
//! with `-C target-cpu=native` (or `-C target-feature=+avx,+avx2,+fma`) to
//! get the AVX packets. `cargo test-avx` and `cargo test-avx2` run the test
//! suite against the AVX backend without and with AVX2+FMA.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod kernels;
pub mod math;
pub mod packet;

/// Whether the crate was built with the `fast-math` feature
pub const FAST_MATH: bool = cfg!(feature = "fast-math");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::kernels::{
        UnaryOp, unary, unary_f32, unary_f64, unary_inplace, unary_inplace_f32, unary_inplace_f64,
    };
    pub use crate::math::{pexp, plog, prsqrt, psin, psqrt, ptanh};
    pub use crate::packet::{IntPacket, NativeF32, NativeF64, Packet, SimdLevel, detect_simd};

    #[cfg(feature = "rayon")]
    pub use crate::kernels::{par_unary, par_unary_f32, par_unary_f64};
}
