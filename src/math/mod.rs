//! Packet evaluators for elementary functions
//!
//! Each entry point takes one packet and returns one packet, applying the
//! function to every lane with no per-lane branching. All of them are
//! generic over [`Packet`](crate::packet::Packet), so the same code runs on
//! the portable and AVX backends and on both lane widths.
//!
//! # Supported Functions
//!
//! | Function | f32 | f64 | Algorithm |
//! |----------|-----|-----|-----------|
//! | `psin`   | ✓   | ✓   | Three-part π reduction + odd/even interpolants |
//! | `pexp`   | ✓   | ✓   | Cody-Waite ln2 reduction + polynomial + 2^m |
//! | `plog`   | ✓   | ✓   | Exponent split + atanh series |
//! | `ptanh`  | ✓   | ✓   | 13/6 rational approximation |
//! | `psqrt`  | ✓   | ✓   | Exact, or estimate + Newton (f32, `fast-math`) |
//! | `prsqrt` | ✓   | ✓   | Exact division, or estimate + Newton (f32, `fast-math`) |
//!
//! # Module Structure
//!
//! ```text
//! math/
//! ├── mod.rs      # This file: entry points
//! ├── common.rs   # Constant tables
//! ├── range.rs    # Range reduction for sine
//! ├── poly.rs     # Horner chains
//! ├── select.rs   # Mask-based selection and sign flips
//! ├── shift.rs    # Integer-lane shifts, parity masks, 2^n
//! ├── trig.rs     # psin
//! ├── exp_log.rs  # pexp, plog, ptanh
//! └── sqrt.rs     # psqrt, prsqrt and their fixed variants
//! ```
//!
//! # Determinism
//!
//! Every evaluator is a fixed sequence of lane-wise operations. The same
//! input bits give the same output bits on a given backend. Results can
//! differ between backends only where `madd` is fused on one and not the
//! other, or through the hardware `rsqrt` estimate.

pub mod common;
pub mod exp_log;
pub mod poly;
pub mod range;
pub mod select;
pub mod shift;
pub mod sqrt;
pub mod trig;

pub use exp_log::{pexp, plog, ptanh};
pub use sqrt::{prsqrt, prsqrt_exact, prsqrt_fast, psqrt, psqrt_exact, psqrt_fast};
pub use trig::psin;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::portable::{F32x, F64x};
    use crate::packet::{NativeF32, NativeF64, Packet};

    #[test]
    fn test_native_matches_portable_f32() {
        let input = [-7.5f32, -1.0, -0.1, 0.0, 0.3, 1.7, 4.0, 55.0];
        let native = NativeF32::load(&input);
        let portable = F32x::<8>::from(input);

        let pairs: [(fn(NativeF32) -> NativeF32, fn(F32x<8>) -> F32x<8>); 4] = [
            (psin, psin),
            (pexp, pexp),
            (ptanh, ptanh),
            (psqrt_exact, psqrt_exact),
        ];
        for (f_native, f_portable) in pairs {
            let mut got = [0.0f32; 8];
            f_native(native).store(&mut got);
            let want = f_portable(portable).to_array();
            for i in 0..8 {
                let tol = 4.0 * f32::EPSILON * want[i].abs().max(1.0);
                assert!(
                    (got[i] - want[i]).abs() <= tol || (got[i].is_nan() && want[i].is_nan()),
                    "lane {}: {} vs {}",
                    i,
                    got[i],
                    want[i]
                );
            }
        }
    }

    #[test]
    fn test_native_matches_portable_f64() {
        let input = [0.5f64, 3.0, 700.0, 1.0e-3];
        let native = NativeF64::load(&input);
        let portable = F64x::<4>::from(input);

        let mut got = [0.0f64; 4];
        plog(native).store(&mut got);
        let want = plog(portable).to_array();
        for i in 0..4 {
            assert!((got[i] - want[i]).abs() <= 4.0 * f64::EPSILON * want[i].abs().max(1.0));
        }
    }
}
