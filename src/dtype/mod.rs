//! Element types for packet lanes
//!
//! Two lane types are supported: `f32` and `f64`. [`DType`] names them at
//! runtime (for logging and errors); [`Element`] carries everything the
//! generic evaluators need to know about a lane type at compile time.

mod element;

pub use element::Element;

use std::fmt;

/// Lane types supported by the evaluators
///
/// # Discriminant Values
///
/// Floats use 0-9 (F64=0, F32=1). Existing values are never changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point (most common)
    F32 = 1,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 => 8,
            Self::F32 => 4,
        }
    }

    /// Number of explicitly stored mantissa bits
    #[inline]
    pub const fn mantissa_bits(self) -> u32 {
        match self {
            Self::F64 => 52,
            Self::F32 => 23,
        }
    }

    /// Short display name
    #[inline]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
