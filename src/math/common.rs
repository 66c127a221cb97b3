//! Shared constants for the packet evaluators
//!
//! Every literal an evaluator needs lives here, grouped per function and per
//! lane width. The evaluators are generic and pick a table through
//! [`Element`](crate::dtype::Element); they differ between f32 and f64 only
//! in these numbers.
//!
//! Coefficient slices are ordered highest degree first, the order the Horner
//! chains in `poly.rs` consume them.

/// Constants for `sin(x)`
#[derive(Copy, Clone, Debug)]
pub struct TrigTable<T: 'static> {
    /// 1/π
    pub one_over_pi: T,
    /// 4/π
    pub four_over_pi: T,
    /// −π split into three parts of decreasing magnitude
    pub neg_pi: [T; 3],
    /// Odd polynomial for sin(π/4 · z) on z ∈ [−1, 1]
    pub left: &'static [T],
    /// Even polynomial for cos(π/4 · t) on t = z − 2 ∈ [−1, 1]
    pub right: &'static [T],
}

/// Constants for `exp(x)`
#[derive(Copy, Clone, Debug)]
pub struct ExpTable<T: 'static> {
    /// Lower input clamp
    pub lo: T,
    /// Upper input clamp
    pub hi: T,
    /// log₂(e)
    pub log2e: T,
    /// −ln(2) split into a short high part and a low correction
    pub neg_ln2: [T; 2],
    /// P in exp(r) ≈ 1 + r + r²·P(r)
    pub poly: &'static [T],
}

/// Constants for `log(x)`
#[derive(Copy, Clone, Debug)]
pub struct LogTable<T: 'static> {
    /// ln(2) split into a short high part and a low correction
    pub ln2: [T; 2],
    /// P in atanh(s) ≈ s + s³·P(s²)
    pub poly: &'static [T],
}

/// Constants for `tanh(x)`
#[derive(Copy, Clone, Debug)]
pub struct TanhTable<T: 'static> {
    /// |x| beyond which the rational form is clamped
    pub clamp: T,
    /// |x| below which tanh(x) is returned as x
    pub tiny: T,
    /// Odd numerator coefficients
    pub num: &'static [T],
    /// Even denominator coefficients
    pub den: &'static [T],
}

// ============================================================================
// sin(x)
// ============================================================================

/// Range reduction and interpolants for sin(x)
///
/// x is wrapped to [−π/4, 3π/4) and mapped to z = x·4/π ∈ [−1, 3). On
/// [−1, 1] the odd interpolant approximates sin(π/4·z); on (1, 3) the even
/// interpolant in t = z − 2 approximates cos(π/4·t) = sin(π/4·z).
pub mod trig_coefficients {
    use super::TrigTable;

    const ONE_OVER_PI_F32: f32 = 3.183098861837907e-01;
    const FOUR_OVER_PI_F32: f32 = 1.273239544735163e+00;

    // Short leading parts so shift·part is exact in single precision
    const NEG_PI_1_F32: f32 = -3.140625000000000e+00;
    const NEG_PI_2_F32: f32 = -9.670257568359375e-04;
    const NEG_PI_3_F32: f32 = -6.278329571784980e-07;

    const LEFT_1_F32: f32 = 7.853981525427295e-01;
    const LEFT_3_F32: f32 = -8.074536727092352e-02;
    const LEFT_5_F32: f32 = 2.489871967827018e-03;
    const LEFT_7_F32: f32 = -3.587725841214251e-05;

    const RIGHT_0_F32: f32 = 9.999999724233232e-01;
    const RIGHT_2_F32: f32 = -3.084242535619928e-01;
    const RIGHT_4_F32: f32 = 1.584991525700324e-02;
    const RIGHT_6_F32: f32 = -3.188805084631342e-04;

    /// Single-precision sin table
    pub const TABLE_F32: TrigTable<f32> = TrigTable {
        one_over_pi: ONE_OVER_PI_F32,
        four_over_pi: FOUR_OVER_PI_F32,
        neg_pi: [NEG_PI_1_F32, NEG_PI_2_F32, NEG_PI_3_F32],
        left: &[LEFT_7_F32, LEFT_5_F32, LEFT_3_F32, LEFT_1_F32],
        right: &[RIGHT_6_F32, RIGHT_4_F32, RIGHT_2_F32, RIGHT_0_F32],
    };

    const ONE_OVER_PI_F64: f64 = std::f64::consts::FRAC_1_PI;
    const FOUR_OVER_PI_F64: f64 = 4.0 * std::f64::consts::FRAC_1_PI;

    // Cody-Waite split of π; the first two parts have trailing zero bits
    const NEG_PI_1_F64: f64 = -4.0 * 7.853_981_256_484_985_351_56e-1;
    const NEG_PI_2_F64: f64 = -4.0 * 3.774_894_707_930_798_176_68e-8;
    const NEG_PI_3_F64: f64 = -4.0 * 2.695_151_429_079_059_526_45e-15;

    // Taylor coefficients of sin(q·z) and cos(q·t) with q = π/4
    const Q: f64 = std::f64::consts::FRAC_PI_4;
    const Q2: f64 = Q * Q;

    const LEFT_1_F64: f64 = Q;
    const LEFT_3_F64: f64 = -LEFT_1_F64 * Q2 / 6.0;
    const LEFT_5_F64: f64 = -LEFT_3_F64 * Q2 / 20.0;
    const LEFT_7_F64: f64 = -LEFT_5_F64 * Q2 / 42.0;
    const LEFT_9_F64: f64 = -LEFT_7_F64 * Q2 / 72.0;
    const LEFT_11_F64: f64 = -LEFT_9_F64 * Q2 / 110.0;
    const LEFT_13_F64: f64 = -LEFT_11_F64 * Q2 / 156.0;
    const LEFT_15_F64: f64 = -LEFT_13_F64 * Q2 / 210.0;
    const LEFT_17_F64: f64 = -LEFT_15_F64 * Q2 / 272.0;

    const RIGHT_0_F64: f64 = 1.0;
    const RIGHT_2_F64: f64 = -RIGHT_0_F64 * Q2 / 2.0;
    const RIGHT_4_F64: f64 = -RIGHT_2_F64 * Q2 / 12.0;
    const RIGHT_6_F64: f64 = -RIGHT_4_F64 * Q2 / 30.0;
    const RIGHT_8_F64: f64 = -RIGHT_6_F64 * Q2 / 56.0;
    const RIGHT_10_F64: f64 = -RIGHT_8_F64 * Q2 / 90.0;
    const RIGHT_12_F64: f64 = -RIGHT_10_F64 * Q2 / 132.0;
    const RIGHT_14_F64: f64 = -RIGHT_12_F64 * Q2 / 182.0;
    const RIGHT_16_F64: f64 = -RIGHT_14_F64 * Q2 / 240.0;

    /// Double-precision sin table
    pub const TABLE_F64: TrigTable<f64> = TrigTable {
        one_over_pi: ONE_OVER_PI_F64,
        four_over_pi: FOUR_OVER_PI_F64,
        neg_pi: [NEG_PI_1_F64, NEG_PI_2_F64, NEG_PI_3_F64],
        left: &[
            LEFT_17_F64,
            LEFT_15_F64,
            LEFT_13_F64,
            LEFT_11_F64,
            LEFT_9_F64,
            LEFT_7_F64,
            LEFT_5_F64,
            LEFT_3_F64,
            LEFT_1_F64,
        ],
        right: &[
            RIGHT_16_F64,
            RIGHT_14_F64,
            RIGHT_12_F64,
            RIGHT_10_F64,
            RIGHT_8_F64,
            RIGHT_6_F64,
            RIGHT_4_F64,
            RIGHT_2_F64,
            RIGHT_0_F64,
        ],
    };
}

// ============================================================================
// exp(x)
// ============================================================================

/// Range reduction and polynomial for exp(x)
///
/// exp(x) = 2^m · exp(r) with m = floor(x·log₂e + ½) and |r| ≤ ln(2)/2.
pub mod exp_coefficients {
    use super::ExpTable;

    const LO_F32: f32 = -88.376_262_664_794_9;
    const HI_F32: f32 = 88.376_262_664_795_0;

    const NEG_LN2_HI_F32: f32 = -0.693_359_375;
    const NEG_LN2_LO_F32: f32 = 2.121_944_40e-4;

    // Minimax fit for single precision
    const P0_F32: f32 = 1.987_569_150_0e-4;
    const P1_F32: f32 = 1.398_199_950_7e-3;
    const P2_F32: f32 = 8.333_451_907_3e-3;
    const P3_F32: f32 = 4.166_579_589_4e-2;
    const P4_F32: f32 = 1.666_666_545_9e-1;
    const P5_F32: f32 = 5.000_000_120_1e-1;

    /// Single-precision exp table
    pub const TABLE_F32: ExpTable<f32> = ExpTable {
        lo: LO_F32,
        hi: HI_F32,
        log2e: std::f32::consts::LOG2_E,
        neg_ln2: [NEG_LN2_HI_F32, NEG_LN2_LO_F32],
        poly: &[P0_F32, P1_F32, P2_F32, P3_F32, P4_F32, P5_F32],
    };

    const LO_F64: f64 = -709.436_139_303;
    const HI_F64: f64 = 709.437;

    const NEG_LN2_HI_F64: f64 = -0.693_145_751_953_125;
    const NEG_LN2_LO_F64: f64 = -1.428_606_820_309_417_232_12e-6;

    /// Double-precision exp table
    pub const TABLE_F64: ExpTable<f64> = ExpTable {
        lo: LO_F64,
        hi: HI_F64,
        log2e: std::f64::consts::LOG2_E,
        neg_ln2: [NEG_LN2_HI_F64, NEG_LN2_LO_F64],
        // 1/13! down to 1/2!
        poly: &[
            1.0 / 6_227_020_800.0,
            1.0 / 479_001_600.0,
            1.0 / 39_916_800.0,
            1.0 / 3_628_800.0,
            1.0 / 362_880.0,
            1.0 / 40_320.0,
            1.0 / 5_040.0,
            1.0 / 720.0,
            1.0 / 120.0,
            1.0 / 24.0,
            1.0 / 6.0,
            0.5,
        ],
    };
}

// ============================================================================
// log(x)
// ============================================================================

/// Reduction and series for log(x)
///
/// x = 2^e · m with m ∈ [√½, √2), f = m − 1, s = f / (2 + f) so that
/// log(m) = 2·atanh(s) and |s| ≤ 0.1716.
pub mod log_coefficients {
    use super::LogTable;

    const LN2_HI_F32: f32 = 0.693_359_375;
    const LN2_LO_F32: f32 = -2.121_944_40e-4;

    /// Single-precision log table
    pub const TABLE_F32: LogTable<f32> = LogTable {
        ln2: [LN2_HI_F32, LN2_LO_F32],
        poly: &[1.0 / 9.0, 1.0 / 7.0, 1.0 / 5.0, 1.0 / 3.0],
    };

    const LN2_HI_F64: f64 = 0.693_145_751_953_125;
    const LN2_LO_F64: f64 = 1.428_606_820_309_417_232_12e-6;

    /// Double-precision log table
    pub const TABLE_F64: LogTable<f64> = LogTable {
        ln2: [LN2_HI_F64, LN2_LO_F64],
        poly: &[
            1.0 / 19.0,
            1.0 / 17.0,
            1.0 / 15.0,
            1.0 / 13.0,
            1.0 / 11.0,
            1.0 / 9.0,
            1.0 / 7.0,
            1.0 / 5.0,
            1.0 / 3.0,
        ],
    };
}

// ============================================================================
// tanh(x)
// ============================================================================

/// 13/6 rational approximation for tanh(x)
///
/// tanh(x) ≈ x·N(x²) / D(x²) on [−clamp, clamp]. The fit targets single
/// precision; f64 lanes share it and get the same absolute error.
pub mod tanh_coefficients {
    use super::TanhTable;

    const CLAMP: f64 = 7.905_311_107_635_498_05;
    const TINY: f64 = 0.0004;

    const ALPHA_1: f64 = 4.893_524_558_917_86e-03;
    const ALPHA_3: f64 = 6.372_619_288_754_36e-04;
    const ALPHA_5: f64 = 1.485_722_357_179_79e-05;
    const ALPHA_7: f64 = 5.122_297_090_371_14e-08;
    const ALPHA_9: f64 = -8.604_671_522_137_35e-11;
    const ALPHA_11: f64 = 2.000_187_904_824_77e-13;
    const ALPHA_13: f64 = -2.760_768_477_423_55e-16;

    const BETA_0: f64 = 4.893_525_185_543_85e-03;
    const BETA_2: f64 = 2.268_434_632_439_00e-03;
    const BETA_4: f64 = 1.185_347_056_866_54e-04;
    const BETA_6: f64 = 1.198_258_394_667_02e-06;

    /// Single-precision tanh table
    pub const TABLE_F32: TanhTable<f32> = TanhTable {
        clamp: CLAMP as f32,
        tiny: TINY as f32,
        num: &[
            ALPHA_13 as f32,
            ALPHA_11 as f32,
            ALPHA_9 as f32,
            ALPHA_7 as f32,
            ALPHA_5 as f32,
            ALPHA_3 as f32,
            ALPHA_1 as f32,
        ],
        den: &[BETA_6 as f32, BETA_4 as f32, BETA_2 as f32, BETA_0 as f32],
    };

    /// Double-precision tanh table
    pub const TABLE_F64: TanhTable<f64> = TanhTable {
        clamp: CLAMP,
        tiny: TINY,
        num: &[ALPHA_13, ALPHA_11, ALPHA_9, ALPHA_7, ALPHA_5, ALPHA_3, ALPHA_1],
        den: &[BETA_6, BETA_4, BETA_2, BETA_0],
    };
}

// ============================================================================
// sqrt / rsqrt
// ============================================================================

/// Newton step and special-value bit patterns for sqrt/rsqrt
pub mod sqrt_constants {
    /// +inf as raw f32 bits
    pub const INF_BITS_F32: i32 = 0x7F80_0000;
    /// Quiet NaN as raw f32 bits
    pub const NAN_BITS_F32: i32 = 0x7FC0_0000;
    /// Smallest positive normal f32 as raw bits
    pub const MIN_NORMAL_BITS_F32: i32 = 0x0080_0000;

    /// Constant term of the Newton step `x·(1.5 − 0.5·v·x²)`
    pub const ONE_POINT_FIVE: f64 = 1.5;
    /// Scale on `v·x²` in the Newton step
    pub const MINUS_HALF: f64 = -0.5;
}
