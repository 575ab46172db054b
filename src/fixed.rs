//! Fixed-point output scaling: rounding, arithmetic shift and saturation.

#[allow(unused_imports)]
use num_traits::float::Float;

/// Scale factor between float samples and Q1.15.
pub const Q15_SCALE: f32 = 32768.0;

/// Largest representable Q1.15 value (0.999969...).
pub const Q15_MAX: i16 = i16::MAX;

/// Smallest representable Q1.15 value (-1.0).
pub const Q15_MIN: i16 = i16::MIN;

/// Fractional bits of the Q1.15 format.
pub const Q15_FRACTION_BITS: u32 = 15;

/// Output stage of the accumulator pipeline.
///
/// Narrows a wide accumulator value by discarding `shift` fractional bits
/// and reducing the result to `width` bits. All four parameters are fixed
/// per build of the core; [`Requantizer::q15`] mirrors the reference
/// stereo build (Q1.15 in, Q1.15 out, round and clamp).
///
/// The mapping is pure and bit-exact: the same accumulator value always
/// produces the same output, on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requantizer {
    /// Fractional bits discarded by the arithmetic right shift.
    pub shift: u32,
    /// Output width in bits. At most 32.
    pub width: u32,
    /// Add `1 << (shift - 1)` before shifting (round half up). No bias is
    /// added when `shift` is zero.
    pub round: bool,
    /// Clamp to the output range instead of wrapping.
    pub saturate: bool,
}

impl Requantizer {
    /// Policy of the reference build.
    pub const fn q15() -> Self {
        Self {
            shift: Q15_FRACTION_BITS,
            width: 16,
            round: true,
            saturate: true,
        }
    }

    /// Smallest representable output value.
    pub const fn min_out(&self) -> i64 {
        -(1 << (self.width - 1))
    }

    /// Largest representable output value.
    pub const fn max_out(&self) -> i64 {
        (1 << (self.width - 1)) - 1
    }

    /// Narrow a wide accumulator value to the output width.
    ///
    /// Out-of-range results either clamp to the output boundaries or keep
    /// the low `width` bits with their sign, depending on `saturate`.
    /// Overflow is never an error.
    #[inline]
    pub fn apply(&self, mut acc: i64) -> i32 {
        debug_assert!(self.width >= 1 && self.width <= 32);

        if self.round && self.shift > 0 {
            acc += 1 << (self.shift - 1);
        }
        let shifted = acc >> self.shift;
        if self.saturate {
            shifted.clamp(self.min_out(), self.max_out()) as i32
        } else {
            // Wraparound: low `width` bits, sign-extended.
            let unused = 64 - self.width;
            ((shifted << unused) >> unused) as i32
        }
    }
}

/// Convert a float in [-1.0, 1.0) to Q1.15, round to nearest, clamp.
#[inline]
pub fn q15_from_f32(value: f32) -> i16 {
    let scaled = (value * Q15_SCALE).round();
    scaled.clamp(Q15_MIN as f32, Q15_MAX as f32) as i16
}

/// Convert a Q1.15 value to float.
#[inline]
pub fn q15_to_f32(value: i16) -> f32 {
    value as f32 / Q15_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(shift: u32, round: bool, saturate: bool) -> Requantizer {
        Requantizer {
            shift,
            width: 16,
            round,
            saturate,
        }
    }

    #[test]
    fn exact_multiples_round_to_themselves() {
        let q = policy(4, true, true);
        for k in [-7i64, -1, 0, 1, 42] {
            assert_eq!(q.apply(k << 4), k as i32);
        }
    }

    #[test]
    fn half_fraction_rounds_up() {
        let q = policy(4, true, true);
        assert_eq!(q.apply((3 << 4) + (1 << 3)), 4);
        assert_eq!(q.apply((-3 << 4) + (1 << 3)), -2);
        // Exactly -0.5 rounds up to zero.
        assert_eq!(q.apply(-(1 << 3)), 0);
    }

    #[test]
    fn zero_shift_adds_no_bias() {
        let q = policy(0, true, true);
        assert_eq!(q.apply(5), 5);
        assert_eq!(q.apply(-5), -5);
    }

    #[test]
    fn truncation_without_rounding_is_arithmetic() {
        let q = policy(1, false, true);
        assert_eq!(q.apply(-3), -2);
        assert_eq!(q.apply(3), 1);
    }

    #[test]
    fn saturation_clamps_to_output_range() {
        let q = policy(0, false, true);
        assert_eq!(q.apply(40_000), 32_767);
        assert_eq!(q.apply(-40_000), -32_768);
        assert_eq!(q.apply(32_767), 32_767);
        assert_eq!(q.apply(-32_768), -32_768);
    }

    #[test]
    fn wraparound_keeps_low_bits() {
        let q = policy(0, false, false);
        // 40000 = 0x9C40; as a signed 16-bit value that is -25536.
        assert_eq!(q.apply(40_000), 40_000i64 as i16 as i32);
        assert_eq!(q.apply(-40_000), -40_000i64 as i16 as i32);
    }

    #[test]
    fn q15_reference_policy() {
        let q = Requantizer::q15();
        // Unity-ish coefficient times full-scale sample.
        assert_eq!(q.apply(32_767i64 * 32_767), 32_766);
        assert_eq!(q.apply(-32_768i64 * 32_767), -32_767);
        // (-1.0) * (-1.0) lands one past full scale and clamps.
        assert_eq!(q.apply(-32_768i64 * -32_768), 32_767);
    }

    #[test]
    fn float_conversions() {
        assert_eq!(q15_from_f32(0.0), 0);
        assert_eq!(q15_from_f32(0.25), 8192);
        assert_eq!(q15_from_f32(-1.0), -32768);
        // +1.0 is out of range and clamps to the largest value.
        assert_eq!(q15_from_f32(1.0), 32767);
        assert_eq!(q15_to_f32(-32768), -1.0);
        assert_eq!(q15_to_f32(16384), 0.5);
    }
}
