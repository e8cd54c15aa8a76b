//! Fixed-point proportional scaling.
//!
//! Solves `numerator / denominator = ? / max_value` without floating point
//! using a 14-bit fractional intermediate:
//!
//! ```text
//! proportion = (numerator << 14) / denominator
//! scaled     = (proportion * max_value) >> 14
//! ```
//!
//! Results must be bit-identical across applets, so the intermediate
//! arithmetic wraps exactly like 32-bit integer hardware.  Operands are
//! expected to stay within CV / pixel ranges; outside them the result wraps
//! silently.  Use [`checked_proportion`] where that matters.

use crate::config::MAX_CV;

/// Fractional bits of the simulated float.
pub const SIMFLOAT_SHIFT: u32 = 14;

/// A 32-bit integer carrying 14 fractional bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SimFloat(i32);

impl SimFloat {
    pub const ONE: Self = Self(1 << SIMFLOAT_SHIFT);

    pub const fn from_int(x: i32) -> Self {
        Self(x << SIMFLOAT_SHIFT)
    }

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Integer part, rounding toward negative infinity.
    pub const fn to_int(self) -> i32 {
        self.0 >> SIMFLOAT_SHIFT
    }

    /// Ratio `numerator / denominator`.  A zero denominator yields zero.
    pub const fn ratio(numerator: i32, denominator: i32) -> Self {
        if denominator == 0 {
            return Self(0);
        }
        Self(Self::from_int(numerator).0.wrapping_div(denominator))
    }

    pub const fn scale(self, factor: i32) -> Self {
        Self(self.0.wrapping_mul(factor))
    }
}

/// Scale `numerator / denominator` onto `0..=max_value`.
///
/// `proportion(n, n, m) == m` and `proportion(0, d, m) == 0`.  A zero
/// denominator returns 0 rather than trapping.
pub const fn proportion(numerator: i32, denominator: i32, max_value: i32) -> i32 {
    SimFloat::ratio(numerator, denominator).scale(max_value).to_int()
}

/// Same as [`proportion`], but `None` where the 32-bit intermediate would wrap.
pub fn checked_proportion(numerator: i32, denominator: i32, max_value: i32) -> Option<i32> {
    let shifted = numerator.checked_mul(1 << SIMFLOAT_SHIFT)?;
    let ratio = shifted.checked_div(denominator)?;
    Some(ratio.checked_mul(max_value)? >> SIMFLOAT_SHIFT)
}

/// Map a CV reading onto `0..=max_pixels`, e.g. for a bar height.
pub fn proportion_cv(cv_value: i32, max_pixels: i32) -> i32 {
    proportion(cv_value, MAX_CV, max_pixels).clamp(0, max_pixels.max(0))
}
