//! Fixed-precision rounding.
//!
//! Predictions and day-over-day changes are both reported to 2 decimal places.
//! Exact halves go to the even digit (`round_ties_even` on the value scaled by
//! 100), so 5.125 becomes 5.12 and 5.135 becomes 5.14.

/// Number of decimals kept for temperatures and changes.
pub const DECIMALS: i32 = 2;

/// Round `value` to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMALS);
    (value * scale).round_ties_even() / scale
}
