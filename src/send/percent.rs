//! Percentage clamping

pub const MIN_PERCENT: i32 = 0;
pub const MAX_PERCENT: i32 = 100;

/// Clamp any integer into `0..=100`
#[inline]
pub fn clamp_percent(value: i32) -> u8 {
    value.clamp(MIN_PERCENT, MAX_PERCENT) as u8
}

/// `percent` of `amount`
#[inline]
pub fn portion(amount: f64, percent: u8) -> f64 {
    amount * f64::from(percent) / 100.0
}
