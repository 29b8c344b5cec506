//! Conversion ratio validation

/// Smallest accepted output/input ratio
pub const MIN_RATIO: f64 = 1.0 / 256.0;

/// Largest accepted output/input ratio
pub const MAX_RATIO: f64 = 256.0;

/// True iff `1/256 <= ratio <= 256`
pub fn is_valid_ratio(ratio: f64) -> bool {
    (MIN_RATIO..=MAX_RATIO).contains(&ratio)
}
