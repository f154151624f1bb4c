//! # Utility Module
//!
//! Scalar helpers used by the geometry code.
//!
//! ```
//! use rusted_bsp::utils::util::clamp;
//!
//! assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
//! ```

/// Clamps a value between a minimum and maximum.
///
/// Split parameters computed from nearly parallel lines can land slightly
/// outside `[0, 1]`; callers clamp them back onto the segment.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
