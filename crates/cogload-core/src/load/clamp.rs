//! Rounding and clamping shared by every score.

/// Round to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Round to 3 decimal places, then restrict to `[0, 1]`.
///
/// The order matters: rounding first keeps outputs stable across platforms.
pub fn clamp_score(value: f64) -> f64 {
    round3(value).clamp(0.0, 1.0)
}
