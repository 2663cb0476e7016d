use tracing::debug;

use crate::consts::{FALLBACK_NORMALIZED, INTENSITY_EXPONENT, INTENSITY_FLOOR};

/// `value / max`, clamped to [0, 1]. A non-finite ratio (zero or NaN max)
/// is recovered with a fixed mid-scale fallback.
pub fn normalized(value: f64, max_value: f64) -> f64 {
    let t = value / max_value;
    if t.is_finite() {
        t.clamp(0.0, 1.0)
    } else {
        debug!(value, max_value, "Undefined intensity, using fallback");
        FALLBACK_NORMALIZED
    }
}

/// Compressive curve `max(t^0.3, 0.3)`.
pub fn compress(t: f64) -> f64 {
    t.powf(INTENSITY_EXPONENT).max(INTENSITY_FLOOR)
}

/// Peak intensity a region contributes to the heat field, or `None` for a
/// region with exactly zero sales. Zero is treated as "no glow", so the
/// floor applies only to strictly positive values.
pub fn region_intensity(value: f64, max_value: f64) -> Option<f64> {
    if value == 0.0 {
        return None;
    }
    Some(compress(normalized(value, max_value)))
}
