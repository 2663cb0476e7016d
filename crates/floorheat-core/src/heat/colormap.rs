//! Continuous color scales over the unit domain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single color stop along the [0, 1] domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub at: f32,
    pub rgb: [u8; 3],
}

const fn stop(at: f32, rgb: [u8; 3]) -> ColorStop {
    ColorStop { at, rgb }
}

/// Blue -> cyan -> green -> yellow -> red.
const HEAT: &[ColorStop] = &[
    stop(0.0, [49, 54, 149]),
    stop(0.25, [69, 170, 210]),
    stop(0.5, [120, 200, 90]),
    stop(0.75, [250, 210, 60]),
    stop(1.0, [215, 40, 30]),
];

const VIRIDIS: &[ColorStop] = &[
    stop(0.0, [68, 1, 84]),
    stop(0.25, [59, 82, 139]),
    stop(0.5, [33, 145, 140]),
    stop(0.75, [94, 201, 98]),
    stop(1.0, [253, 231, 37]),
];

/// Diverging, low values blue and high values red.
const SPECTRAL: &[ColorStop] = &[
    stop(0.0, [50, 136, 189]),
    stop(0.25, [171, 221, 164]),
    stop(0.5, [255, 255, 191]),
    stop(0.75, [253, 174, 97]),
    stop(1.0, [213, 62, 79]),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScale {
    #[default]
    Heat,
    Viridis,
    Spectral,
}

impl ColorScale {
    pub const ALL: &[Self] = &[Self::Heat, Self::Viridis, Self::Spectral];

    pub fn stops(&self) -> &'static [ColorStop] {
        match self {
            Self::Heat => HEAT,
            Self::Viridis => VIRIDIS,
            Self::Spectral => SPECTRAL,
        }
    }

    /// Color at `t`, clamped into [0, 1]. NaN maps to the low end.
    pub fn sample(&self, t: f32) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let stops = self.stops();

        let upper = stops
            .iter()
            .position(|s| s.at >= t)
            .unwrap_or(stops.len() - 1);
        if upper == 0 {
            return stops[0].rgb;
        }

        let (a, b) = (stops[upper - 1], stops[upper]);
        let span = b.at - a.at;
        let f = if span > 0.0 { (t - a.at) / span } else { 0.0 };
        [
            lerp(a.rgb[0], b.rgb[0], f),
            lerp(a.rgb[1], b.rgb[1], f),
            lerp(a.rgb[2], b.rgb[2], f),
        ]
    }
}

impl fmt::Display for ColorScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heat => write!(f, "Heat"),
            Self::Viridis => write!(f, "Viridis"),
            Self::Spectral => write!(f, "Spectral"),
        }
    }
}

impl std::str::FromStr for ColorScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heat" => Ok(Self::Heat),
            "viridis" => Ok(Self::Viridis),
            "spectral" => Ok(Self::Spectral),
            other => Err(format!("unknown color scale '{other}' (heat, viridis, spectral)")),
        }
    }
}

fn lerp(a: u8, b: u8, f: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * f).round().clamp(0.0, 255.0) as u8
}
