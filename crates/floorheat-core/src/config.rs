use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compose::Color;
use crate::consts::{BLUR_RADIUS_RANGE, DEFAULT_BLUR_RADIUS, DEFAULT_OPACITY, OPACITY_RANGE};
use crate::error::Result;
use crate::heat::colormap::ColorScale;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorheatConfig {
    #[serde(default)]
    pub heat: HeatSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub interaction: InteractionSettings,
}

impl FloorheatConfig {
    /// Clamp every bounded setting into its allowed range.
    pub fn sanitized(mut self) -> Self {
        self.heat = self.heat.sanitized();
        self
    }
}

/// Heat overlay settings exposed to the surrounding UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatSettings {
    pub enabled: bool,
    /// Gaussian sigma in image pixels.
    pub blur_radius: f32,
    pub opacity: f32,
    pub color_scale: ColorScale,
}

impl Default for HeatSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            blur_radius: DEFAULT_BLUR_RADIUS,
            opacity: DEFAULT_OPACITY,
            color_scale: ColorScale::default(),
        }
    }
}

impl HeatSettings {
    pub fn sanitized(mut self) -> Self {
        self.blur_radius = clamp_or(self.blur_radius, BLUR_RADIUS_RANGE, DEFAULT_BLUR_RADIUS);
        self.opacity = clamp_or(self.opacity, OPACITY_RANGE, DEFAULT_OPACITY);
        self
    }
}

fn clamp_or(v: f32, (lo, hi): (f32, f32), fallback: f32) -> f32 {
    if v.is_finite() {
        v.clamp(lo, hi)
    } else {
        fallback
    }
}

/// Stroke widths, sizes and colors for region outlines, labels and overlays.
/// Widths and sizes are in device pixels; the compositor compensates for zoom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub label_font_size: f32,
    pub hint_font_size: f32,
    pub outline_width: f32,
    pub marker_radius: f32,
    pub guide_width: f32,
    /// Dash and gap length of the in-progress polyline.
    pub dash: [f32; 2],
    pub outline_color: Color,
    pub fill_color: Color,
    pub label_color: Color,
    pub marker_color: Color,
    pub guide_color: Color,
    pub hint_color: Color,
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            label_font_size: 14.0,
            hint_font_size: 13.0,
            outline_width: 2.0,
            marker_radius: 4.0,
            guide_width: 1.5,
            dash: [6.0, 4.0],
            outline_color: [30, 30, 30, 230],
            fill_color: [70, 130, 220, 90],
            label_color: [20, 20, 20, 255],
            marker_color: [230, 60, 40, 255],
            guide_color: [230, 60, 40, 220],
            hint_color: [255, 255, 255, 220],
            background: [30, 30, 30, 255],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelPolicy {
    /// Remove a region created in this drawing session if it still has no
    /// points when drawing is cancelled. Existing regions are never removed.
    #[default]
    DiscardEmpty,
    /// Keep every region; only leave draw mode.
    KeepAll,
}

impl fmt::Display for CancelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiscardEmpty => write!(f, "Discard empty"),
            Self::KeepAll => write!(f, "Keep all"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub cancel_policy: CancelPolicy,
}

pub fn load_config(path: &Path) -> Result<FloorheatConfig> {
    let text = std::fs::read_to_string(path)?;
    let config: FloorheatConfig = toml::from_str(&text)?;
    Ok(config.sanitized())
}

pub fn save_config(config: &FloorheatConfig, path: &Path) -> Result<()> {
    std::fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}
