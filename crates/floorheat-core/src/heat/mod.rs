pub mod blur;
pub mod colormap;
pub mod fill;
pub mod gradient;
pub mod intensity;

use image::{Rgba, RgbaImage};
use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::HeatSettings;
use crate::consts::{HEAT_AMPLIFICATION, PARALLEL_PIXEL_THRESHOLD};
use crate::region::{RegionId, RegionSet};

use self::blur::gaussian_blur_in_place;
use self::fill::fill_polygon;
use self::gradient::RadialGradient;
use self::intensity::region_intensity;

/// Color-mapped heat raster, same pixel size as the base image.
#[derive(Clone, Debug)]
pub struct HeatLayer {
    pub image: RgbaImage,
}

impl HeatLayer {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// One region's input to the heat field.
#[derive(Clone, Debug, PartialEq)]
pub struct Contribution {
    pub id: RegionId,
    pub intensity: f64,
    pub gradient: RadialGradient,
}

/// Complete, non-zero regions and the gradient each one is filled with.
pub fn contributions(regions: &RegionSet, max_value: f64) -> Vec<Contribution> {
    regions
        .complete()
        .filter_map(|region| {
            let intensity = region_intensity(region.value(), max_value)?;
            let center = region.centroid()?;
            debug!(region = region.name(), value = region.value(), intensity, "Heat contribution");
            Some(Contribution {
                id: region.id(),
                intensity,
                gradient: RadialGradient::for_region(
                    center,
                    region.bounding_radius(),
                    intensity as f32,
                ),
            })
        })
        .collect()
}

/// Turns regions into a blurred, colorized heat layer.
///
/// The accumulation and scratch buffers are kept between calls and only
/// reallocated when the image size changes.
#[derive(Debug, Default)]
pub struct HeatSynthesizer {
    field: Array2<f32>,
    scratch: Array2<f32>,
}

impl HeatSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blurred alpha field from the last successful synthesis, shape
    /// `(height, width)`.
    pub fn field(&self) -> &Array2<f32> {
        &self.field
    }

    /// Build the heat layer for an image of `width x height`. Returns `None`
    /// when the layer is disabled, the image is empty, or no region contributes.
    pub fn synthesize(
        &mut self,
        regions: &RegionSet,
        max_value: f64,
        width: u32,
        height: u32,
        settings: &HeatSettings,
    ) -> Option<HeatLayer> {
        if !settings.enabled || width == 0 || height == 0 || max_value <= 0.0 {
            return None;
        }

        let parts = contributions(regions, max_value);
        if parts.is_empty() {
            return None;
        }

        self.reset_field(width as usize, height as usize);
        for part in &parts {
            let Some(region) = regions.get(part.id) else {
                continue;
            };
            fill_polygon(&mut self.field, region.points(), |p| {
                part.gradient.level_at(p)
            });
        }

        gaussian_blur_in_place(&mut self.field, &mut self.scratch, settings.blur_radius);

        let image = self.colorize(width, height, settings);
        info!(
            regions = parts.len(),
            width,
            height,
            blur = settings.blur_radius,
            "Heat layer synthesized"
        );
        Some(HeatLayer { image })
    }

    fn reset_field(&mut self, width: usize, height: usize) {
        if self.field.dim() == (height, width) {
            self.field.fill(0.0);
        } else {
            self.field = Array2::zeros((height, width));
        }
    }

    /// Alpha here is coverage only. The overlay opacity is applied once, when
    /// the layer is drawn.
    fn colorize(&self, width: u32, height: u32, settings: &HeatSettings) -> RgbaImage {
        let mut image = RgbaImage::new(width, height);
        let row_bytes = width as usize * 4;
        let scale = settings.color_scale;

        let paint_row = |(row, bytes): (usize, &mut [u8])| {
            for (col, px) in bytes.chunks_exact_mut(4).enumerate() {
                let a = self.field[[row, col]].clamp(0.0, 1.0);
                if a <= 0.0 {
                    continue;
                }
                let [r, g, b] = scale.sample(a);
                let alpha = (a * HEAT_AMPLIFICATION).min(1.0);
                px.copy_from_slice(&Rgba([r, g, b, (alpha * 255.0).round() as u8]).0);
            }
        };

        if width as usize * height as usize >= PARALLEL_PIXEL_THRESHOLD {
            image.par_chunks_mut(row_bytes).enumerate().for_each(paint_row);
        } else {
            image.chunks_mut(row_bytes).enumerate().for_each(paint_row);
        }
        image
    }
}
