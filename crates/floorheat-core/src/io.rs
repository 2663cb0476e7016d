use std::collections::BTreeMap;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use serde::Deserialize;
use tracing::info;

use crate::consts::MIN_REGION_POINTS;
use crate::error::{FloorheatError, Result};
use crate::geometry::Point;
use crate::interaction::{AppState, InputEvent};
use crate::values::ValueMap;

/// Decode any format the `image` crate supports into RGBA8.
pub fn load_base_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?.to_rgba8();
    info!(path = %path.display(), width = img.width(), height = img.height(), "Base image loaded");
    Ok(img)
}

pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueFile {
    Wrapped { values: BTreeMap<String, f64> },
    Flat(BTreeMap<String, f64>),
}

/// Parse a value map from TOML: either a flat `name = number` table or the
/// same table under `[values]`.
pub fn parse_value_map(text: &str) -> Result<ValueMap> {
    let raw = match toml::from_str::<ValueFile>(text)? {
        ValueFile::Wrapped { values } | ValueFile::Flat(values) => values,
    };
    Ok(raw.into())
}

pub fn load_value_map(path: &Path) -> Result<ValueMap> {
    let map = parse_value_map(&std::fs::read_to_string(path)?)?;
    info!(path = %path.display(), entries = map.len(), "Value map loaded");
    Ok(map)
}

pub fn load_layout(path: &Path) -> Result<Layout> {
    let layout = Layout::load(path)?;
    info!(path = %path.display(), regions = layout.regions.len(), "Layout loaded");
    Ok(layout)
}

/// Region outlines handed to the headless renderer.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Layout {
    #[serde(default, rename = "region")]
    pub regions: Vec<LayoutRegion>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LayoutRegion {
    pub name: String,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Layout {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Replay the layout into `state` as drawing events, so every region goes
    /// through the same create/append/finish path as interactive input.
    /// Regions with one or two points stay incomplete; empty ones follow the
    /// state's cancel policy.
    pub fn apply_to(&self, state: &mut AppState) -> Result<()> {
        for region in &self.regions {
            state
                .apply(&InputEvent::CreateRegion(region.name.clone()))
                .map_err(|e| FloorheatError::InvalidLayout(format!("{}: {e}", region.name)))?;

            for &p in &region.points {
                let device = state.viewport().to_device_space(p);
                state.apply(&InputEvent::Click(device))?;
            }

            let close = if region.points.len() >= MIN_REGION_POINTS {
                InputEvent::FinishDrawing
            } else {
                InputEvent::CancelDrawing
            };
            state.apply(&close)?;
        }
        Ok(())
    }
}
