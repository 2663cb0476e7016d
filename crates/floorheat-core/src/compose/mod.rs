//! Frame composition as an ordered list of draw commands.
//!
//! Order is fixed: clear, push transform, base image, heat layer, regions
//! (polygon and label when complete, open scaffolding otherwise), the active
//! drawing overlay, pop transform, device-space hint text. Executors
//! ([`raster::RasterTarget`], the GUI painter) replay the list verbatim.

pub mod raster;

use tracing::debug;

use crate::config::{HeatSettings, RenderSettings};
use crate::geometry::Point;
use crate::interaction::{AppState, Mode};
use crate::region::Region;

/// Straight (non-premultiplied) RGBA8.
pub type Color = [u8; 4];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    /// Subsequent coordinates and sizes are in image space:
    /// `device = image * zoom + pan`.
    PushTransform {
        pan: Point,
        zoom: f32,
    },
    BaseImage,
    HeatLayer {
        opacity: f32,
    },
    Polygon {
        points: Vec<Point>,
        fill: Option<Color>,
        stroke: Stroke,
    },
    Label {
        anchor: Point,
        text: String,
        font_size: f32,
        color: Color,
    },
    Marker {
        center: Point,
        radius: f32,
        color: Color,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
        /// `[dash, gap]` lengths, or `None` for a solid line.
        dash: Option<[f32; 2]>,
    },
    PopTransform,
    /// Device-space text, unaffected by pan and zoom.
    HintText {
        position: Point,
        text: String,
        font_size: f32,
        color: Color,
    },
}

const HINT_POSITION: Point = Point::new(10.0, 10.0);

/// Build the command list for one frame.
pub fn compose(
    state: &AppState,
    heat_present: bool,
    heat: &HeatSettings,
    render: &RenderSettings,
) -> Vec<DrawCommand> {
    let viewport = state.viewport();
    let inv_zoom = 1.0 / viewport.zoom;
    let mut commands = vec![
        DrawCommand::Clear {
            color: render.background,
        },
        DrawCommand::PushTransform {
            pan: viewport.pan,
            zoom: viewport.zoom,
        },
    ];

    if state.image_size().is_some() {
        commands.push(DrawCommand::BaseImage);
    }
    if heat_present {
        commands.push(DrawCommand::HeatLayer {
            opacity: heat.opacity,
        });
    }

    let outline = Stroke {
        width: render.outline_width * inv_zoom,
        color: render.outline_color,
    };
    let active = state.active_region();
    for region in state.regions().iter() {
        if region.is_complete() {
            push_region(&mut commands, region, heat_present, outline, inv_zoom, render);
        } else if active.map(Region::id) != Some(region.id()) {
            push_scaffolding(&mut commands, region.points(), None, inv_zoom, render);
        }
    }

    if let Some(active) = active {
        push_scaffolding(
            &mut commands,
            active.points(),
            Some(render.dash),
            inv_zoom,
            render,
        );
    }

    commands.push(DrawCommand::PopTransform);
    commands.push(DrawCommand::HintText {
        position: HINT_POSITION,
        text: hint_text(state),
        font_size: render.hint_font_size,
        color: render.hint_color,
    });

    debug!(commands = commands.len(), heat_present, "Frame composed");
    commands
}

fn push_region(
    commands: &mut Vec<DrawCommand>,
    region: &Region,
    heat_present: bool,
    outline: Stroke,
    inv_zoom: f32,
    render: &RenderSettings,
) {
    commands.push(DrawCommand::Polygon {
        points: region.points().to_vec(),
        fill: (!heat_present).then_some(render.fill_color),
        stroke: outline,
    });
    if let Some(anchor) = region.centroid() {
        commands.push(DrawCommand::Label {
            anchor,
            text: label_text(region),
            font_size: render.label_font_size * inv_zoom,
            color: render.label_color,
        });
    }
}

fn push_scaffolding(
    commands: &mut Vec<DrawCommand>,
    points: &[Point],
    dash: Option<[f32; 2]>,
    inv_zoom: f32,
    render: &RenderSettings,
) {
    if points.is_empty() {
        return;
    }
    if points.len() >= 2 {
        commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            stroke: Stroke {
                width: render.guide_width * inv_zoom,
                color: render.guide_color,
            },
            dash: dash.map(|[on, off]| [on * inv_zoom, off * inv_zoom]),
        });
    }
    for &center in points {
        commands.push(DrawCommand::Marker {
            center,
            radius: render.marker_radius * inv_zoom,
            color: render.marker_color,
        });
    }
}

/// `"Name: value"` with integral values printed without decimals.
pub fn label_text(region: &Region) -> String {
    format!("{}: {}", region.name(), format_value(region.value()))
}

pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Mode indicator shown in the corner of the canvas.
pub fn hint_text(state: &AppState) -> String {
    match state.mode() {
        Mode::View => "View: drag to pan, scroll to zoom".to_string(),
        Mode::Draw(_) => match state.active_region() {
            Some(r) => format!(
                "Drawing \"{}\": click to add points ({} so far)",
                r.name(),
                r.points().len()
            ),
            None => "Drawing".to_string(),
        },
    }
}
