//! Headless executor: replays draw commands into an RGBA8 surface.
//!
//! There is no font stack here, so `Label` and `HintText` draw a translucent
//! plate sized to the text at its anchor instead of glyphs.

use image::RgbaImage;
use tracing::debug;

use super::{Color, DrawCommand, Stroke};
use crate::geometry::{distance_to_segment, Point};
use crate::heat::fill::for_each_covered_pixel;
use crate::heat::HeatLayer;

const LABEL_PLATE: Color = [255, 255, 255, 170];
const HINT_PLATE: Color = [0, 0, 0, 140];
/// Average glyph advance as a fraction of font size.
const GLYPH_ADVANCE: f32 = 0.6;

/// Render target sized to the base image's native resolution.
pub struct RasterTarget<'a> {
    surface: RgbaImage,
    base: &'a RgbaImage,
    heat: Option<&'a HeatLayer>,
    pan: Point,
    zoom: f32,
}

impl<'a> RasterTarget<'a> {
    pub fn new(base: &'a RgbaImage, heat: Option<&'a HeatLayer>) -> Self {
        Self {
            surface: RgbaImage::new(base.width(), base.height()),
            base,
            heat,
            pan: Point::ZERO,
            zoom: 1.0,
        }
    }

    /// Execute `commands` in order and return the finished surface.
    pub fn render(mut self, commands: &[DrawCommand]) -> RgbaImage {
        for command in commands {
            self.execute(command);
        }
        debug!(
            width = self.surface.width(),
            height = self.surface.height(),
            commands = commands.len(),
            "Raster frame rendered"
        );
        self.surface
    }

    fn execute(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear { color } => {
                for px in self.surface.pixels_mut() {
                    px.0 = *color;
                }
            }
            DrawCommand::PushTransform { pan, zoom } => {
                self.pan = *pan;
                self.zoom = *zoom;
            }
            DrawCommand::PopTransform => {
                self.pan = Point::ZERO;
                self.zoom = 1.0;
            }
            DrawCommand::BaseImage => self.draw_image(self.base, 1.0),
            DrawCommand::HeatLayer { opacity } => {
                if let Some(layer) = self.heat {
                    self.draw_image(&layer.image, *opacity);
                }
            }
            DrawCommand::Polygon {
                points,
                fill,
                stroke,
            } => {
                let device: Vec<Point> = points.iter().map(|p| self.to_device(*p)).collect();
                if let Some(color) = fill {
                    let (w, h) = self.dimensions();
                    let surface = &mut self.surface;
                    for_each_covered_pixel(&device, w, h, |col, row| {
                        blend(surface, col, row, *color, 1.0);
                    });
                }
                let mut closed = device.clone();
                if let Some(first) = device.first() {
                    closed.push(*first);
                }
                self.stroke_path(&closed, self.scale_stroke(*stroke), None);
            }
            DrawCommand::Polyline {
                points,
                stroke,
                dash,
            } => {
                let device: Vec<Point> = points.iter().map(|p| self.to_device(*p)).collect();
                let dash = dash.map(|[on, off]| [on * self.zoom, off * self.zoom]);
                self.stroke_path(&device, self.scale_stroke(*stroke), dash);
            }
            DrawCommand::Marker {
                center,
                radius,
                color,
            } => {
                let c = self.to_device(*center);
                self.fill_disc(c, radius * self.zoom, *color);
            }
            DrawCommand::Label {
                anchor,
                text,
                font_size,
                ..
            } => {
                let c = self.to_device(*anchor);
                let size = font_size * self.zoom;
                let half = Point::new(text_width(text, size) / 2.0, size * 0.6);
                self.fill_rect(c - half, c + half, LABEL_PLATE);
            }
            DrawCommand::HintText {
                position,
                text,
                font_size,
                ..
            } => {
                let size = Point::new(text_width(text, *font_size), font_size * 1.2);
                self.fill_rect(*position, *position + size, HINT_PLATE);
            }
        }
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.surface.width() as usize, self.surface.height() as usize)
    }

    fn to_device(&self, p: Point) -> Point {
        p * self.zoom + self.pan
    }

    fn scale_stroke(&self, stroke: Stroke) -> Stroke {
        Stroke {
            width: stroke.width * self.zoom,
            ..stroke
        }
    }

    /// Nearest-neighbour draw of `src` under the current transform.
    fn draw_image(&mut self, src: &RgbaImage, opacity: f32) {
        let (w, h) = self.dimensions();
        let lo = self.to_device(Point::ZERO);
        let hi = self.to_device(Point::new(src.width() as f32, src.height() as f32));
        let Some((cols, rows)) = pixel_range(lo, hi, w, h) else {
            return;
        };

        for row in rows {
            let sy = ((row as f32 + 0.5 - self.pan.y) / self.zoom).floor();
            if sy < 0.0 || sy >= src.height() as f32 {
                continue;
            }
            for col in cols.clone() {
                let sx = ((col as f32 + 0.5 - self.pan.x) / self.zoom).floor();
                if sx < 0.0 || sx >= src.width() as f32 {
                    continue;
                }
                let color = src.get_pixel(sx as u32, sy as u32).0;
                blend(&mut self.surface, col, row, color, opacity);
            }
        }
    }

    fn fill_rect(&mut self, lo: Point, hi: Point, color: Color) {
        let (w, h) = self.dimensions();
        let Some((cols, rows)) = pixel_range(lo, hi, w, h) else {
            return;
        };
        for row in rows {
            for col in cols.clone() {
                blend(&mut self.surface, col, row, color, 1.0);
            }
        }
    }

    fn fill_disc(&mut self, center: Point, radius: f32, color: Color) {
        let r = Point::new(radius, radius);
        let (w, h) = self.dimensions();
        let Some((cols, rows)) = pixel_range(center - r, center + r, w, h) else {
            return;
        };
        for row in rows {
            for col in cols.clone() {
                let p = Point::new(col as f32 + 0.5, row as f32 + 0.5);
                if p.distance(center) <= radius {
                    blend(&mut self.surface, col, row, color, 1.0);
                }
            }
        }
    }

    /// Stroke consecutive segments; with `dash`, the on/off phase carries
    /// across segment joins.
    fn stroke_path(&mut self, path: &[Point], stroke: Stroke, dash: Option<[f32; 2]>) {
        let mut phase = 0.0f32;
        for seg in path.windows(2) {
            let (a, b) = (seg[0], seg[1]);
            let len = a.distance(b);
            match dash {
                Some([on, off]) if on > 0.0 && on + off > 0.0 => {
                    let period = on + off;
                    let mut t = 0.0f32;
                    while t < len {
                        let in_period = (phase + t) % period;
                        let remaining = if in_period < on {
                            on - in_period
                        } else {
                            period - in_period
                        };
                        let step = remaining.min(len - t);
                        if in_period < on {
                            let dir = (b - a) / len;
                            self.stroke_segment(a + dir * t, a + dir * (t + step), stroke);
                        }
                        t += step;
                    }
                    phase = (phase + len) % period;
                }
                _ => self.stroke_segment(a, b, stroke),
            }
        }
    }

    fn stroke_segment(&mut self, a: Point, b: Point, stroke: Stroke) {
        let half = (stroke.width / 2.0).max(0.5);
        let pad = Point::new(half, half);
        let lo = Point::new(a.x.min(b.x), a.y.min(b.y)) - pad;
        let hi = Point::new(a.x.max(b.x), a.y.max(b.y)) + pad;
        let (w, h) = self.dimensions();
        let Some((cols, rows)) = pixel_range(lo, hi, w, h) else {
            return;
        };
        for row in rows {
            for col in cols.clone() {
                let p = Point::new(col as f32 + 0.5, row as f32 + 0.5);
                if distance_to_segment(p, a, b) <= half {
                    blend(&mut self.surface, col, row, stroke.color, 1.0);
                }
            }
        }
    }
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * GLYPH_ADVANCE
}

/// Pixel column/row ranges covered by the device rect `lo..hi`, clipped to
/// the surface. `None` when nothing is visible.
fn pixel_range(
    lo: Point,
    hi: Point,
    width: usize,
    height: usize,
) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
    let x0 = lo.x.min(hi.x).floor().max(0.0);
    let y0 = lo.y.min(hi.y).floor().max(0.0);
    let x1 = lo.x.max(hi.x).ceil().min(width as f32);
    let y1 = lo.y.max(hi.y).ceil().min(height as f32);
    if !(x0 < x1 && y0 < y1) {
        return None;
    }
    Some((x0 as usize..x1 as usize, y0 as usize..y1 as usize))
}

/// Straight-alpha source-over of `color` (alpha scaled by `opacity`).
fn blend(surface: &mut RgbaImage, col: usize, row: usize, color: Color, opacity: f32) {
    let sa = color[3] as f32 / 255.0 * opacity.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let dst = &mut surface.get_pixel_mut(col as u32, row as u32).0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }
    for c in 0..3 {
        let s = color[c] as f32;
        let d = dst[c] as f32;
        dst[c] = ((s * sa + d * da * (1.0 - sa)) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
