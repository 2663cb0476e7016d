//! Screen <-> image coordinate transform.
//!
//! Device coordinates are canvas-local pixels. The image is drawn translated
//! by `pan` and scaled by `zoom`, so `device = image * zoom + pan`.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f32,
    pub pan: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ZERO,
        }
    }
}

impl Viewport {
    /// Map a device point to image space: `(device - pan) / zoom`.
    pub fn to_image_space(&self, device: Point) -> Point {
        (device - self.pan) / self.zoom
    }

    /// Map an image point to device space.
    pub fn to_device_space(&self, image: Point) -> Point {
        image * self.zoom + self.pan
    }

    /// Zoom one step in (`direction > 0`) or out (`direction < 0`) while keeping
    /// the image point under `device` fixed.
    pub fn zoom_at(&mut self, device: Point, direction: i32) {
        let factor = match direction.signum() {
            1 => ZOOM_STEP,
            -1 => 1.0 / ZOOM_STEP,
            _ => return,
        };

        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = new_zoom / self.zoom;
        self.pan = device - (device - self.pan) * ratio;
        self.zoom = new_zoom;
    }

    pub fn pan_by(&mut self, delta: Point) {
        self.pan += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fit an image of `image_size` inside a canvas of `canvas_size`, centred.
    pub fn fit(&mut self, image_size: Point, canvas_size: Point) {
        if image_size.x <= 0.0 || image_size.y <= 0.0 {
            return;
        }
        let fit_x = canvas_size.x / image_size.x;
        let fit_y = canvas_size.y / image_size.y;
        self.zoom = fit_x.min(fit_y).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = (canvas_size - image_size * self.zoom) / 2.0;
    }
}
