use crate::consts::{
    EPSILON, GRADIENT_EDGE_LEVEL, GRADIENT_MID_LEVEL, GRADIENT_MID_OFFSET, GRADIENT_RADIUS_SCALE,
};
use crate::geometry::Point;

/// Radial falloff with piecewise-linear stops, inner radius 0.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub radius: f32,
    /// `(offset in [0, 1], level)`, sorted by offset.
    pub stops: [(f32, f32); 3],
}

impl RadialGradient {
    /// Gradient for a region glowing at `intensity`: full at the centre,
    /// 80% at 0.7 r, 30% at r, where r is 1.2x the bounding radius.
    pub fn for_region(center: Point, bounding_radius: f32, intensity: f32) -> Self {
        Self {
            center,
            radius: bounding_radius * GRADIENT_RADIUS_SCALE,
            stops: [
                (0.0, intensity),
                (GRADIENT_MID_OFFSET, intensity * GRADIENT_MID_LEVEL),
                (1.0, intensity * GRADIENT_EDGE_LEVEL),
            ],
        }
    }

    /// Level at `p`. Outside the outer radius the last stop is held.
    pub fn level_at(&self, p: Point) -> f32 {
        if self.radius <= EPSILON {
            return self.stops[0].1;
        }
        let offset = p.distance(self.center) / self.radius;

        let mut prev = self.stops[0];
        if offset <= prev.0 {
            return prev.1;
        }
        for &next in &self.stops[1..] {
            if offset <= next.0 {
                let f = (offset - prev.0) / (next.0 - prev.0);
                return prev.1 + (next.1 - prev.1) * f;
            }
            prev = next;
        }
        prev.1
    }
}
