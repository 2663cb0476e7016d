use approx::assert_relative_eq;

use floorheat_core::consts::{MAX_ZOOM, MIN_ZOOM};
use floorheat_core::geometry::Point;
use floorheat_core::viewport::Viewport;

fn assert_point_eq(a: Point, b: Point) {
    assert_relative_eq!(a.x, b.x, epsilon = 1e-3, max_relative = 1e-4);
    assert_relative_eq!(a.y, b.y, epsilon = 1e-3, max_relative = 1e-4);
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

#[test]
fn test_identity_transform() {
    let vp = Viewport::default();
    assert_eq!(vp.to_image_space(Point::new(12.0, 34.0)), Point::new(12.0, 34.0));
}

#[test]
fn test_to_image_space_inverts_pan_then_scale() {
    let vp = Viewport {
        zoom: 2.0,
        pan: Point::new(10.0, -20.0),
    };
    // (device - pan) / zoom
    assert_point_eq(vp.to_image_space(Point::new(50.0, 40.0)), Point::new(20.0, 30.0));
}

#[test]
fn test_device_and_image_space_are_inverse() {
    let vp = Viewport {
        zoom: 0.37,
        pan: Point::new(-123.0, 45.5),
    };
    let p = Point::new(640.0, 212.0);
    assert_point_eq(vp.to_image_space(vp.to_device_space(p)), p);
}

// ---------------------------------------------------------------------------
// Zoom anchoring
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_in_at_50_50_from_identity() {
    let mut vp = Viewport::default();
    let cursor = Point::new(50.0, 50.0);
    let before = vp.to_image_space(cursor);
    vp.zoom_at(cursor, 1);
    let after = vp.to_image_space(cursor);

    assert_point_eq(before, Point::new(50.0, 50.0));
    assert_point_eq(after, Point::new(50.0, 50.0));
    assert_relative_eq!(vp.zoom, 1.1, epsilon = 1e-6);
}

#[test]
fn test_zoom_keeps_cursor_point_fixed() {
    let cursors = [
        Point::new(0.0, 0.0),
        Point::new(50.0, 50.0),
        Point::new(799.0, 13.0),
        Point::new(-40.0, 300.0),
    ];
    let zooms = [0.1, 0.5, 1.0, 2.3, 5.0];
    let pans = [Point::ZERO, Point::new(100.0, -50.0), Point::new(-333.0, 21.5)];

    for &cursor in &cursors {
        for &zoom in &zooms {
            for &pan in &pans {
                for direction in [1, -1] {
                    let mut vp = Viewport { zoom, pan };
                    let before = vp.to_image_space(cursor);
                    vp.zoom_at(cursor, direction);
                    assert_point_eq(vp.to_image_space(cursor), before);
                }
            }
        }
    }
}

#[test]
fn test_zoom_anchoring_survives_many_steps() {
    let mut vp = Viewport::default();
    let cursor = Point::new(321.0, 123.0);
    let before = vp.to_image_space(cursor);
    for _ in 0..10 {
        vp.zoom_at(cursor, 1);
    }
    for _ in 0..4 {
        vp.zoom_at(cursor, -1);
    }
    assert_point_eq(vp.to_image_space(cursor), before);
}

#[test]
fn test_zoom_direction_zero_is_noop() {
    let mut vp = Viewport {
        zoom: 1.7,
        pan: Point::new(3.0, 4.0),
    };
    let copy = vp;
    vp.zoom_at(Point::new(10.0, 10.0), 0);
    assert_eq!(vp, copy);
}

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

#[test]
fn test_repeated_zoom_in_clamps_at_max() {
    let mut vp = Viewport::default();
    for _ in 0..200 {
        vp.zoom_at(Point::new(10.0, 10.0), 1);
        assert!(vp.zoom <= MAX_ZOOM, "zoom {} exceeded max", vp.zoom);
    }
    assert_relative_eq!(vp.zoom, MAX_ZOOM);
}

#[test]
fn test_repeated_zoom_out_clamps_at_min() {
    let mut vp = Viewport::default();
    for _ in 0..200 {
        vp.zoom_at(Point::new(10.0, 10.0), -1);
        assert!(vp.zoom >= MIN_ZOOM, "zoom {} below min", vp.zoom);
    }
    assert_relative_eq!(vp.zoom, MIN_ZOOM);
}

#[test]
fn test_zoom_at_clamp_does_not_move_pan() {
    let mut vp = Viewport {
        zoom: MAX_ZOOM,
        pan: Point::new(7.0, 9.0),
    };
    vp.zoom_at(Point::new(100.0, 100.0), 1);
    assert_eq!(vp.zoom, MAX_ZOOM);
    assert_point_eq(vp.pan, Point::new(7.0, 9.0));
}

// ---------------------------------------------------------------------------
// Pan / reset / fit
// ---------------------------------------------------------------------------

#[test]
fn test_pan_is_pure_translation() {
    let mut vp = Viewport {
        zoom: 2.0,
        pan: Point::new(1.0, 1.0),
    };
    vp.pan_by(Point::new(20.0, -5.0));
    assert_eq!(vp.pan, Point::new(21.0, -4.0));
    assert_eq!(vp.zoom, 2.0);
}

#[test]
fn test_reset_restores_identity() {
    let mut vp = Viewport {
        zoom: 3.0,
        pan: Point::new(50.0, 60.0),
    };
    vp.reset();
    assert_eq!(vp, Viewport::default());
}

#[test]
fn test_fit_scales_and_centres() {
    let mut vp = Viewport::default();
    vp.fit(Point::new(800.0, 600.0), Point::new(800.0, 300.0));
    assert_relative_eq!(vp.zoom, 0.5);
    assert_point_eq(vp.pan, Point::new(200.0, 0.0));
}
