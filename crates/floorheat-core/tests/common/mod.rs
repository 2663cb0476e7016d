#![allow(dead_code)]

use floorheat_core::geometry::Point;
use floorheat_core::interaction::{AppState, InputEvent, Mode};
use floorheat_core::region::RegionId;
use floorheat_core::values::ValueMap;

/// Axis-aligned rectangle as a clockwise point list.
pub fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

pub fn values(entries: &[(&str, f64)]) -> ValueMap {
    entries.iter().map(|(k, v)| (*k, *v)).collect()
}

/// Create `name` and click each point in turn. Leaves the region active.
pub fn draw_region(state: &mut AppState, name: &str, points: &[Point]) -> RegionId {
    state
        .apply(&InputEvent::CreateRegion(name.to_string()))
        .expect("create region");
    let Mode::Draw(id) = state.mode() else {
        panic!("expected draw mode after create");
    };
    for &p in points {
        let device = state.viewport().to_device_space(p);
        state.apply(&InputEvent::Click(device)).expect("append point");
    }
    id
}

/// An image of `width x height` with finished regions and their values.
pub fn scene(
    width: u32,
    height: u32,
    regions: &[(&str, Vec<Point>)],
    entries: &[(&str, f64)],
) -> AppState {
    let mut state = AppState::new();
    state
        .apply(&InputEvent::ImageLoaded { width, height })
        .expect("image");
    state
        .apply(&InputEvent::ValuesLoaded(values(entries)))
        .expect("values");
    for (name, points) in regions {
        draw_region(&mut state, name, points);
        if points.len() >= 3 {
            state.apply(&InputEvent::FinishDrawing).expect("finish");
        } else {
            state.apply(&InputEvent::CancelDrawing).expect("cancel");
        }
    }
    state
}

/// The floor-plan scenario: Cosmetics (500) and Grocery (1000) on 800x600.
pub fn department_scene() -> AppState {
    scene(
        800,
        600,
        &[
            ("Cosmetics", rect(100.0, 100.0, 300.0, 300.0)),
            ("Grocery", rect(400.0, 100.0, 700.0, 400.0)),
        ],
        &[("Cosmetics", 500.0), ("Grocery", 1000.0)],
    )
}

pub fn id_of(state: &AppState, name: &str) -> RegionId {
    state
        .regions()
        .find_by_name(name)
        .unwrap_or_else(|| panic!("region {name} missing"))
        .id()
}
